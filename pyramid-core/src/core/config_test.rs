//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::config::{read_config, ApplicationCfg};
use crate::core::parse_config;

#[test]
fn test_load_config() {
    let config = read_config("src/test/example.toml");
    println!("{:#?}", config);
    let config: ApplicationCfg = config.expect("load_config returned Err");
    assert_eq!(config.pyramid.pyramid_type, "area_of_interest");
    let extent = config.pyramid.extent.expect("missing extent");
    assert_eq!(extent.maxx, 100.0);
    let viewport = config.viewport.expect("missing viewport");
    assert_eq!(viewport.zoom, 1);
    assert_eq!(viewport.size, (512, 512));
    assert_eq!(viewport.bins, 4);
    assert_eq!(config.map.map(|m| m.zoom_levels), Some(8));
}

#[test]
fn test_defaults() {
    let toml = r#"
        [pyramid]

        [viewport]
        size = [800, 600]
        "#;
    let config: ApplicationCfg = parse_config(toml.to_string(), "").unwrap();
    assert_eq!(config.pyramid.pyramid_type, "web_mercator");
    let viewport = config.viewport.unwrap();
    assert_eq!(viewport.zoom, 0);
    assert_eq!(viewport.origin, (0.0, 0.0));
    assert_eq!(viewport.bins, 1);
    assert!(config.map.is_none());
}

#[test]
fn test_parse_error() {
    let config: Result<ApplicationCfg, _> = read_config("src/core/mod.rs");
    assert!(config.err().unwrap().starts_with("src/core/mod.rs - "));

    let config: Result<ApplicationCfg, _> = read_config("wrongfile");
    assert_eq!("Could not find config file!", config.err().unwrap());

    let toml = r#"
        [viewport]
        size = [800, 600]
        "#;
    let config: Result<ApplicationCfg, _> = parse_config(toml.to_string(), "");
    assert!(config.err().unwrap().contains("pyramid"));

    let toml = r#"
        [pyramid]
        [viewport]
        zoom = -1
        size = [800, 600]
        "#;
    let config: Result<ApplicationCfg, _> = parse_config(toml.to_string(), "");
    assert!(config.is_err());
}

#[test]
fn test_env_template() {
    std::env::set_var("PYRAMID_TEST_MAXX", "250.0");
    let toml = r#"
        [pyramid]
        type = "area_of_interest"
        extent = { minx = 0.0, miny = 0.0, maxx = {{env.PYRAMID_TEST_MAXX}}, maxy = 100.0 }
        "#;
    let config: ApplicationCfg = parse_config(toml.to_string(), "").unwrap();
    assert_eq!(config.pyramid.extent.unwrap().maxx, 250.0);

    let toml = r#"
        [pyramid]
        type = "${PYRAMID_TYPE}"
        "#;
    let config: Result<ApplicationCfg, _> = parse_config(toml.to_string(), "");
    assert_eq!(
        "Replace old environment variable syntax ${VARNAME} with `{{env.VARNAME}}`",
        config.err().unwrap()
    );
}
