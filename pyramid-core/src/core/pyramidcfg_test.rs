//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::config::{ApplicationCfg, PyramidCfg, ViewportCfg};
use crate::core::{gen_config, parse_config, Config};
use tile_pyramid::{Extent, Pyramid, PyramidKind, ViewportTransform};

#[test]
fn test_pyramid_from_config() {
    let toml = r#"
        #[pyramid]
        type = "web_mercator"
        "#;
    let config: PyramidCfg = parse_config(toml.to_string(), "").unwrap();
    let pyramid = Pyramid::from_config(&config).unwrap();
    assert_eq!(pyramid, Pyramid::web_mercator());

    let toml = r#"
        #[pyramid]
        type = "AreaOfInterest"
        extent = { minx = 2420000.0, miny = 1030000.0, maxx = 2900000.0, maxy = 1350000.0 }
        "#;
    let config: PyramidCfg = parse_config(toml.to_string(), "").unwrap();
    let pyramid = Pyramid::from_config(&config).unwrap();
    assert_eq!(pyramid.kind(), PyramidKind::AreaOfInterest);
    assert_eq!(
        *pyramid.extent(),
        Extent {
            minx: 2420000.0,
            miny: 1030000.0,
            maxx: 2900000.0,
            maxy: 1350000.0,
        }
    );

    let config: ApplicationCfg = parse_config(Pyramid::gen_config(), "").unwrap();
    assert_eq!(
        Pyramid::from_config(&config.pyramid),
        Ok(Pyramid::web_mercator())
    );
}

#[test]
fn test_pyramid_config_errors() {
    let toml = r#"
        type = "wgs84"
        "#;
    let config: PyramidCfg = parse_config(toml.to_string(), "").unwrap();
    assert_eq!(
        Pyramid::from_config(&config).err(),
        Some("Unknown pyramid type 'wgs84'".to_string())
    );

    let toml = r#"
        type = "area_of_interest"
        "#;
    let config: PyramidCfg = parse_config(toml.to_string(), "").unwrap();
    assert_eq!(
        Pyramid::from_config(&config).err(),
        Some("Missing extent for area_of_interest pyramid".to_string())
    );

    let toml = r#"
        type = "area_of_interest"
        extent = { minx = 10.0, miny = 0.0, maxx = 0.0, maxy = 100.0 }
        "#;
    let config: PyramidCfg = parse_config(toml.to_string(), "").unwrap();
    assert!(Pyramid::from_config(&config)
        .err()
        .unwrap()
        .starts_with("Invalid configuration"));
}

#[test]
fn test_viewport_from_config() {
    let toml = r#"
        zoom = 3
        origin = [100, 200.5]
        size = [640, 480]
        "#;
    let config: ViewportCfg = parse_config(toml.to_string(), "").unwrap();
    let view = ViewportTransform::from_config(&config).unwrap();
    assert_eq!(view.zoom(), 3);
    assert_eq!(view.origin(), (100.0, 200.5));
    assert_eq!(view.size(), (640, 480));

    let toml = r#"
        size = [0, 480]
        "#;
    let config: ViewportCfg = parse_config(toml.to_string(), "").unwrap();
    assert!(ViewportTransform::from_config(&config).is_err());
}

#[test]
fn test_gen_application_config() {
    let config: ApplicationCfg = parse_config(gen_config(), "").unwrap();
    assert_eq!(Pyramid::from_config(&config.pyramid), Ok(Pyramid::web_mercator()));
    let viewport = config.viewport.unwrap();
    assert_eq!(viewport.size, (256, 256));
    assert_eq!(viewport.bins, 1);
    assert_eq!(config.map.unwrap().zoom_levels, 18);
}
