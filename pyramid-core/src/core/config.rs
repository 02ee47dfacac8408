//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::pyramidcfg::ExtentCfg;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::error::Error;
use std::fs::File;
use std::io::prelude::*;
use tera::{Context, Tera};
use toml::Value;

pub trait Config<'a, C: Deserialize<'a>>
where
    Self: std::marker::Sized,
{
    /// Read configuration
    fn from_config(config: &C) -> Result<Self, String>;
    /// Generate configuration template
    fn gen_config() -> String;
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationCfg {
    pub pyramid: PyramidCfg,
    pub viewport: Option<ViewportCfg>,
    pub map: Option<MapCfg>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct PyramidCfg {
    /// Pyramid type (web_mercator, area_of_interest)
    #[serde(rename = "type", default = "default_pyramid_type")]
    pub pyramid_type: String,
    /// Extent of area_of_interest pyramids, ordered as minx, miny, maxx, maxy.
    /// (minx, miny) is the bottom-left corner of tile (0, 0) at every level.
    pub extent: Option<ExtentCfg>,
}

pub fn default_pyramid_type() -> String {
    "web_mercator".to_string()
}

#[derive(Deserialize, Clone, Debug)]
pub struct ViewportCfg {
    #[serde(default)]
    pub zoom: u8,
    /// Map pixel at the top-left corner of the viewport
    #[serde(default)]
    pub origin: (f64, f64),
    /// Viewport width and height in pixels
    pub size: (u32, u32),
    /// Bins per tile dimension when resolving pixels
    #[serde(default = "default_bins")]
    pub bins: u32,
}

pub fn default_bins() -> u32 {
    1
}

#[derive(Deserialize, Clone, Debug)]
pub struct MapCfg {
    /// Number of zoom levels offered by the map
    #[serde(default = "default_zoom_levels")]
    pub zoom_levels: u8,
}

pub fn default_zoom_levels() -> u8 {
    18
}

/// Load and parse the config file into an config struct.
pub fn read_config<'a, T: Deserialize<'a>>(path: &str) -> Result<T, String> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(_) => {
            return Err("Could not find config file!".to_string());
        }
    };
    let mut config_toml = String::new();
    if let Err(err) = file.read_to_string(&mut config_toml) {
        return Err(format!("Error while reading config: [{}]", err));
    };

    parse_config(config_toml, path)
}

/// Parse the configuration into an config struct.
pub fn parse_config<'a, T: Deserialize<'a>>(config_toml: String, path: &str) -> Result<T, String> {
    // Check for old ${var} expressions
    let re = Regex::new(r"\$\{([[:alnum:]]+)\}").map_err(|e| e.to_string())?;
    if re.is_match(&config_toml) {
        return Err(
            "Replace old environment variable syntax ${VARNAME} with `{{env.VARNAME}}`".to_string(),
        );
    }

    // Parse template
    let mut tera = Tera::default();
    tera.add_raw_template(path, &config_toml)
        .map_err(|e| format!("Template error: {}", e))?;
    let mut context = Context::new();
    let mut env = HashMap::new();
    for (key, value) in env::vars() {
        env.insert(key, value);
    }
    context.insert("env", &env);
    let toml = tera.render(path, &context).map_err(|e| {
        let cause = e.source().map(|s| s.to_string()).unwrap_or(e.to_string());
        format!("Template error: {}", cause)
    })?;

    debug!("Parsing configuration {}", path);
    toml.parse::<Value>()
        .and_then(|cfg| cfg.try_into::<T>())
        .map_err(|err| format!("{} - {}", path, err))
}
