//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::config::{PyramidCfg, ViewportCfg};
use crate::core::Config;
use tile_pyramid::{Extent, Pyramid, ViewportTransform};

#[derive(Deserialize, Clone, Debug)]
pub struct ExtentCfg {
    pub minx: f64,
    pub miny: f64,
    pub maxx: f64,
    pub maxy: f64,
}

impl From<&ExtentCfg> for Extent {
    fn from(cfg: &ExtentCfg) -> Extent {
        Extent {
            minx: cfg.minx,
            miny: cfg.miny,
            maxx: cfg.maxx,
            maxy: cfg.maxy,
        }
    }
}

impl<'a> Config<'a, PyramidCfg> for Pyramid {
    fn from_config(pyramid_cfg: &PyramidCfg) -> Result<Self, String> {
        match pyramid_cfg.pyramid_type.to_lowercase().as_str() {
            "web_mercator" | "webmercator" => Ok(Pyramid::web_mercator()),
            "area_of_interest" | "areaofinterest" => {
                let extent = pyramid_cfg
                    .extent
                    .as_ref()
                    .ok_or("Missing extent for area_of_interest pyramid".to_string())?;
                Pyramid::area_of_interest(Extent::from(extent)).map_err(|e| e.to_string())
            }
            _ => Err(format!("Unknown pyramid type '{}'", pyramid_cfg.pyramid_type)),
        }
    }
    fn gen_config() -> String {
        let toml = r#"
[pyramid]
type = "web_mercator"
"#;
        toml.to_string()
    }
}

impl<'a> Config<'a, ViewportCfg> for ViewportTransform {
    fn from_config(viewport_cfg: &ViewportCfg) -> Result<Self, String> {
        ViewportTransform::new(viewport_cfg.zoom, viewport_cfg.origin, viewport_cfg.size)
            .map_err(|e| e.to_string())
    }
    fn gen_config() -> String {
        let toml = r#"
[viewport]
zoom = 0
origin = [0.0, 0.0]
size = [256, 256]
"#;
        toml.to_string()
    }
}

/// Configuration template for a whole application
pub fn gen_config() -> String {
    let mut config = String::new();
    config.push_str(&Pyramid::gen_config());
    config.push_str("# type = \"area_of_interest\"\n");
    config.push_str("# extent = { minx = 0.0, miny = 0.0, maxx = 100.0, maxy = 100.0 }\n");
    config.push_str(&ViewportTransform::gen_config());
    config.push_str("bins = 1\n");
    config.push_str("\n[map]\nzoom_levels = 18\n");
    config
}
