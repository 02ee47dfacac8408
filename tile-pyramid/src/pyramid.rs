//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Tile pyramids

use crate::error::{PyramidError, Result};
use crate::tile_index::{check_level, tiles_per_side, BinIndex, TileAndBin, TileIndex};
use std::f64::consts;

/// Width and height of a tile in pixels, shared by all levels
pub const TILE_SIZE: u16 = 256;

const EARTH_RADIUS: f64 = 6378137.0;
/// Half of the spherical mercator world width in meters
pub const MERC_MAX: f64 = 20037508.342789244;
/// Latitude mapped onto the square spherical mercator extent
pub const MAX_LATITUDE: f64 = 85.0511287798066;

/// Rectangle in world coordinates
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct Extent {
    pub minx: f64,
    pub miny: f64,
    pub maxx: f64,
    pub maxy: f64,
}

impl Extent {
    pub fn width(&self) -> f64 {
        self.maxx - self.minx
    }
    pub fn height(&self) -> f64 {
        self.maxy - self.miny
    }
    pub fn center(&self) -> (f64, f64) {
        (
            (self.minx + self.maxx) / 2.0,
            (self.miny + self.maxy) / 2.0,
        )
    }
    /// Point inside or on the border
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.minx && x <= self.maxx && y >= self.miny && y <= self.maxy
    }
    /// Closed rectangle intersection (touching edges intersect)
    pub fn intersects(&self, other: &Extent) -> bool {
        self.minx <= other.maxx
            && other.minx <= self.maxx
            && self.miny <= other.maxy
            && other.miny <= self.maxy
    }
    /// Check `min < max` on both axes with finite values
    pub fn validate(&self) -> Result<()> {
        let values = [self.minx, self.miny, self.maxx, self.maxy];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(PyramidError::InvalidConfiguration(format!(
                "extent {:?} contains non-finite values",
                self
            )));
        }
        if self.minx >= self.maxx || self.miny >= self.maxy {
            return Err(PyramidError::InvalidConfiguration(format!(
                "extent {:?} requires minx < maxx and miny < maxy",
                self
            )));
        }
        Ok(())
    }
}

/// Pyramid variants
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum PyramidKind {
    /// Fixed spherical mercator extent with geospatial semantics
    WebMercator,
    /// Caller supplied, purely linear extent
    AreaOfInterest,
}

/// Tile pyramid.
///
/// Every level covers the full extent, subdivided into `2^level x 2^level` tiles.
/// Tile `(0,0)` is located at `(minx, miny)`, x increases eastward and y northward.
#[derive(PartialEq, Clone, Debug)]
pub struct Pyramid {
    kind: PyramidKind,
    extent: Extent,
    tile_size: u16,
}

impl Pyramid {
    /// Web Mercator pyramid (Google maps compatible extent)
    pub fn web_mercator() -> Pyramid {
        Pyramid {
            kind: PyramidKind::WebMercator,
            extent: Extent {
                minx: -MERC_MAX,
                miny: -MERC_MAX,
                maxx: MERC_MAX,
                maxy: MERC_MAX,
            },
            tile_size: TILE_SIZE,
        }
    }

    /// Linear bivariate pyramid covering `extent`
    pub fn area_of_interest(extent: Extent) -> Result<Pyramid> {
        extent.validate()?;
        Ok(Pyramid {
            kind: PyramidKind::AreaOfInterest,
            extent,
            tile_size: TILE_SIZE,
        })
    }

    pub fn kind(&self) -> PyramidKind {
        self.kind
    }
    pub fn is_geographic(&self) -> bool {
        self.kind == PyramidKind::WebMercator
    }
    pub fn extent(&self) -> &Extent {
        &self.extent
    }
    pub fn tile_size(&self) -> u16 {
        self.tile_size
    }
    /// Width and height of the whole map at `level`, in pixels
    pub fn map_pixel_size(&self, level: u8) -> u64 {
        (self.tile_size as u64) << level
    }
    /// Area covered at `level`. Always the full extent.
    pub fn tile_extent_at(&self, _level: u8) -> Extent {
        self.extent
    }
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.extent.contains(x, y)
    }

    /// Extent of a given tile
    pub fn bounds_of_tile(&self, tile: &TileIndex) -> Extent {
        let n = tiles_per_side(tile.level);
        Extent {
            minx: cell_edge(self.extent.minx, self.extent.maxx, tile.x, n),
            miny: cell_edge(self.extent.miny, self.extent.maxy, tile.y, n),
            maxx: cell_edge(self.extent.minx, self.extent.maxx, tile.x + 1, n),
            maxy: cell_edge(self.extent.miny, self.extent.maxy, tile.y + 1, n),
        }
    }

    /// Tile and bin containing the point `(x, y)`.
    ///
    /// Points on the max edge of the extent belong to the last tile (and bin).
    pub fn tile_and_bin_for_point(
        &self,
        x: f64,
        y: f64,
        level: u8,
        bins_per_tile_dim: u32,
    ) -> Result<TileAndBin> {
        check_level(level)?;
        if bins_per_tile_dim == 0 {
            return Err(PyramidError::InvalidConfiguration(
                "bins per tile dimension must be at least 1".to_string(),
            ));
        }
        if !self.contains(x, y) {
            return Err(PyramidError::OutOfBounds { x, y });
        }
        let n = tiles_per_side(level);
        let tile = TileIndex {
            level,
            x: cell_index(x, self.extent.minx, self.extent.maxx, n),
            y: cell_index(y, self.extent.miny, self.extent.maxy, n),
        };
        let bounds = self.bounds_of_tile(&tile);
        let bin = BinIndex {
            tile,
            x: cell_index(x, bounds.minx, bounds.maxx, bins_per_tile_dim),
            y: cell_index(y, bounds.miny, bounds.maxy, bins_per_tile_dim),
        };
        Ok(TileAndBin { tile, bin })
    }

    pub fn tile_for_point(&self, x: f64, y: f64, level: u8) -> Result<TileIndex> {
        self.tile_and_bin_for_point(x, y, level, 1)
            .map(|tile_and_bin| tile_and_bin.tile)
    }

    /// Project (lon, lat) into world coordinates. `None` for non geographic pyramids.
    pub fn lonlat_to_world(&self, lon: f64, lat: f64) -> Option<(f64, f64)> {
        match self.kind {
            PyramidKind::WebMercator => Some(lonlat_to_merc(lon, lat)),
            PyramidKind::AreaOfInterest => None,
        }
    }

    /// Inverse of `lonlat_to_world`
    pub fn world_to_lonlat(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        match self.kind {
            PyramidKind::WebMercator => Some(merc_to_lonlat(x, y)),
            PyramidKind::AreaOfInterest => None,
        }
    }
}

// Coordinate of the `i`th cell border of `n` cells between `min` and `max`
fn cell_edge(min: f64, max: f64, i: u32, n: u32) -> f64 {
    if i >= n {
        max
    } else {
        min + (max - min) * (i as f64 / n as f64)
    }
}

// Cell of `n` cells between `min` and `max` containing `value`, clamped into range.
// Agrees with `cell_edge`: a value on a border belongs to the cell starting there.
fn cell_index(value: f64, min: f64, max: f64, n: u32) -> u32 {
    let cell = ((value - min) / (max - min) * n as f64).floor();
    let i = if cell < 0.0 {
        0
    } else if cell >= n as f64 {
        n - 1
    } else {
        cell as u32
    };
    if i > 0 && value < cell_edge(min, max, i, n) {
        i - 1
    } else if i + 1 < n && value >= cell_edge(min, max, i + 1, n) {
        i + 1
    } else {
        i
    }
}

/// Returns the Spherical Mercator (x, y) in meters
pub fn lonlat_to_merc(lon: f64, lat: f64) -> (f64, f64) {
    let lat = lat.max(-MAX_LATITUDE).min(MAX_LATITUDE);
    let x = EARTH_RADIUS * lon.to_radians();
    let y = EARTH_RADIUS * ((consts::PI * 0.25) + (0.5 * lat.to_radians())).tan().ln();
    (x, y)
}

/// Returns (lon, lat) of a Spherical Mercator (x, y) in meters
pub fn merc_to_lonlat(x: f64, y: f64) -> (f64, f64) {
    let lon = (x / EARTH_RADIUS).to_degrees();
    let lat = (2.0 * (y / EARTH_RADIUS).exp().atan() - consts::PI * 0.5).to_degrees();
    (lon, lat)
}

/// Projected extent
pub fn extent_wgs84_to_merc(extent: &Extent) -> Extent {
    let (minx, miny) = lonlat_to_merc(extent.minx, extent.miny);
    let (maxx, maxy) = lonlat_to_merc(extent.maxx, extent.maxy);
    Extent {
        minx,
        miny,
        maxx,
        maxy,
    }
}
