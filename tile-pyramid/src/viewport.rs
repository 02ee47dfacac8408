//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Screen to world transformations

use crate::error::{PyramidError, Result};
use crate::pyramid::{Extent, Pyramid};
use crate::tile_index::{check_level, TileAndBin};
use crate::tile_iterator::TileIterator;

/// Current zoom and pan state of a map view.
///
/// Map pixels have their origin at the top-left corner of the whole map,
/// which is `pyramid.map_pixel_size(zoom)` pixels wide and high.
#[derive(PartialEq, Clone, Debug)]
pub struct ViewportTransform {
    zoom: u8,
    /// Map pixel at the top-left corner of the viewport
    origin: (f64, f64),
    /// Viewport width and height in pixels
    size: (u32, u32),
}

impl ViewportTransform {
    pub fn new(zoom: u8, origin: (f64, f64), size: (u32, u32)) -> Result<ViewportTransform> {
        check_level(zoom)?;
        if size.0 == 0 || size.1 == 0 {
            return Err(PyramidError::InvalidConfiguration(format!(
                "viewport size {}x{} is empty",
                size.0, size.1
            )));
        }
        if !origin.0.is_finite() || !origin.1.is_finite() {
            return Err(PyramidError::InvalidConfiguration(format!(
                "viewport origin {:?} is not finite",
                origin
            )));
        }
        Ok(ViewportTransform { zoom, origin, size })
    }

    /// Viewport of `size` pixels centered on world coordinate `(x, y)`
    pub fn centered_on(
        pyramid: &Pyramid,
        x: f64,
        y: f64,
        zoom: u8,
        size: (u32, u32),
    ) -> Result<ViewportTransform> {
        check_level(zoom)?;
        let (mx, my) = world_to_map_pixel(pyramid, zoom, x, y);
        ViewportTransform::new(
            zoom,
            (mx - size.0 as f64 / 2.0, my - size.1 as f64 / 2.0),
            size,
        )
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }
    pub fn origin(&self) -> (f64, f64) {
        self.origin
    }
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// World coordinate of a pixel relative to the viewport's top-left corner
    pub fn viewport_pixel_to_world(&self, pyramid: &Pyramid, px: f64, py: f64) -> (f64, f64) {
        let extent = pyramid.extent();
        let map_size = pyramid.map_pixel_size(self.zoom) as f64;
        let mx = self.origin.0 + px;
        let my = self.origin.1 + py;
        (
            extent.minx + mx / map_size * extent.width(),
            // map pixels grow downwards, world y grows northwards
            extent.maxy - my / map_size * extent.height(),
        )
    }

    /// Viewport pixel of a world coordinate
    pub fn world_to_viewport_pixel(&self, pyramid: &Pyramid, x: f64, y: f64) -> (f64, f64) {
        let (mx, my) = world_to_map_pixel(pyramid, self.zoom, x, y);
        (mx - self.origin.0, my - self.origin.1)
    }

    /// World rectangle covered by the viewport
    pub fn visible_extent(&self, pyramid: &Pyramid) -> Extent {
        let (minx, maxy) = self.viewport_pixel_to_world(pyramid, 0.0, 0.0);
        let (maxx, miny) =
            self.viewport_pixel_to_world(pyramid, self.size.0 as f64, self.size.1 as f64);
        Extent {
            minx,
            miny,
            maxx,
            maxy,
        }
    }

    /// Tile and bin under the viewport pixel `(px, py)`.
    /// Fails with `OutOfBounds` if there is no tile under the pixel.
    pub fn tile_and_bin_for_pixel(
        &self,
        pyramid: &Pyramid,
        px: f64,
        py: f64,
        bins_per_tile_dim: u32,
    ) -> Result<TileAndBin> {
        let (x, y) = self.viewport_pixel_to_world(pyramid, px, py);
        pyramid.tile_and_bin_for_point(x, y, self.zoom, bins_per_tile_dim)
    }

    /// Tiles under the pixels of the viewport.
    ///
    /// A tile is in view if the centre of any viewport pixel lies on it, so a
    /// viewport aligned to tile borders does not include the neighbouring tiles.
    pub fn tiles_in_view(&self, pyramid: &Pyramid) -> Result<TileIterator> {
        let (minx, maxy) = self.viewport_pixel_to_world(pyramid, 0.5, 0.5);
        let (maxx, miny) = self.viewport_pixel_to_world(
            pyramid,
            self.size.0 as f64 - 0.5,
            self.size.1 as f64 - 0.5,
        );
        let query = Extent {
            minx,
            miny,
            maxx,
            maxy,
        };
        TileIterator::new(pyramid, self.zoom, &query)
    }
}

fn world_to_map_pixel(pyramid: &Pyramid, zoom: u8, x: f64, y: f64) -> (f64, f64) {
    let extent = pyramid.extent();
    let map_size = pyramid.map_pixel_size(zoom) as f64;
    (
        (x - extent.minx) / extent.width() * map_size,
        (extent.maxy - y) / extent.height() * map_size,
    )
}
