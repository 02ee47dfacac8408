//! A library for tile pyramid calculations
//!
//! ## Predefined pyramids
//!
//! ```rust
//! use tile_pyramid::{Extent, Pyramid, TileIndex};
//!
//! let pyramid = Pyramid::web_mercator();
//! assert_eq!(
//!     pyramid.bounds_of_tile(&TileIndex { level: 1, x: 0, y: 0 }),
//!     Extent {
//!         minx: -20037508.342789244,
//!         miny: -20037508.342789244,
//!         maxx: 0.0,
//!         maxy: 0.0,
//!     }
//! );
//! ```
//!
//! ## Area of interest pyramids
//!
//! ```rust
//! use tile_pyramid::{Extent, Pyramid, TileIndex};
//!
//! let pyramid = Pyramid::area_of_interest(Extent {
//!     minx: 0.0,
//!     miny: 0.0,
//!     maxx: 100.0,
//!     maxy: 100.0,
//! })
//! .unwrap();
//! let resolved = pyramid.tile_and_bin_for_point(99.0, 99.0, 1, 1).unwrap();
//! assert_eq!(resolved.tile, TileIndex { level: 1, x: 1, y: 1 });
//! assert_eq!(resolved.tile.key(), "1,1,1");
//! ```
//!
//! ## Tile iterators
//!
//! ```rust
//! use tile_pyramid::{Pyramid, TileIterator};
//!
//! let pyramid = Pyramid::web_mercator();
//! let tiles = TileIterator::full(&pyramid, 2).unwrap();
//! for tile in tiles {
//!     println!("Tile {}/{}/{}", tile.level, tile.x, tile.y);
//! }
//! ```
//!
//! ## Viewports
//!
//! ```rust
//! use tile_pyramid::{Pyramid, ViewportTransform};
//!
//! let pyramid = Pyramid::web_mercator();
//! let view = ViewportTransform::new(1, (0.0, 0.0), (512, 512)).unwrap();
//! let under_mouse = view.tile_and_bin_for_pixel(&pyramid, 10.0, 10.0, 1).unwrap();
//! assert_eq!(under_mouse.tile.key(), "1,0,1");
//! ```

mod error;
mod pyramid;
mod tile_index;
mod tile_iterator;
mod viewport;
#[cfg(test)]
mod viewport_test;

pub use error::{PyramidError, Result};
pub use pyramid::{
    extent_wgs84_to_merc, lonlat_to_merc, merc_to_lonlat, Extent, Pyramid, PyramidKind,
    MAX_LATITUDE, MERC_MAX, TILE_SIZE,
};
pub use tile_index::{parse_level, tiles_per_side, BinIndex, TileAndBin, TileIndex, MAX_LEVEL};
pub use tile_iterator::{tile_limits, ExtentInt, TileIterator};
pub use viewport::ViewportTransform;
