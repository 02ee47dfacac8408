//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Tile iterators

use crate::error::Result;
use crate::pyramid::{Extent, Pyramid};
use crate::tile_index::{check_level, TileIndex};
use std::convert::TryFrom;

/// Min and max tile numbers (inclusive)
#[derive(PartialEq, Clone, Debug)]
pub struct ExtentInt {
    pub minx: u32,
    pub miny: u32,
    pub maxx: u32,
    pub maxy: u32,
}

impl ExtentInt {
    pub fn tile_count(&self) -> u64 {
        (self.maxx - self.minx + 1) as u64 * (self.maxy - self.miny + 1) as u64
    }
}

/// Tile index limits of all tiles at `level` intersecting `query`.
/// `None` if the query does not touch the pyramid extent.
pub fn tile_limits(pyramid: &Pyramid, level: u8, query: &Extent) -> Result<Option<ExtentInt>> {
    check_level(level)?;
    let extent = pyramid.extent();
    // Inverted or NaN queries cover nothing
    if !(query.minx <= query.maxx && query.miny <= query.maxy) {
        return Ok(None);
    }
    if !extent.intersects(query) {
        return Ok(None);
    }
    let min = pyramid.tile_for_point(
        query.minx.max(extent.minx),
        query.miny.max(extent.miny),
        level,
    )?;
    let max = pyramid.tile_for_point(
        query.maxx.min(extent.maxx),
        query.maxy.min(extent.maxy),
        level,
    )?;
    Ok(Some(ExtentInt {
        minx: min.x,
        miny: min.y,
        maxx: max.x,
        maxy: max.y,
    }))
}

/// Lazy iterator over the tiles of one level intersecting a query rectangle.
///
/// Tiles are produced in row-major order: `y` outer, `x` inner, both ascending.
#[derive(Clone, Debug)]
pub struct TileIterator {
    level: u8,
    limits: Option<ExtentInt>,
    x: u32,
    y: u32,
    finished: bool,
}

impl TileIterator {
    pub fn new(pyramid: &Pyramid, level: u8, query: &Extent) -> Result<TileIterator> {
        let limits = tile_limits(pyramid, level, query)?;
        Ok(TileIterator::from_limits(level, limits))
    }

    /// All tiles of `level`
    pub fn full(pyramid: &Pyramid, level: u8) -> Result<TileIterator> {
        TileIterator::new(pyramid, level, pyramid.extent())
    }

    fn from_limits(level: u8, limits: Option<ExtentInt>) -> TileIterator {
        let mut iter = TileIterator {
            level,
            limits,
            x: 0,
            y: 0,
            finished: true,
        };
        iter.restart();
        iter
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn limits(&self) -> Option<&ExtentInt> {
        self.limits.as_ref()
    }

    /// Rewind to the first tile
    pub fn restart(&mut self) {
        match self.limits {
            Some(ref limits) => {
                self.x = limits.minx;
                self.y = limits.miny;
                self.finished = false;
            }
            None => self.finished = true,
        }
    }

    /// Number of tiles not yet produced
    pub fn remaining(&self) -> u64 {
        match self.limits {
            Some(ref limits) if !self.finished => {
                let width = (limits.maxx - limits.minx + 1) as u64;
                (limits.maxy - self.y) as u64 * width + (limits.maxx - self.x + 1) as u64
            }
            _ => 0,
        }
    }

    /// Collect the remaining tiles
    pub fn drain(&mut self) -> Vec<TileIndex> {
        self.by_ref().collect()
    }

    /// Collect the remaining tiles as `"level,x,y"` keys
    pub fn tile_keys(&mut self) -> Vec<String> {
        self.by_ref().map(|tile| tile.key()).collect()
    }
}

impl Iterator for TileIterator {
    type Item = TileIndex;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let limits = self.limits.as_ref()?;
        let current = TileIndex {
            level: self.level,
            x: self.x,
            y: self.y,
        };
        if self.x < limits.maxx {
            self.x += 1;
        } else if self.y < limits.maxy {
            self.y += 1;
            self.x = limits.minx;
        } else {
            self.finished = true;
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining()) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

#[cfg(test)]
fn unit_pyramid() -> Pyramid {
    Pyramid::area_of_interest(Extent {
        minx: 0.0,
        miny: 0.0,
        maxx: 100.0,
        maxy: 100.0,
    })
    .unwrap()
}

#[cfg(test)]
fn tiles(level: u8, coords: &[(u32, u32)]) -> Vec<TileIndex> {
    coords
        .iter()
        .map(|&(x, y)| TileIndex { level, x, y })
        .collect()
}

#[test]
fn test_row_major_order() {
    let pyramid = unit_pyramid();
    let query = Extent {
        minx: 10.0,
        miny: 10.0,
        maxx: 90.0,
        maxy: 90.0,
    };
    let mut iter = TileIterator::new(&pyramid, 1, &query).unwrap();
    assert_eq!(iter.remaining(), 4);
    assert_eq!(
        iter.drain(),
        tiles(1, &[(0, 0), (1, 0), (0, 1), (1, 1)])
    );
    assert_eq!(iter.remaining(), 0);
    assert_eq!(iter.next(), None);

    let query = Extent {
        minx: 30.0,
        miny: 10.0,
        maxx: 80.0,
        maxy: 60.0,
    };
    let mut iter = TileIterator::new(&pyramid, 2, &query).unwrap();
    assert_eq!(
        iter.limits(),
        Some(&ExtentInt {
            minx: 1,
            miny: 0,
            maxx: 3,
            maxy: 2,
        })
    );
    assert_eq!(
        iter.tile_keys(),
        vec!["2,1,0", "2,2,0", "2,3,0", "2,1,1", "2,2,1", "2,3,1", "2,1,2", "2,2,2", "2,3,2"]
    );
}

#[test]
fn test_full_extent() {
    let pyramid = unit_pyramid();
    for level in 0..6 {
        let cells = TileIterator::full(&pyramid, level).unwrap().drain();
        assert_eq!(cells.len() as u64, 4u64.pow(level as u32));
        let unique: std::collections::HashSet<_> = cells.iter().collect();
        assert_eq!(unique.len(), cells.len());
        // union of the tile rectangles reconstructs the extent
        let area: f64 = cells
            .iter()
            .map(|tile| {
                let b = pyramid.bounds_of_tile(tile);
                b.width() * b.height()
            })
            .sum();
        assert!((area - 100.0 * 100.0).abs() < 1e-6);
        let last = cells.last().unwrap();
        assert_eq!(pyramid.bounds_of_tile(last).maxx, 100.0);
        assert_eq!(pyramid.bounds_of_tile(last).maxy, 100.0);
    }

    let grid = Pyramid::web_mercator();
    let cells = TileIterator::full(&grid, 0).unwrap().drain();
    assert_eq!(cells, tiles(0, &[(0, 0)]));
}

#[test]
fn test_edges() {
    let pyramid = unit_pyramid();

    // touching the max edge only
    let query = Extent {
        minx: 100.0,
        miny: 100.0,
        maxx: 150.0,
        maxy: 150.0,
    };
    let cells = TileIterator::new(&pyramid, 2, &query).unwrap().drain();
    assert_eq!(cells, tiles(2, &[(3, 3)]));

    let query = Extent {
        minx: 20.0,
        miny: 100.0,
        maxx: 30.0,
        maxy: 120.0,
    };
    let cells = TileIterator::new(&pyramid, 2, &query).unwrap().drain();
    assert_eq!(cells, tiles(2, &[(0, 3), (1, 3)]));

    // larger than the pyramid
    let query = Extent {
        minx: -50.0,
        miny: -50.0,
        maxx: 150.0,
        maxy: 150.0,
    };
    let iter = TileIterator::new(&pyramid, 1, &query).unwrap();
    assert_eq!(iter.count(), 4);
}

#[test]
fn test_empty() {
    let pyramid = unit_pyramid();

    let outside = Extent {
        minx: 150.0,
        miny: 0.0,
        maxx: 200.0,
        maxy: 100.0,
    };
    let mut iter = TileIterator::new(&pyramid, 3, &outside).unwrap();
    assert_eq!(iter.limits(), None);
    assert_eq!(iter.size_hint(), (0, Some(0)));
    assert_eq!(iter.drain(), vec![]);
    iter.restart();
    assert_eq!(iter.next(), None);

    let inverted = Extent {
        minx: 60.0,
        miny: 10.0,
        maxx: 40.0,
        maxy: 90.0,
    };
    let iter = TileIterator::new(&pyramid, 3, &inverted).unwrap();
    assert_eq!(iter.count(), 0);
}

#[test]
fn test_bad_level() {
    let pyramid = unit_pyramid();
    assert!(TileIterator::full(&pyramid, 31).is_err());
}

#[test]
fn test_lazy_and_restartable() {
    let pyramid = Pyramid::web_mercator();
    // 2^60 tiles, must not be materialized
    let mut iter = TileIterator::full(&pyramid, 30).unwrap();
    assert_eq!(iter.remaining(), 1u64 << 60);
    let first: Vec<_> = iter.by_ref().take(3).collect();
    assert_eq!(first, tiles(30, &[(0, 0), (1, 0), (2, 0)]));
    assert_eq!(iter.remaining(), (1u64 << 60) - 3);

    iter.restart();
    assert_eq!(iter.next(), Some(TileIndex { level: 30, x: 0, y: 0 }));

    let pyramid = unit_pyramid();
    let iter = TileIterator::full(&pyramid, 3).unwrap();
    let copy = iter.clone();
    assert_eq!(iter.collect::<Vec<_>>(), copy.collect::<Vec<_>>());
}
