//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Tile and bin identifiers

use crate::error::{PyramidError, Result};
use std::fmt;
use std::str::FromStr;

/// Deepest supported zoom level.
/// Tile indices of all levels fit into 30 bits, z-order keys into 60 bits.
pub const MAX_LEVEL: u8 = 30;

/// Number of tiles along one axis at `level`
pub fn tiles_per_side(level: u8) -> u32 {
    1u32 << level
}

pub(crate) fn check_level(level: u8) -> Result<()> {
    if level > MAX_LEVEL {
        return Err(PyramidError::InvalidConfiguration(format!(
            "level {} exceeds maximum level {}",
            level, MAX_LEVEL
        )));
    }
    Ok(())
}

/// Parse a zoom level given as text (e.g. from a command line or an URL)
pub fn parse_level(level: &str) -> Result<u8> {
    let level = level.trim();
    let value: i64 = level.parse().map_err(|_| {
        PyramidError::InvalidConfiguration(format!("level '{}' is not an integer", level))
    })?;
    if value < 0 {
        return Err(PyramidError::InvalidConfiguration(format!(
            "level {} is negative",
            value
        )));
    }
    if value > MAX_LEVEL as i64 {
        return Err(PyramidError::InvalidConfiguration(format!(
            "level {} exceeds maximum level {}",
            value, MAX_LEVEL
        )));
    }
    Ok(value as u8)
}

/// Identifies one cell of the pyramid at a zoom level.
/// Tile `(0, 0)` is the bottom-left tile.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct TileIndex {
    pub level: u8,
    pub x: u32,
    pub y: u32,
}

impl TileIndex {
    pub fn new(level: u8, x: u32, y: u32) -> Result<TileIndex> {
        check_level(level)?;
        let n = tiles_per_side(level);
        if x >= n || y >= n {
            return Err(PyramidError::InvalidTileKey(format!("{},{},{}", level, x, y)));
        }
        Ok(TileIndex { level, x, y })
    }
    /// Canonical key `"level,x,y"`
    pub fn key(&self) -> String {
        self.to_string()
    }
    /// Spatial key with x in the even and y in the odd bits
    pub fn zorder(&self) -> u64 {
        spread_bits(self.x as u64) | (spread_bits(self.y as u64) << 1)
    }
}

// Insert a zero bit between each of the lower 32 bits
fn spread_bits(v: u64) -> u64 {
    let mut v = v & 0x0000_0000_FFFF_FFFF;
    v = (v | (v << 16)) & 0x0000_FFFF_0000_FFFF;
    v = (v | (v << 8)) & 0x00FF_00FF_00FF_00FF;
    v = (v | (v << 4)) & 0x0F0F_0F0F_0F0F_0F0F;
    v = (v | (v << 2)) & 0x3333_3333_3333_3333;
    v = (v | (v << 1)) & 0x5555_5555_5555_5555;
    v
}

impl fmt::Display for TileIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{},{}", self.level, self.x, self.y)
    }
}

impl FromStr for TileIndex {
    type Err = PyramidError;

    fn from_str(key: &str) -> Result<TileIndex> {
        let invalid = || PyramidError::InvalidTileKey(key.to_string());
        let parts: Vec<&str> = key.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(invalid());
        }
        let level: u8 = parts[0].parse().map_err(|_| invalid())?;
        let x: u32 = parts[1].parse().map_err(|_| invalid())?;
        let y: u32 = parts[2].parse().map_err(|_| invalid())?;
        if level > MAX_LEVEL {
            return Err(invalid());
        }
        TileIndex::new(level, x, y).map_err(|_| invalid())
    }
}

/// Sub-cell of a tile. Bin `(0, 0)` is the bottom-left bin of the tile.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct BinIndex {
    pub tile: TileIndex,
    pub x: u32,
    pub y: u32,
}

/// Result of resolving a point to tile resolution and below
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct TileAndBin {
    pub tile: TileIndex,
    pub bin: BinIndex,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_key() {
        let tile = TileIndex::new(1, 0, 1).unwrap();
        assert_eq!(tile.key(), "1,0,1");
        assert_eq!("1,0,1".parse::<TileIndex>(), Ok(tile));
        assert_eq!(" 3, 7,2 ".parse::<TileIndex>().unwrap().key(), "3,7,2");

        assert_eq!(
            "1,2,0".parse::<TileIndex>(),
            Err(PyramidError::InvalidTileKey("1,2,0".to_string()))
        );
        assert!("1,0".parse::<TileIndex>().is_err());
        assert!("a,b,c".parse::<TileIndex>().is_err());
        assert!("-1,0,0".parse::<TileIndex>().is_err());
        assert!("31,0,0".parse::<TileIndex>().is_err());
    }

    #[test]
    fn test_tile_equality() {
        let a = TileIndex { level: 4, x: 3, y: 9 };
        let b = "4,3,9".parse::<TileIndex>().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.key(), b.key());
        assert_ne!(a, TileIndex { level: 4, x: 9, y: 3 });
    }

    #[test]
    fn test_zorder() {
        assert_eq!(TileIndex::new(1, 0, 0).unwrap().zorder(), 0);
        assert_eq!(TileIndex::new(1, 1, 0).unwrap().zorder(), 1);
        assert_eq!(TileIndex::new(1, 0, 1).unwrap().zorder(), 2);
        assert_eq!(TileIndex::new(1, 1, 1).unwrap().zorder(), 3);
        assert_eq!(TileIndex::new(2, 2, 0).unwrap().zorder(), 4);
        let max = tiles_per_side(MAX_LEVEL) - 1;
        assert_eq!(
            TileIndex::new(MAX_LEVEL, max, max).unwrap().zorder(),
            (1u64 << 60) - 1
        );
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("0"), Ok(0));
        assert_eq!(parse_level(" 12"), Ok(12));
        assert!(parse_level("-1").is_err());
        assert!(parse_level("1.5").is_err());
        assert!(parse_level("31").is_err());
        assert!(parse_level("").is_err());
    }
}
