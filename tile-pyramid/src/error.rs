//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use thiserror::Error;

/// Errors of pyramid, iterator and viewport calculations
#[derive(Error, PartialEq, Clone, Debug)]
pub enum PyramidError {
    /// Coordinate outside of the pyramid extent.
    /// Callers usually treat this as "nothing resolved".
    #[error("Coordinate ({x}, {y}) is outside of the pyramid extent")]
    OutOfBounds { x: f64, y: f64 },
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Invalid tile key '{0}'")]
    InvalidTileKey(String),
}

impl PyramidError {
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, PyramidError::OutOfBounds { .. })
    }
}

pub type Result<T> = std::result::Result<T, PyramidError>;
