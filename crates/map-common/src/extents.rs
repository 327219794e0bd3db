//! Geographic extents of a rendered dataset.

use serde::{Deserialize, Serialize};

use crate::error::{MapError, MapResult};

/// Axis-aligned geographic bounding box.
///
/// Coordinates are in the units of the source geometries (degrees for
/// EPSG:4326, meters for projected data).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extents {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Extents {
    /// Create extents from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Parse a box string: "minx,miny,maxx,maxy"
    pub fn from_bbox_string(s: &str) -> Result<Self, ExtentsParseError> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(ExtentsParseError::InvalidFormat(s.to_string()));
        }

        let mut values = [0.0f64; 4];
        for (value, part) in values.iter_mut().zip(&parts) {
            *value = part
                .parse()
                .map_err(|_| ExtentsParseError::InvalidNumber(part.to_string()))?;
        }

        Ok(Self::new(values[0], values[1], values[2], values[3]))
    }

    /// Width of the extents in coordinate units.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the extents in coordinate units.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Geographic width divided by geographic height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width() / self.height()
    }

    /// Check that the extents can be divided by: finite, ordered, non-zero spans.
    pub fn validate(self) -> MapResult<Self> {
        let finite = [self.min_x, self.min_y, self.max_x, self.max_y]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(MapError::ExtentComputationError(format!(
                "non-finite extents {}",
                self
            )));
        }
        if self.max_x < self.min_x || self.max_y < self.min_y {
            return Err(MapError::ExtentComputationError(format!(
                "inverted extents {}",
                self
            )));
        }
        if self.width() == 0.0 || self.height() == 0.0 {
            return Err(MapError::ExtentComputationError(format!(
                "zero-span extents {} (width {}, height {})",
                self,
                self.width(),
                self.height()
            )));
        }
        Ok(self)
    }
}

impl std::fmt::Display for Extents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}) - ({}, {})",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExtentsParseError {
    #[error("Invalid extents format: {0}. Expected 'minx,miny,maxx,maxy'")]
    InvalidFormat(String),

    #[error("Invalid number in extents: {0}")]
    InvalidNumber(String),
}
