//! Decoder errors.

use map_common::MapError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    /// The text could not be parsed as a geometry.
    #[error("Invalid WKT: {0}")]
    Malformed(String),

    /// Parsed, but not a line string.
    #[error("Geometry must be a linestring, got {0}")]
    UnsupportedType(&'static str),

    /// A line string with no vertices.
    #[error("Empty geometry")]
    Empty,
}

impl From<DecodeError> for MapError {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::UnsupportedType(kind) => MapError::UnsupportedGeometryType(kind.to_string()),
            other => MapError::MalformedGeometry(other.to_string()),
        }
    }
}
