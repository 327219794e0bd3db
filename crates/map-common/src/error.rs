//! Error types for the line-render pipeline.

use thiserror::Error;

/// Result type alias using MapError.
pub type MapResult<T> = Result<T, MapError>;

/// Primary error type for the render pipeline.
///
/// Row-level variants (`UnsupportedGeometryType`, `MalformedGeometry`) are
/// isolated to the row that produced them. Every other variant aborts the run.
#[derive(Debug, Error)]
pub enum MapError {
    // === Setup Errors ===
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // === Data Source Errors ===
    #[error("Connection failed: {0}")]
    ConnectionError(String),

    #[error("Query failed: {0}")]
    QueryError(String),

    #[error("Extent computation failed: {0}")]
    ExtentComputationError(String),

    // === Row Errors ===
    #[error("Unsupported geometry type: {0}")]
    UnsupportedGeometryType(String),

    #[error("Malformed geometry: {0}")]
    MalformedGeometry(String),

    // === Output Errors ===
    #[error("Rendering failed: {0}")]
    RenderError(String),

    #[error("Failed to write output: {0}")]
    OutputWriteError(String),
}

impl MapError {
    /// Whether the pipeline may skip the offending row and continue.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            MapError::UnsupportedGeometryType(_) | MapError::MalformedGeometry(_)
        )
    }

    /// Process exit code reported to calling scripts.
    pub fn exit_code(&self) -> u8 {
        match self {
            MapError::InvalidConfig(_) => 2,
            MapError::ConnectionError(_) => 3,
            MapError::QueryError(_) => 4,
            MapError::ExtentComputationError(_) => 5,
            MapError::OutputWriteError(_) => 6,
            MapError::RenderError(_) => 7,
            MapError::UnsupportedGeometryType(_) | MapError::MalformedGeometry(_) => 1,
        }
    }

    /// Short name of the failing stage, used in diagnostics.
    pub fn stage(&self) -> &'static str {
        match self {
            MapError::InvalidConfig(_) => "configuration",
            MapError::ConnectionError(_) => "connect",
            MapError::QueryError(_) => "query",
            MapError::ExtentComputationError(_) => "extents",
            MapError::UnsupportedGeometryType(_) | MapError::MalformedGeometry(_) => "decode",
            MapError::RenderError(_) => "render",
            MapError::OutputWriteError(_) => "output",
        }
    }
}

impl From<std::io::Error> for MapError {
    fn from(err: std::io::Error) -> Self {
        MapError::OutputWriteError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_errors_are_recoverable() {
        assert!(MapError::UnsupportedGeometryType("Polygon".into()).is_recoverable());
        assert!(MapError::MalformedGeometry("bad".into()).is_recoverable());
        assert!(!MapError::QueryError("boom".into()).is_recoverable());
        assert!(!MapError::OutputWriteError("disk full".into()).is_recoverable());
    }

    #[test]
    fn test_fatal_exit_codes_are_distinct() {
        let errors = [
            MapError::InvalidConfig(String::new()),
            MapError::ConnectionError(String::new()),
            MapError::QueryError(String::new()),
            MapError::ExtentComputationError(String::new()),
            MapError::OutputWriteError(String::new()),
            MapError::RenderError(String::new()),
        ];
        let mut codes: Vec<u8> = errors.iter().map(MapError::exit_code).collect();
        assert!(codes.iter().all(|&c| c != 0));
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_io_error_maps_to_output_write() {
        let err: MapError = std::io::Error::new(std::io::ErrorKind::Other, "no space").into();
        assert!(matches!(err, MapError::OutputWriteError(_)));
        assert_eq!(err.stage(), "output");
    }
}
