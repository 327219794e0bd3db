//! Common types shared by the line-render crates.

pub mod config;
pub mod error;
pub mod extents;
pub mod point;

pub use config::{OutputFormat, RenderConfig, DEFAULT_BATCH_SIZE, DEFAULT_IMAGE_WIDTH, DEFAULT_SCALE};
pub use error::{MapError, MapResult};
pub use extents::{Extents, ExtentsParseError};
pub use point::GeoPoint;
