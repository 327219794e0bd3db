//! WKT geometry decoding for the render pipeline.
//!
//! Rows carry their geometry as WKT (or PostGIS EWKT) text. This crate turns
//! that text into vertex sequences and bounding boxes:
//! - [`decode_line_string`] for per-row geometries
//! - [`bounding_box`] and [`parse_region`] for extents

pub mod bounds;
pub mod decode;
pub mod error;

pub use bounds::{bounding_box, parse_region};
pub use decode::{decode_line_string, parse};
pub use error::DecodeError;
