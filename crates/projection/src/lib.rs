//! Geographic to image-space coordinate mapping.
//!
//! The mapping is affine: each vertex is offset from the extents' minimum
//! corner and multiplied by the image-to-geography ratio of its axis.

pub mod affine;

pub use affine::{project, PixelPoint, Projector};
