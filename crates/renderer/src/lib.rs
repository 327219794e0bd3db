//! Line rendering onto raster and vector canvases.
//!
//! Pixel coordinates reach the canvases with a bottom-left origin. PNG output
//! goes through a tiny-skia pixmap and a streaming encoder; SVG output is
//! written path by path.

pub mod canvas;
pub mod png;
pub mod raster;
pub mod style;
pub mod vector;

pub use canvas::{Canvas, OutputCanvas};
pub use raster::RasterCanvas;
pub use style::LineStyle;
pub use vector::VectorCanvas;
