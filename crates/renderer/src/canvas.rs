//! Canvas sinks for rendered paths.

use std::path::{Path, PathBuf};

use map_common::{MapError, MapResult, OutputFormat, RenderConfig};
use projection::PixelPoint;

use crate::raster::RasterCanvas;
use crate::style::LineStyle;
use crate::vector::VectorCanvas;

/// A drawing surface that is created once, receives paths, and is finished
/// exactly once.
///
/// Pixel points use a bottom-left origin with y growing upwards; each
/// backend maps that onto its native orientation.
pub trait Canvas {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Stroke an open path. Returns `Ok(false)` when there was nothing to
    /// draw (fewer than two points).
    fn draw_path(&mut self, points: &[PixelPoint], stroke_width: f64) -> MapResult<bool>;

    /// Encode the image and write it to its output path.
    fn finish(self) -> MapResult<PathBuf>
    where
        Self: Sized;
}

/// Narrow a stroke width to the canvases' f32 geometry.
///
/// The width and its glow stroke must stay finite and positive in f32.
pub(crate) fn checked_width(style: &LineStyle, stroke_width: f64) -> MapResult<f32> {
    let width = stroke_width as f32;
    let widest = width + 2.0 * style.glow_radius(width);
    if !width.is_finite() || width <= 0.0 || !widest.is_finite() {
        return Err(MapError::MalformedGeometry(format!(
            "stroke width {} is outside the drawable range",
            stroke_width
        )));
    }
    Ok(width)
}

/// The canvas selected by the output format.
pub enum OutputCanvas {
    Raster(RasterCanvas),
    Vector(VectorCanvas),
}

impl OutputCanvas {
    /// Create and initialize the canvas for `config`, filled with the
    /// background color.
    pub fn create(config: &RenderConfig, style: LineStyle, output: &Path) -> MapResult<Self> {
        let (width, height) = (config.image_width(), config.image_height());
        match config.format() {
            OutputFormat::Png => Ok(OutputCanvas::Raster(RasterCanvas::new(width, height, style, output)?)),
            OutputFormat::Svg => Ok(OutputCanvas::Vector(VectorCanvas::new(width, height, style, output)?)),
        }
    }
}

impl Canvas for OutputCanvas {
    fn width(&self) -> u32 {
        match self {
            OutputCanvas::Raster(c) => c.width(),
            OutputCanvas::Vector(c) => c.width(),
        }
    }

    fn height(&self) -> u32 {
        match self {
            OutputCanvas::Raster(c) => c.height(),
            OutputCanvas::Vector(c) => c.height(),
        }
    }

    fn draw_path(&mut self, points: &[PixelPoint], stroke_width: f64) -> MapResult<bool> {
        match self {
            OutputCanvas::Raster(c) => c.draw_path(points, stroke_width),
            OutputCanvas::Vector(c) => c.draw_path(points, stroke_width),
        }
    }

    fn finish(self) -> MapResult<PathBuf> {
        match self {
            OutputCanvas::Raster(c) => c.finish(),
            OutputCanvas::Vector(c) => c.finish(),
        }
    }
}
