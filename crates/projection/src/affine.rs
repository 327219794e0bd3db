//! Affine projector from geographic coordinates to pixels.

use serde::Serialize;

use map_common::{Extents, GeoPoint, MapResult, RenderConfig};

/// A point in image space (pixels, before any canvas orientation is applied).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Map one geographic point into image space.
///
/// The X offset is taken as `(min_x - x) * -1` and the Y axis is not
/// inverted; canvases that want north-up output flip Y themselves.
#[inline]
pub fn project(
    point: GeoPoint,
    extents: &Extents,
    width_ratio: f64,
    height_ratio: f64,
    scale: f64,
) -> PixelPoint {
    PixelPoint {
        x: (extents.min_x - point.x) * -1.0 * width_ratio * scale,
        y: (point.y - extents.min_y) * height_ratio * scale,
    }
}

/// Projector with the per-axis ratios resolved once for a whole run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    extents: Extents,
    width_ratio: f64,
    height_ratio: f64,
    scale: f64,
}

impl Projector {
    /// Resolve ratios for an image of `image_width` x `image_height` pixels.
    pub fn new(extents: Extents, image_width: u32, image_height: u32, scale: f64) -> MapResult<Self> {
        let extents = extents.validate()?;

        Ok(Self {
            extents,
            width_ratio: image_width as f64 / extents.width(),
            height_ratio: image_height as f64 / extents.height(),
            scale,
        })
    }

    /// Build from a render configuration.
    pub fn from_config(extents: Extents, config: &RenderConfig) -> MapResult<Self> {
        Self::new(
            extents,
            config.image_width(),
            config.image_height(),
            config.scale(),
        )
    }

    pub fn width_ratio(&self) -> f64 {
        self.width_ratio
    }

    pub fn height_ratio(&self) -> f64 {
        self.height_ratio
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[inline]
    pub fn project(&self, point: GeoPoint) -> PixelPoint {
        project(
            point,
            &self.extents,
            self.width_ratio,
            self.height_ratio,
            self.scale,
        )
    }

    /// Project a vertex sequence, keeping vertex order.
    pub fn project_all(&self, points: &[GeoPoint]) -> Vec<PixelPoint> {
        points.iter().map(|&p| self.project(p)).collect()
    }
}
