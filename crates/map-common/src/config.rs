//! Render configuration derived once per run.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MapError, MapResult};
use crate::extents::Extents;

/// Default output image width in pixels.
pub const DEFAULT_IMAGE_WIDTH: u32 = 5000;

/// Default number of rows pulled per cursor fetch.
pub const DEFAULT_BATCH_SIZE: u32 = 1000;

/// Default uniform scale applied to projected coordinates.
pub const DEFAULT_SCALE: f64 = 1.0;

/// Output encoding, selected from the output file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// PNG raster.
    Png,
    /// SVG vector document.
    Svg,
}

impl OutputFormat {
    /// Pick the format from a file path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> MapResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("png") => Ok(OutputFormat::Png),
            Some("svg") => Ok(OutputFormat::Svg),
            _ => Err(MapError::InvalidConfig(format!(
                "unknown output format for {} - file should end in .png or .svg",
                path.display()
            ))),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Png => write!(f, "png"),
            OutputFormat::Svg => write!(f, "svg"),
        }
    }
}

/// Image geometry and fetch settings for one render run.
///
/// Built once the extents are known; immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderConfig {
    image_width: u32,
    image_height: u32,
    scale: f64,
    format: OutputFormat,
    batch_size: u32,
}

impl RenderConfig {
    /// Build a configuration, deriving the image height from the extents.
    pub fn new(
        image_width: u32,
        extents: &Extents,
        scale: f64,
        format: OutputFormat,
        batch_size: u32,
    ) -> MapResult<Self> {
        if image_width == 0 {
            return Err(MapError::InvalidConfig(
                "image width must be greater than zero".to_string(),
            ));
        }
        if !scale.is_finite() || scale <= 0.0 {
            return Err(MapError::InvalidConfig(format!(
                "scale must be a positive number, got {}",
                scale
            )));
        }
        if batch_size == 0 {
            return Err(MapError::InvalidConfig(
                "batch size must be greater than zero".to_string(),
            ));
        }

        let image_height = derive_image_height(image_width, extents)?;

        Ok(Self {
            image_width,
            image_height,
            scale,
            format,
            batch_size,
        })
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn batch_size(&self) -> u32 {
        self.batch_size
    }
}

/// Image height preserving the geographic aspect ratio:
/// `round(width / (extents.width / extents.height))`.
pub fn derive_image_height(image_width: u32, extents: &Extents) -> MapResult<u32> {
    let extents = extents.validate()?;
    let height = (image_width as f64 / extents.aspect_ratio()).round();

    if !(1.0..=u32::MAX as f64).contains(&height) {
        return Err(MapError::InvalidConfig(format!(
            "derived image height {} is out of range for width {} and extents {}",
            height, image_width, extents
        )));
    }

    Ok(height as u32)
}
