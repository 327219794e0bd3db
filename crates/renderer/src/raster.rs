//! Raster canvas backed by a tiny-skia pixmap.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tiny_skia::{BlendMode, Color, LineCap, LineJoin, Paint, Path as SkPath, PathBuilder, Pixmap, Stroke, Transform};
use tracing::{debug, info};

use map_common::{MapError, MapResult};
use projection::PixelPoint;

use crate::canvas::{checked_width, Canvas};
use crate::png;
use crate::style::LineStyle;

/// Anti-aliased RGBA canvas encoded to PNG on finish.
///
/// The pixel buffer is row-major premultiplied RGBA, top row first. Paths
/// are drawn through a vertical flip so y grows upwards.
pub struct RasterCanvas {
    pixmap: Pixmap,
    style: LineStyle,
    output: PathBuf,
    transform: Transform,
}

impl RasterCanvas {
    pub fn new(width: u32, height: u32, style: LineStyle, output: &Path) -> MapResult<Self> {
        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
            MapError::RenderError(format!("cannot allocate a {}x{} raster canvas", width, height))
        })?;

        let [r, g, b, a] = style.background;
        pixmap.fill(Color::from_rgba8(r, g, b, a));

        debug!(width, height, "Raster canvas initialized");

        Ok(Self {
            pixmap,
            style,
            output: output.to_path_buf(),
            transform: Transform::from_row(1.0, 0.0, 0.0, -1.0, 0.0, height as f32),
        })
    }

    /// Straight RGBA of the pixel at image column `x`, row `y` (top-left origin).
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let p = self.pixmap.pixel(x, y)?.demultiply();
        Some([p.red(), p.green(), p.blue(), p.alpha()])
    }

    fn stroke(&mut self, path: &SkPath, color: [u8; 4], width: f32, blend_mode: BlendMode) {
        let mut paint = Paint::default();
        paint.set_color_rgba8(color[0], color[1], color[2], color[3]);
        paint.anti_alias = true;
        paint.blend_mode = blend_mode;

        let stroke = Stroke {
            width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };

        self.pixmap.stroke_path(path, &paint, &stroke, self.transform, None);
    }
}

fn build_path(points: &[PixelPoint]) -> Option<SkPath> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x as f32, first.y as f32);
    for point in rest {
        pb.line_to(point.x as f32, point.y as f32);
    }
    pb.finish()
}

impl Canvas for RasterCanvas {
    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn draw_path(&mut self, points: &[PixelPoint], stroke_width: f64) -> MapResult<bool> {
        if points.len() < 2 {
            return Ok(false);
        }
        let Some(path) = build_path(points) else {
            return Ok(false);
        };

        let width = checked_width(&self.style, stroke_width)?;

        // Glow passes add light so overlapping lines brighten each other
        let glow = self.style.glow;
        let glow_color = [glow[0], glow[1], glow[2], self.style.glow_alpha()];
        if glow_color[3] > 0 {
            for glow_width in self.style.glow_widths(width) {
                self.stroke(&path, glow_color, glow_width, BlendMode::Plus);
            }
        }

        let core = self.style.stroke;
        self.stroke(&path, core, width, BlendMode::SourceOver);

        Ok(true)
    }

    fn finish(self) -> MapResult<PathBuf> {
        let (width, height) = (self.pixmap.width(), self.pixmap.height());

        // Demultiply in place so the encoder reads the pixmap's own buffer
        let mut pixmap = self.pixmap;
        demultiply(pixmap.data_mut());

        let file = File::create(&self.output).map_err(|e| {
            MapError::OutputWriteError(format!("creating {}: {}", self.output.display(), e))
        })?;
        let mut writer = BufWriter::new(file);

        png::write_png(&mut writer, pixmap.data(), width, height)
            .and_then(|_| writer.flush())
            .map_err(|e| MapError::OutputWriteError(format!("writing {}: {}", self.output.display(), e)))?;

        info!(path = %self.output.display(), width, height, "PNG written");
        Ok(self.output)
    }
}

/// Convert premultiplied RGBA bytes to straight alpha.
fn demultiply(data: &mut [u8]) {
    for px in data.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demultiply() {
        let mut data = [64, 32, 0, 128, 255, 255, 255, 255, 0, 0, 0, 0];
        demultiply(&mut data);
        assert_eq!(data, [128, 64, 0, 128, 255, 255, 255, 255, 0, 0, 0, 0]);
    }
}
