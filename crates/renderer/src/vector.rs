//! SVG canvas.
//!
//! Paths are streamed to `<output>.partial` as they are drawn and the file is
//! renamed into place on finish, so the output path only ever holds a
//! complete document. An unfinished side file is removed on drop.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use map_common::{MapError, MapResult};
use projection::PixelPoint;

use crate::canvas::{checked_width, Canvas};
use crate::style::{svg_rgb, LineStyle};

pub struct VectorCanvas {
    writer: Option<BufWriter<File>>,
    partial: PathBuf,
    output: PathBuf,
    width: u32,
    height: u32,
    style: LineStyle,
    /// Glow filter ids already emitted, keyed by the blur's bit pattern
    filters: HashMap<u32, String>,
    finished: bool,
}

impl VectorCanvas {
    pub fn new(width: u32, height: u32, style: LineStyle, output: &Path) -> MapResult<Self> {
        if width == 0 || height == 0 {
            return Err(MapError::RenderError(format!(
                "cannot create a {}x{} vector canvas",
                width, height
            )));
        }

        let partial = partial_path(output);
        let file = File::create(&partial).map_err(|e| {
            MapError::OutputWriteError(format!("creating {}: {}", partial.display(), e))
        })?;

        let mut canvas = Self {
            writer: Some(BufWriter::new(file)),
            partial,
            output: output.to_path_buf(),
            width,
            height,
            style,
            filters: HashMap::new(),
            finished: false,
        };

        let header = format!(
            concat!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
                "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
                "<rect width=\"{w}\" height=\"{h}\" fill=\"{bg}\"/>\n",
                "<g transform=\"matrix(1 0 0 -1 0 {h})\" fill=\"none\" stroke-linecap=\"round\" stroke-linejoin=\"round\">\n"
            ),
            w = width,
            h = height,
            bg = svg_rgb(style.background),
        );
        canvas.write(&header)?;

        debug!(width, height, path = %canvas.partial.display(), "Vector canvas initialized");
        Ok(canvas)
    }

    fn write(&mut self, text: &str) -> MapResult<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| MapError::RenderError("vector canvas already finished".to_string()))?;
        writer.write_all(text.as_bytes()).map_err(|e| {
            MapError::OutputWriteError(format!("writing {}: {}", self.partial.display(), e))
        })
    }

    /// Filter id for a blur, emitting its definition on first use.
    fn glow_filter(&mut self, blur: f32) -> MapResult<String> {
        let key = blur.to_bits();
        if let Some(id) = self.filters.get(&key) {
            return Ok(id.clone());
        }

        let id = format!("glow-{}", self.filters.len());
        let def = format!(
            "<defs><filter id=\"{id}\" filterUnits=\"userSpaceOnUse\" x=\"0\" y=\"0\" width=\"{w}\" height=\"{h}\"><feGaussianBlur stdDeviation=\"{sd}\"/></filter></defs>\n",
            id = id,
            w = self.width,
            h = self.height,
            sd = blur,
        );
        self.write(&def)?;
        self.filters.insert(key, id.clone());
        Ok(id)
    }
}

fn partial_path(output: &Path) -> PathBuf {
    let mut name = output.as_os_str().to_os_string();
    name.push(".partial");
    PathBuf::from(name)
}

fn path_data(points: &[PixelPoint]) -> String {
    let mut d = String::with_capacity(points.len() * 16);
    for (i, p) in points.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{}{:.2} {:.2}", cmd, p.x, p.y);
    }
    d
}

impl Canvas for VectorCanvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn draw_path(&mut self, points: &[PixelPoint], stroke_width: f64) -> MapResult<bool> {
        if points.len() < 2 {
            return Ok(false);
        }
        if points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Ok(false);
        }

        let width = checked_width(&self.style, stroke_width)?;
        let d = path_data(points);
        let mut element = String::new();

        let blur = self.style.glow_radius(width) / 2.0;
        if self.style.glow_passes > 0 && blur > 0.0 {
            let filter = self.glow_filter(blur)?;
            let opacity = (self.style.glow_opacity * self.style.glow_passes as f32).min(1.0);
            let _ = writeln!(
                element,
                "<path d=\"{}\" stroke=\"{}\" stroke-opacity=\"{:.3}\" stroke-width=\"{}\" filter=\"url(#{})\" style=\"mix-blend-mode:screen\"/>",
                d,
                svg_rgb(self.style.glow),
                opacity,
                width * 2.0,
                filter
            );
        }

        let _ = writeln!(
            element,
            "<path d=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
            d,
            svg_rgb(self.style.stroke),
            width
        );

        self.write(&element)?;
        Ok(true)
    }

    fn finish(mut self) -> MapResult<PathBuf> {
        self.write("</g>\n</svg>\n")?;

        let mut writer = self
            .writer
            .take()
            .ok_or_else(|| MapError::RenderError("vector canvas already finished".to_string()))?;
        writer.flush().map_err(|e| {
            MapError::OutputWriteError(format!("writing {}: {}", self.partial.display(), e))
        })?;
        drop(writer);

        fs::rename(&self.partial, &self.output).map_err(|e| {
            MapError::OutputWriteError(format!(
                "moving {} to {}: {}",
                self.partial.display(),
                self.output.display(),
                e
            ))
        })?;
        self.finished = true;

        info!(path = %self.output.display(), width = self.width, height = self.height, "SVG written");
        Ok(self.output.clone())
    }
}

impl Drop for VectorCanvas {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        self.writer.take();
        if let Err(e) = fs::remove_file(&self.partial) {
            warn!(path = %self.partial.display(), error = %e, "Failed to remove partial output");
        }
    }
}
