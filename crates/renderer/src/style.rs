//! Fixed line styling: light strokes with a soft glow over a dark background.

/// Colors and glow parameters applied to every path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Canvas fill color [R, G, B, A]
    pub background: [u8; 4],
    /// Core stroke color [R, G, B, A]
    pub stroke: [u8; 4],
    /// Glow color [R, G, B, A]
    pub glow: [u8; 4],
    /// Glow radius in pixels per unit of stroke width
    pub glow_radius_per_width: f32,
    /// Number of concentric glow strokes per path (0 disables the glow)
    pub glow_passes: u32,
    /// Opacity of each glow stroke, 0.0 - 1.0
    pub glow_opacity: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            background: [0, 0, 0, 255],
            stroke: [255, 255, 255, 255],
            glow: [255, 255, 255, 255],
            glow_radius_per_width: 30.0,
            glow_passes: 4,
            glow_opacity: 0.04,
        }
    }
}

impl LineStyle {
    /// Glow radius for a stroke of the given width.
    pub fn glow_radius(&self, stroke_width: f32) -> f32 {
        (self.glow_radius_per_width * stroke_width).max(0.0)
    }

    /// Widths of the glow strokes, widest first.
    ///
    /// Pass `k` of `n` extends `radius * k / n` beyond each side of the core
    /// stroke, so overlapping passes fall off linearly towards the edge.
    pub fn glow_widths(&self, stroke_width: f32) -> Vec<f32> {
        let radius = self.glow_radius(stroke_width);
        if self.glow_passes == 0 || radius <= 0.0 {
            return Vec::new();
        }
        let n = self.glow_passes as f32;
        (1..=self.glow_passes)
            .rev()
            .map(|k| stroke_width + 2.0 * radius * k as f32 / n)
            .collect()
    }

    /// Glow alpha as an 8-bit value.
    pub fn glow_alpha(&self) -> u8 {
        (self.glow_opacity.clamp(0.0, 1.0) * self.glow[3] as f32).round() as u8
    }
}

/// Format a color as an SVG `rgb()` value.
pub fn svg_rgb(color: [u8; 4]) -> String {
    format!("rgb({},{},{})", color[0], color[1], color[2])
}
