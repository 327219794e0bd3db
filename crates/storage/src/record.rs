//! Typed view of a fetched row.

use map_common::{MapError, MapResult};

use crate::executor::RawRow;

/// Stroke width used when the query returns only a geometry column.
pub const DEFAULT_STROKE_WIDTH: f64 = 1.0;

/// One renderable row: geometry text plus its stroke width.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryRecord {
    pub geometry: String,
    pub stroke_width: f64,
}

impl GeometryRecord {
    /// Read column 0 as geometry text and column 1 as stroke width.
    ///
    /// A missing or `NULL` width column falls back to
    /// [`DEFAULT_STROKE_WIDTH`]. Widths are passed through unclamped, but must
    /// be finite and positive.
    pub fn from_row(row: RawRow) -> MapResult<Self> {
        let mut columns = row.into_columns().into_iter();

        let geometry = columns
            .next()
            .flatten()
            .ok_or_else(|| MapError::MalformedGeometry("geometry column is NULL".to_string()))?;

        let stroke_width = match columns.next().flatten() {
            None => DEFAULT_STROKE_WIDTH,
            Some(text) => parse_stroke_width(&text)?,
        };

        Ok(Self {
            geometry,
            stroke_width,
        })
    }
}

fn parse_stroke_width(text: &str) -> MapResult<f64> {
    let width: f64 = text
        .trim()
        .parse()
        .map_err(|_| MapError::MalformedGeometry(format!("stroke width '{}' is not a number", text)))?;

    // Canvases stroke in f32
    let narrowed = width as f32;
    if !width.is_finite() || width <= 0.0 || !narrowed.is_finite() || narrowed <= 0.0 {
        return Err(MapError::MalformedGeometry(format!(
            "stroke width {} must be a positive number",
            width
        )));
    }

    Ok(width)
}
