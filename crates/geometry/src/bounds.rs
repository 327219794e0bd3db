//! Bounding boxes of geometry text.

use geo::BoundingRect;
use map_common::Extents;

use crate::decode::parse;
use crate::error::DecodeError;

/// Bounding box of any WKT geometry, or of a PostGIS `BOX(x y,x y)` literal.
///
/// The result is not validated; degenerate boxes (a single point, an axis
/// aligned line) come back with zero width or height.
pub fn bounding_box(text: &str) -> Result<Extents, DecodeError> {
    let trimmed = text.trim();
    if let Some(extents) = parse_box_literal(trimmed)? {
        return Ok(extents);
    }

    let geometry = parse(trimmed)?;
    let rect = geometry.bounding_rect().ok_or(DecodeError::Empty)?;

    Ok(Extents::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y))
}

/// Parse a user-supplied region: `minx,miny,maxx,maxy`, a `BOX(...)` literal
/// or any WKT geometry.
pub fn parse_region(text: &str) -> Result<Extents, DecodeError> {
    let trimmed = text.trim();
    let looks_numeric = trimmed
        .chars()
        .next()
        .map(|c| c.is_ascii_digit() || c == '-' || c == '+' || c == '.')
        .unwrap_or(false);

    if looks_numeric {
        return Extents::from_bbox_string(trimmed).map_err(|e| DecodeError::Malformed(e.to_string()));
    }

    bounding_box(trimmed)
}

/// `BOX(minx miny,maxx maxy)` as printed for PostGIS box2d values.
fn parse_box_literal(text: &str) -> Result<Option<Extents>, DecodeError> {
    let upper = text.to_ascii_uppercase();
    if !upper.starts_with("BOX(") {
        return Ok(None);
    }

    let inner = text[4..]
        .strip_suffix(')')
        .ok_or_else(|| DecodeError::Malformed(format!("unterminated box: {}", text)))?;

    let coords: Vec<f64> = inner
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .map_err(|_| DecodeError::Malformed(format!("invalid number in box: {}", s)))
        })
        .collect::<Result<_, _>>()?;

    if coords.len() != 4 {
        return Err(DecodeError::Malformed(format!(
            "box needs 4 coordinates, got {}",
            coords.len()
        )));
    }

    Ok(Some(Extents::new(coords[0], coords[1], coords[2], coords[3])))
}
