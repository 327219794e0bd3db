//! Line string decoding.

use std::str::FromStr;

use geo::Geometry;
use map_common::GeoPoint;
use wkt::Wkt;

use crate::error::DecodeError;

/// Parse WKT or EWKT text into a geometry.
///
/// An EWKT `SRID=...;` prefix is accepted and ignored.
pub fn parse(text: &str) -> Result<Geometry<f64>, DecodeError> {
    let text = strip_srid(text.trim());
    if text.is_empty() {
        return Err(DecodeError::Malformed("empty geometry text".to_string()));
    }

    let wkt: Wkt<f64> = Wkt::from_str(text).map_err(|e| DecodeError::Malformed(e.to_string()))?;
    Geometry::try_from(wkt).map_err(|e| DecodeError::Malformed(e.to_string()))
}

/// Decode a line string's vertices in their original order.
///
/// Only `LINESTRING` is accepted; every other type is reported as
/// [`DecodeError::UnsupportedType`]. Z and M ordinates are dropped.
pub fn decode_line_string(text: &str) -> Result<Vec<GeoPoint>, DecodeError> {
    match parse(text)? {
        Geometry::LineString(line) => {
            if line.0.is_empty() {
                return Err(DecodeError::Empty);
            }
            Ok(line.0.iter().map(|c| GeoPoint::new(c.x, c.y)).collect())
        }
        other => Err(DecodeError::UnsupportedType(type_name(&other))),
    }
}

/// WKT type name of a geometry.
pub fn type_name(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}

fn strip_srid(text: &str) -> &str {
    let upper = text.get(..5).map(str::to_ascii_uppercase);
    if upper.as_deref() == Some("SRID=") {
        if let Some(idx) = text.find(';') {
            return text[idx + 1..].trim_start();
        }
    }
    text
}
