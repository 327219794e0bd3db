//! Tests for WKT decoding and bounding boxes.

use geometry::{bounding_box, decode_line_string, parse_region, DecodeError};
use map_common::{Extents, GeoPoint, MapError};
use test_utils::{box_polygon_wkt, extents, line_string_wkt, zigzag_line_wkt};

// ============================================================================
// Line strings
// ============================================================================

#[test]
fn test_vertex_order_and_count_preserved() {
    let wkt = zigzag_line_wkt(50, (-74.0, 40.0), 0.01);
    let points = decode_line_string(&wkt).unwrap();

    assert_eq!(points.len(), 50);
    for (i, p) in points.iter().enumerate() {
        assert!((p.x - (-74.0 + i as f64 * 0.01)).abs() < 1e-9);
    }
    assert!(points[1].y > points[0].y);
    assert!(points[2].y < points[1].y);
}

#[test]
fn test_single_vertex_line_decodes() {
    // Degenerate, but still a line string: the renderer decides to skip it
    let points = decode_line_string("LINESTRING(1 2)").unwrap();
    assert_eq!(points, vec![GeoPoint::new(1.0, 2.0)]);
}

#[test]
fn test_z_ordinates_dropped() {
    let points = decode_line_string("LINESTRING Z (0 0 5, 1 1 6)").unwrap();
    assert_eq!(points, vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0)]);
}

#[test]
fn test_empty_line_string() {
    assert_eq!(decode_line_string("LINESTRING EMPTY"), Err(DecodeError::Empty));
}

#[test]
fn test_other_types_unsupported() {
    let cases = [
        ("POINT(1 1)", "Point"),
        ("MULTILINESTRING((0 0,1 1),(2 2,3 3))", "MultiLineString"),
        ("GEOMETRYCOLLECTION(POINT(1 1))", "GeometryCollection"),
    ];
    for (wkt, kind) in cases {
        assert_eq!(decode_line_string(wkt), Err(DecodeError::UnsupportedType(kind)));
    }
    let polygon = box_polygon_wkt(0.0, 0.0, 1.0, 1.0);
    assert_eq!(
        decode_line_string(&polygon),
        Err(DecodeError::UnsupportedType("Polygon"))
    );
}

// ============================================================================
// Error mapping
// ============================================================================

#[test]
fn test_decode_errors_map_to_row_errors() {
    let unsupported: MapError = DecodeError::UnsupportedType("Polygon").into();
    assert!(matches!(unsupported, MapError::UnsupportedGeometryType(ref k) if k == "Polygon"));
    assert!(unsupported.is_recoverable());

    let malformed: MapError = decode_line_string("LINESTRING(").unwrap_err().into();
    assert!(matches!(malformed, MapError::MalformedGeometry(_)));
    assert!(malformed.is_recoverable());
}

// ============================================================================
// Bounding boxes
// ============================================================================

#[test]
fn test_line_string_bounds() {
    let wkt = line_string_wkt(&[(3.0, -1.0), (-2.0, 4.0), (7.0, 2.0)]);
    assert_eq!(bounding_box(&wkt).unwrap(), Extents::new(-2.0, -1.0, 7.0, 4.0));
}

#[test]
fn test_region_from_conus_polygon() {
    let (min_x, min_y, max_x, max_y) = extents::CONUS;
    let region = parse_region(&box_polygon_wkt(min_x, min_y, max_x, max_y)).unwrap();
    assert_eq!(region, Extents::new(min_x, min_y, max_x, max_y));
    assert!(region.validate().is_ok());
}

#[test]
fn test_degenerate_region_fails_validation() {
    let (x, y, _, _) = extents::POINT;
    let region = parse_region(&format!("POINT({} {})", x, y)).unwrap();
    assert!(matches!(
        region.validate(),
        Err(MapError::ExtentComputationError(_))
    ));
}
