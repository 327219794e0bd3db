//! Tests for the affine geographic-to-pixel projector.

use map_common::{Extents, GeoPoint, OutputFormat, RenderConfig};
use projection::{project, PixelPoint, Projector};

// ============================================================================
// Corner mapping
// ============================================================================

#[test]
fn test_corners_with_scale() {
    let extents = Extents::new(-129.0, 23.0, -62.0, 51.0);
    let config = RenderConfig::new(5000, &extents, 2.0, OutputFormat::Png, 1000).unwrap();
    let projector = Projector::from_config(extents, &config).unwrap();

    let min = projector.project(GeoPoint::new(-129.0, 23.0));
    assert!(min.x.abs() < 1e-9);
    assert!(min.y.abs() < 1e-9);

    let max = projector.project(GeoPoint::new(-62.0, 51.0));
    assert!((max.x - 5000.0 * 2.0).abs() < 1e-6);
    assert!((max.y - config.image_height() as f64 * 2.0).abs() < 1e-6);
}

#[test]
fn test_y_axis_not_inverted() {
    let extents = Extents::new(0.0, 0.0, 10.0, 10.0);
    let projector = Projector::new(extents, 1000, 1000, 1.0).unwrap();

    // Northward points get larger pixel y
    let south = projector.project(GeoPoint::new(5.0, 1.0));
    let north = projector.project(GeoPoint::new(5.0, 9.0));
    assert!(north.y > south.y);
}

#[test]
fn test_x_offset_sign() {
    let extents = Extents::new(0.0, 0.0, 10.0, 10.0);
    let projector = Projector::new(extents, 1000, 1000, 1.0).unwrap();

    // (min_x - x) * -1 is positive east of min_x and negative west of it
    assert_eq!(projector.project(GeoPoint::new(2.5, 0.0)).x, 250.0);
    assert_eq!(projector.project(GeoPoint::new(-2.5, 0.0)).x, -250.0);
}

// ============================================================================
// Purity and ordering
// ============================================================================

#[test]
fn test_projection_is_idempotent() {
    let extents = Extents::new(-74.3, 40.4, -73.6, 41.0);
    let projector = Projector::new(extents, 5000, 4286, 1.0).unwrap();
    let point = GeoPoint::new(-73.97, 40.78);

    let first = projector.project(point);
    for _ in 0..100 {
        assert_eq!(projector.project(point), first);
    }

    let free = project(
        point,
        &extents,
        projector.width_ratio(),
        projector.height_ratio(),
        projector.scale(),
    );
    assert_eq!(free, first);
}

#[test]
fn test_project_all_preserves_order_and_count() {
    let extents = Extents::new(0.0, 0.0, 10.0, 10.0);
    let projector = Projector::new(extents, 100, 100, 1.0).unwrap();
    let points: Vec<GeoPoint> = (0..=10).map(|i| GeoPoint::new(i as f64, (10 - i) as f64)).collect();

    let pixels = projector.project_all(&points);

    assert_eq!(pixels.len(), points.len());
    for (i, pixel) in pixels.iter().enumerate() {
        assert_eq!(*pixel, PixelPoint::new(i as f64 * 10.0, (10 - i) as f64 * 10.0));
    }
}

#[test]
fn test_end_to_end_diagonal() {
    // extents (0,0)-(10,10), width 1000, scale 1.0, line [(0,0),(10,10)]
    let extents = Extents::new(0.0, 0.0, 10.0, 10.0);
    let config = RenderConfig::new(1000, &extents, 1.0, OutputFormat::Png, 1000).unwrap();
    assert_eq!(config.image_height(), 1000);

    let projector = Projector::from_config(extents, &config).unwrap();
    let pixels = projector.project_all(&[GeoPoint::new(0.0, 0.0), GeoPoint::new(10.0, 10.0)]);

    assert_eq!(pixels[0], PixelPoint::new(0.0, 0.0));
    assert_eq!(pixels[1], PixelPoint::new(1000.0, 1000.0));
}
