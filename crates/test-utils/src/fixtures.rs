//! Common test fixtures for line-render tests.

use std::path::PathBuf;

use crate::generators::{box_polygon_wkt, line_string_wkt};

/// Common extents as `(min_x, min_y, max_x, max_y)`.
pub mod extents {
    /// Continental United States, as used for national stream maps
    pub const CONUS: (f64, f64, f64, f64) = (-129.0, 23.0, -62.0, 51.0);

    /// Square 10x10 box at the origin
    pub const UNIT_10: (f64, f64, f64, f64) = (0.0, 0.0, 10.0, 10.0);

    /// Single point (degenerate)
    pub const POINT: (f64, f64, f64, f64) = (5.0, 5.0, 5.0, 5.0);
}

/// The single diagonal row of the end-to-end scenario:
/// `[(0,0),(10,10)]` with stroke width 2.0.
pub fn diagonal_row() -> (String, f64) {
    (line_string_wkt(&[(0.0, 0.0), (10.0, 10.0)]), 2.0)
}

/// Ten rows inside [`extents::UNIT_10`]: row 3 is a polygon, the other nine
/// are two-vertex line strings.
pub fn mixed_rows() -> Vec<(String, f64)> {
    (0..10)
        .map(|i| {
            if i == 3 {
                (box_polygon_wkt(1.0, 1.0, 2.0, 2.0), 1.0)
            } else {
                let y = i as f64 + 0.5;
                (line_string_wkt(&[(0.0, y), (10.0, y)]), 1.0)
            }
        })
        .collect()
}

/// A temporary directory plus a path inside it named `render.<ext>`.
///
/// Keep the returned `TempDir` alive for as long as the path is used.
pub fn temp_output(ext: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join(format!("render.{}", ext));
    (dir, path)
}
