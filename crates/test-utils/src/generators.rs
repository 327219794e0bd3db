//! Generators for synthetic geometry text.
//!
//! Everything here is deterministic so tests can assert exact counts and
//! coordinates.

/// Format a WKT `LINESTRING` from vertices.
///
/// # Example
///
/// ```
/// use test_utils::line_string_wkt;
///
/// assert_eq!(line_string_wkt(&[(0.0, 0.0), (10.0, 10.0)]), "LINESTRING(0 0,10 10)");
/// ```
pub fn line_string_wkt(points: &[(f64, f64)]) -> String {
    format!("LINESTRING({})", join_coords(points))
}

/// Format a WKT `POLYGON` with a single ring. The ring is closed if needed.
pub fn polygon_wkt(ring: &[(f64, f64)]) -> String {
    let mut ring = ring.to_vec();
    if let (Some(first), Some(last)) = (ring.first().copied(), ring.last().copied()) {
        if first != last {
            ring.push(first);
        }
    }
    format!("POLYGON(({}))", join_coords(&ring))
}

/// Axis-aligned rectangle as a WKT polygon.
pub fn box_polygon_wkt(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> String {
    polygon_wkt(&[
        (min_x, min_y),
        (min_x, max_y),
        (max_x, max_y),
        (max_x, min_y),
    ])
}

/// A zig-zag line with `vertices` points, starting at `origin` and moving
/// `step` along x each vertex while alternating y by `step`.
pub fn zigzag_line_wkt(vertices: usize, origin: (f64, f64), step: f64) -> String {
    let points: Vec<(f64, f64)> = (0..vertices)
        .map(|i| {
            let dy = if i % 2 == 0 { 0.0 } else { step };
            (origin.0 + i as f64 * step, origin.1 + dy)
        })
        .collect();
    line_string_wkt(&points)
}

/// `count` horizontal lines spread evenly over the given extents.
///
/// Line `i` runs from `min_x` to `max_x` at
/// `y = min_y + (i + 1) * height / (count + 1)`.
pub fn horizontal_lines_wkt(count: usize, extents: (f64, f64, f64, f64)) -> Vec<String> {
    let (min_x, min_y, max_x, max_y) = extents;
    let spacing = (max_y - min_y) / (count as f64 + 1.0);
    (0..count)
        .map(|i| {
            let y = min_y + (i as f64 + 1.0) * spacing;
            line_string_wkt(&[(min_x, y), (max_x, y)])
        })
        .collect()
}

fn join_coords(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{} {}", x, y))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_is_closed() {
        assert_eq!(
            polygon_wkt(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)]),
            "POLYGON((0 0,0 1,1 1,0 0))"
        );
    }

    #[test]
    fn test_zigzag_vertex_count() {
        let wkt = zigzag_line_wkt(5, (0.0, 0.0), 1.0);
        assert_eq!(wkt, "LINESTRING(0 0,1 1,2 0,3 1,4 0)");
    }

    #[test]
    fn test_horizontal_lines() {
        let lines = horizontal_lines_wkt(3, (0.0, 0.0, 10.0, 8.0));
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "LINESTRING(0 2,10 2)");
        assert_eq!(lines[2], "LINESTRING(0 6,10 6)");
    }
}
