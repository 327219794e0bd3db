//! SQL text for the statements the pipeline issues.
//!
//! The base query comes from the user verbatim; it is only ever nested
//! inside a CTE or a cursor declaration.

/// Strip surrounding whitespace and trailing semicolons so the query can be
/// nested.
pub fn normalize_query(query: &str) -> &str {
    query.trim().trim_end_matches(|c: char| c == ';' || c.is_whitespace())
}

/// Aggregate extent of the first column of every row the query returns.
pub fn extent_query(query: &str) -> String {
    format!(
        "with src(geom) as ( {} ) select st_astext(st_extent(geom)) from src",
        normalize_query(query)
    )
}

/// Number of rows the query returns.
pub fn count_query(query: &str) -> String {
    format!(
        "with data as ( {} ) select count(*) from data",
        normalize_query(query)
    )
}

pub const BEGIN: &str = "BEGIN";
pub const COMMIT: &str = "COMMIT";
pub const ROLLBACK: &str = "ROLLBACK";

pub fn declare_cursor(name: &str, query: &str) -> String {
    format!(
        "DECLARE {} NO SCROLL CURSOR FOR {}",
        name,
        normalize_query(query)
    )
}

pub fn fetch_forward(name: &str, count: u32) -> String {
    format!("FETCH FORWARD {} FROM {}", count, name)
}

pub fn close_cursor(name: &str) -> String {
    format!("CLOSE {}", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query("  select 1 ;; \n"), "select 1");
        assert_eq!(normalize_query("select 1"), "select 1");
    }

    #[test]
    fn test_wrapped_queries() {
        let q = "select st_astext(shape), width from streams;";
        assert_eq!(
            extent_query(q),
            "with src(geom) as ( select st_astext(shape), width from streams ) \
             select st_astext(st_extent(geom)) from src"
        );
        assert_eq!(
            count_query(q),
            "with data as ( select st_astext(shape), width from streams ) select count(*) from data"
        );
        assert_eq!(
            declare_cursor("c1", q),
            "DECLARE c1 NO SCROLL CURSOR FOR select st_astext(shape), width from streams"
        );
        assert_eq!(fetch_forward("c1", 1000), "FETCH FORWARD 1000 FROM c1");
        assert_eq!(close_cursor("c1"), "CLOSE c1");
    }
}
