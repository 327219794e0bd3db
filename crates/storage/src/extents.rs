//! Extent and row-count queries.

use tracing::{debug, info};

use map_common::{Extents, MapError, MapResult};

use crate::executor::QueryExecutor;
use crate::sql;

/// Resolve the geographic extents of a render.
///
/// An explicit region is decoded locally without a database round-trip.
/// Otherwise the aggregate extent of the base query's first column is
/// requested. Zero-span results are rejected.
pub async fn resolve_extents<E: QueryExecutor + ?Sized>(
    explicit: Option<&str>,
    executor: &mut E,
    query: &str,
) -> MapResult<Extents> {
    let extents = match explicit {
        Some(region) => {
            debug!(region, "Using explicit extents");
            geometry::parse_region(region).map_err(|e| {
                MapError::ExtentComputationError(format!("invalid explicit extents: {}", e))
            })?
        }
        None => {
            info!("Generating the extents");
            let rows = executor
                .query(&sql::extent_query(query))
                .await
                .map_err(|e| MapError::ExtentComputationError(format!("extent query failed: {}", e)))?;

            let text = rows
                .first()
                .and_then(|row| row.get(0))
                .ok_or_else(|| {
                    MapError::ExtentComputationError(
                        "extent query returned no geometries".to_string(),
                    )
                })?;

            geometry::bounding_box(text).map_err(|e| {
                MapError::ExtentComputationError(format!("could not decode extent '{}': {}", text, e))
            })?
        }
    };

    extents.validate()
}

/// Count the rows the base query returns.
pub async fn count_rows<E: QueryExecutor + ?Sized>(executor: &mut E, query: &str) -> MapResult<u64> {
    let rows = executor.query(&sql::count_query(query)).await?;

    let text = rows
        .first()
        .and_then(|row| row.get(0))
        .ok_or_else(|| MapError::QueryError("count query returned no rows".to_string()))?;

    text.trim()
        .parse()
        .map_err(|_| MapError::QueryError(format!("count query returned '{}'", text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryExecutor;

    #[tokio::test]
    async fn test_explicit_extents_skip_database() {
        let mut exec = MemoryExecutor::default();
        let extents = resolve_extents(
            Some("POLYGON((-129 23,-129 51,-62 51,-62 23,-129 23))"),
            &mut exec,
            "select geom from streams",
        )
        .await
        .unwrap();

        assert_eq!(extents, Extents::new(-129.0, 23.0, -62.0, 51.0));
        assert!(exec.statements().is_empty());
    }

    #[tokio::test]
    async fn test_extents_from_query() {
        let mut exec = MemoryExecutor::default()
            .with_scalar("st_extent", Some("POLYGON((0 0,0 5,10 5,10 0,0 0))"));
        let extents = resolve_extents(None, &mut exec, "select geom, 1 from lines;")
            .await
            .unwrap();

        assert_eq!(extents, Extents::new(0.0, 0.0, 10.0, 5.0));
        assert_eq!(exec.statements().len(), 1);
        assert!(exec.statements()[0].starts_with("with src(geom) as ( select geom, 1 from lines )"));
    }

    #[tokio::test]
    async fn test_empty_dataset_fails() {
        let mut exec = MemoryExecutor::default().with_scalar("st_extent", None);
        let err = resolve_extents(None, &mut exec, "select geom from lines").await.unwrap_err();
        assert!(matches!(err, MapError::ExtentComputationError(_)));
    }

    #[tokio::test]
    async fn test_single_point_dataset_fails() {
        let mut exec = MemoryExecutor::default().with_scalar("st_extent", Some("POINT(3 3)"));
        let err = resolve_extents(None, &mut exec, "select geom from lines").await.unwrap_err();
        assert!(matches!(err, MapError::ExtentComputationError(_)));
    }

    #[tokio::test]
    async fn test_query_failure_is_extent_error() {
        let mut exec = MemoryExecutor::default().fail_on("st_extent");
        let err = resolve_extents(None, &mut exec, "select geom from lines").await.unwrap_err();
        assert!(matches!(err, MapError::ExtentComputationError(_)));
    }

    #[tokio::test]
    async fn test_count_rows() {
        let mut exec = MemoryExecutor::default().with_scalar("count(*)", Some("12345"));
        assert_eq!(count_rows(&mut exec, "select 1").await.unwrap(), 12345);

        let mut bad = MemoryExecutor::default().with_scalar("count(*)", Some("many"));
        assert!(matches!(
            count_rows(&mut bad, "select 1").await,
            Err(MapError::QueryError(_))
        ));
    }
}
