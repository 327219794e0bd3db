//! Data source access for the line renderer.
//!
//! Provides:
//! - A text-oriented [`QueryExecutor`] seam with PostgreSQL and in-memory implementations
//! - Server-side cursor streaming in bounded batches
//! - Extent and row-count queries over an arbitrary base query

pub mod cursor;
pub mod executor;
pub mod extents;
pub mod memory;
pub mod postgres;
pub mod record;
pub mod sql;

pub use cursor::{CursorStats, CursorStream, DEFAULT_CURSOR_NAME};
pub use executor::{QueryExecutor, RawRow};
pub use extents::{count_rows, resolve_extents};
pub use memory::MemoryExecutor;
pub use postgres::{PgExecutor, RetryPolicy};
pub use record::{GeometryRecord, DEFAULT_STROKE_WIDTH};
