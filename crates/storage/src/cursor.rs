//! Server-side cursor streaming.
//!
//! The cursor lives inside a transaction opened by [`CursorStream::open`].
//! Rows are pulled with `FETCH FORWARD n` until an empty batch comes back.

use tracing::{debug, info, warn};

use map_common::{MapError, MapResult};

use crate::executor::{QueryExecutor, RawRow};
use crate::sql;

/// Cursor name used when the caller does not pick one.
pub const DEFAULT_CURSOR_NAME: &str = "line_render_cursor";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CursorState {
    Open,
    Exhausted,
    /// A statement failed; the transaction is unusable and must be rolled back.
    Failed,
}

/// Counters reported when the cursor is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorStats {
    /// Non-empty batches returned
    pub batches: u64,
    /// Rows returned across all batches
    pub rows: u64,
}

/// Forward-only, non-restartable batch reader over a declared cursor.
///
/// Release with [`close`](Self::close) (commit) or [`abort`](Self::abort)
/// (rollback). If the stream is dropped without either, the transaction stays
/// open until the session ends, which rolls it back server-side.
pub struct CursorStream<'a, E: QueryExecutor + ?Sized> {
    executor: &'a mut E,
    name: String,
    batch_size: u32,
    state: CursorState,
    stats: CursorStats,
}

impl<'a, E: QueryExecutor + ?Sized> CursorStream<'a, E> {
    /// Begin a transaction and declare a cursor for `query`.
    pub async fn open(executor: &'a mut E, query: &str, batch_size: u32) -> MapResult<Self> {
        Self::open_named(executor, DEFAULT_CURSOR_NAME, query, batch_size).await
    }

    pub async fn open_named(
        executor: &'a mut E,
        name: &str,
        query: &str,
        batch_size: u32,
    ) -> MapResult<Self> {
        if batch_size == 0 {
            return Err(MapError::InvalidConfig(
                "cursor batch size must be greater than zero".to_string(),
            ));
        }

        executor
            .execute(sql::BEGIN)
            .await
            .map_err(|e| MapError::QueryError(format!("starting transaction: {}", e)))?;

        if let Err(e) = executor.execute(&sql::declare_cursor(name, query)).await {
            if let Err(rollback) = executor.execute(sql::ROLLBACK).await {
                warn!(error = %rollback, "Rollback after failed cursor declaration failed");
            }
            return Err(MapError::QueryError(format!("declaring cursor: {}", e)));
        }

        info!(cursor = name, batch_size, "Cursor declared");

        Ok(Self {
            executor,
            name: name.to_string(),
            batch_size,
            state: CursorState::Open,
            stats: CursorStats::default(),
        })
    }

    /// Fetch the next batch, or `None` once the cursor is exhausted.
    ///
    /// After exhaustion this keeps returning `None` without touching the
    /// data source. After a failure it returns an error.
    pub async fn fetch_next(&mut self) -> MapResult<Option<Vec<RawRow>>> {
        match self.state {
            CursorState::Exhausted => return Ok(None),
            CursorState::Failed => {
                return Err(MapError::QueryError(format!(
                    "cursor {} is unusable after an earlier failure",
                    self.name
                )))
            }
            CursorState::Open => {}
        }

        let statement = sql::fetch_forward(&self.name, self.batch_size);
        let rows = match self.executor.query(&statement).await {
            Ok(rows) => rows,
            Err(e) => {
                self.state = CursorState::Failed;
                return Err(MapError::QueryError(format!("fetching from cursor: {}", e)));
            }
        };

        if rows.is_empty() {
            debug!(cursor = %self.name, batches = self.stats.batches, rows = self.stats.rows, "Cursor exhausted");
            self.state = CursorState::Exhausted;
            return Ok(None);
        }

        self.stats.batches += 1;
        self.stats.rows += rows.len() as u64;
        debug!(cursor = %self.name, batch = self.stats.batches, rows = rows.len(), "Fetched batch");

        Ok(Some(rows))
    }

    pub fn is_exhausted(&self) -> bool {
        self.state == CursorState::Exhausted
    }

    pub fn batch_size(&self) -> u32 {
        self.batch_size
    }

    pub fn stats(&self) -> CursorStats {
        self.stats
    }

    /// Close the cursor and commit. Falls back to rollback if an earlier
    /// statement failed.
    pub async fn close(self) -> MapResult<CursorStats> {
        if self.state == CursorState::Failed {
            let stats = self.stats;
            self.abort().await?;
            return Ok(stats);
        }

        let close = self.executor.execute(&sql::close_cursor(&self.name)).await;
        if let Err(e) = close {
            if let Err(rollback) = self.executor.execute(sql::ROLLBACK).await {
                warn!(error = %rollback, "Rollback after failed cursor close failed");
            }
            return Err(MapError::QueryError(format!("closing cursor: {}", e)));
        }

        self.executor
            .execute(sql::COMMIT)
            .await
            .map_err(|e| MapError::QueryError(format!("ending transaction: {}", e)))?;

        debug!(cursor = %self.name, "Cursor closed");
        Ok(self.stats)
    }

    /// Roll back the transaction, discarding the cursor.
    pub async fn abort(self) -> MapResult<()> {
        self.executor
            .execute(sql::ROLLBACK)
            .await
            .map_err(|e| MapError::QueryError(format!("rolling back transaction: {}", e)))?;
        debug!(cursor = %self.name, "Cursor rolled back");
        Ok(())
    }
}
