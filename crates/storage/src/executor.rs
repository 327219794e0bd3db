//! Query executor abstraction.

use async_trait::async_trait;

use map_common::MapResult;

/// One fetched row with every column rendered as text.
///
/// `None` is SQL `NULL`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRow {
    columns: Vec<Option<String>>,
}

impl RawRow {
    pub fn new(columns: Vec<Option<String>>) -> Self {
        Self { columns }
    }

    /// Column text, or `None` for `NULL` and out-of-range indices.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.columns.get(index).and_then(|c| c.as_deref())
    }

    /// Whether the column exists at all (even if `NULL`).
    pub fn has_column(&self, index: usize) -> bool {
        index < self.columns.len()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn into_columns(self) -> Vec<Option<String>> {
        self.columns
    }
}

impl From<Vec<Option<String>>> for RawRow {
    fn from(columns: Vec<Option<String>>) -> Self {
        Self::new(columns)
    }
}

/// Executes SQL text against a data source.
///
/// Failures are reported as `MapError::QueryError`. Implementations keep a
/// single session so transaction and cursor state persists between calls.
#[async_trait]
pub trait QueryExecutor: Send {
    /// Run a statement that returns no rows (`BEGIN`, `DECLARE`, `CLOSE`, ...).
    async fn execute(&mut self, sql: &str) -> MapResult<()>;

    /// Run a statement and return its rows as text.
    async fn query(&mut self, sql: &str) -> MapResult<Vec<RawRow>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_row_access() {
        let row = RawRow::new(vec![Some("LINESTRING(0 0,1 1)".into()), None]);
        assert_eq!(row.len(), 2);
        assert_eq!(row.get(0), Some("LINESTRING(0 0,1 1)"));
        assert_eq!(row.get(1), None);
        assert!(row.has_column(1));
        assert!(!row.has_column(2));
        assert_eq!(row.get(5), None);
    }
}
