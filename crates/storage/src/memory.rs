//! In-memory query executor.
//!
//! Serves a fixed result set through the same cursor protocol the PostgreSQL
//! session speaks, answers other queries from canned responses, and can be
//! told to fail specific statements. Every statement is recorded.

use std::collections::HashMap;

use async_trait::async_trait;

use map_common::{MapError, MapResult};

use crate::executor::{QueryExecutor, RawRow};

#[derive(Debug, Clone)]
struct Failure {
    needle: String,
    skip: usize,
    message: String,
}

/// Executor backed by a `Vec` of rows.
#[derive(Debug, Default)]
pub struct MemoryExecutor {
    rows: Vec<RawRow>,
    responses: Vec<(String, Vec<RawRow>)>,
    failures: Vec<Failure>,
    cursors: HashMap<String, usize>,
    in_transaction: bool,
    aborted: bool,
    log: Vec<String>,
}

impl MemoryExecutor {
    /// Executor whose cursors return `rows`.
    pub fn new(rows: Vec<RawRow>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    /// Build from `(geometry, stroke width)` pairs.
    pub fn from_records<I, S>(records: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let rows = records
            .into_iter()
            .map(|(geometry, width)| RawRow::new(vec![Some(geometry.into()), Some(width.to_string())]))
            .collect();
        Self::new(rows)
    }

    /// Answer any query containing `needle` with `rows`.
    pub fn with_response(mut self, needle: impl Into<String>, rows: Vec<RawRow>) -> Self {
        self.responses.push((needle.into(), rows));
        self
    }

    /// Answer any query containing `needle` with a single one-column row.
    pub fn with_scalar(self, needle: impl Into<String>, value: Option<&str>) -> Self {
        self.with_response(needle, vec![RawRow::new(vec![value.map(str::to_string)])])
    }

    /// Fail the first statement containing `needle`.
    pub fn fail_on(self, needle: impl Into<String>) -> Self {
        self.fail_on_nth(needle, 0)
    }

    /// Let `skip` matching statements succeed, then fail the next one.
    pub fn fail_on_nth(mut self, needle: impl Into<String>, skip: usize) -> Self {
        let needle = needle.into();
        self.failures.push(Failure {
            message: format!("injected failure on '{}'", needle),
            needle,
            skip,
        });
        self
    }

    /// Every statement received, in order.
    pub fn statements(&self) -> &[String] {
        &self.log
    }

    pub fn in_transaction(&self) -> bool {
        self.in_transaction
    }

    pub fn open_cursors(&self) -> usize {
        self.cursors.len()
    }

    fn check_failure(&mut self, sql: &str) -> MapResult<()> {
        let position = self.failures.iter().position(|f| sql.contains(&f.needle));
        if let Some(idx) = position {
            if self.failures[idx].skip > 0 {
                self.failures[idx].skip -= 1;
                return Ok(());
            }
            let failure = self.failures.remove(idx);
            if self.in_transaction {
                self.aborted = true;
            }
            return Err(MapError::QueryError(failure.message));
        }
        Ok(())
    }

    fn check_aborted(&self, sql: &str) -> MapResult<()> {
        if self.aborted && !is_keyword(sql, "ROLLBACK") {
            return Err(MapError::QueryError(
                "current transaction is aborted, commands ignored until end of transaction block"
                    .to_string(),
            ));
        }
        Ok(())
    }

    fn fetch(&mut self, sql: &str) -> MapResult<Vec<RawRow>> {
        // FETCH FORWARD <n> FROM <name>
        let words: Vec<&str> = sql.split_whitespace().collect();
        let (count, name) = match words.as_slice() {
            [_, forward, n, from, name] if forward.eq_ignore_ascii_case("FORWARD") && from.eq_ignore_ascii_case("FROM") => {
                let n: usize = n
                    .parse()
                    .map_err(|_| MapError::QueryError(format!("syntax error in '{}'", sql)))?;
                (n, *name)
            }
            _ => return Err(MapError::QueryError(format!("unsupported fetch '{}'", sql))),
        };

        let position = self
            .cursors
            .get_mut(name)
            .ok_or_else(|| MapError::QueryError(format!("cursor \"{}\" does not exist", name)))?;

        let start = (*position).min(self.rows.len());
        let end = (start + count).min(self.rows.len());
        *position = end;
        Ok(self.rows[start..end].to_vec())
    }
}

#[async_trait]
impl QueryExecutor for MemoryExecutor {
    async fn execute(&mut self, sql: &str) -> MapResult<()> {
        self.log.push(sql.to_string());
        self.check_aborted(sql)?;
        self.check_failure(sql)?;

        if is_keyword(sql, "BEGIN") {
            if self.in_transaction {
                return Err(MapError::QueryError("already in a transaction".to_string()));
            }
            self.in_transaction = true;
        } else if is_keyword(sql, "COMMIT") || is_keyword(sql, "END") {
            self.in_transaction = false;
            self.cursors.clear();
        } else if is_keyword(sql, "ROLLBACK") {
            self.in_transaction = false;
            self.aborted = false;
            self.cursors.clear();
        } else if is_keyword(sql, "DECLARE") {
            if !self.in_transaction {
                return Err(MapError::QueryError(
                    "DECLARE CURSOR can only be used in transaction blocks".to_string(),
                ));
            }
            let name = sql
                .split_whitespace()
                .nth(1)
                .ok_or_else(|| MapError::QueryError(format!("syntax error in '{}'", sql)))?;
            self.cursors.insert(name.to_string(), 0);
        } else if is_keyword(sql, "CLOSE") {
            let name = sql.split_whitespace().nth(1).unwrap_or_default();
            if self.cursors.remove(name).is_none() {
                return Err(MapError::QueryError(format!("cursor \"{}\" does not exist", name)));
            }
        }

        Ok(())
    }

    async fn query(&mut self, sql: &str) -> MapResult<Vec<RawRow>> {
        self.log.push(sql.to_string());
        self.check_aborted(sql)?;
        self.check_failure(sql)?;

        if is_keyword(sql, "FETCH") {
            return self.fetch(sql);
        }

        self.responses
            .iter()
            .find(|(needle, _)| sql.contains(needle.as_str()))
            .map(|(_, rows)| rows.clone())
            .ok_or_else(|| MapError::QueryError(format!("no response configured for '{}'", sql)))
    }
}

fn is_keyword(sql: &str, keyword: &str) -> bool {
    sql.split_whitespace()
        .next()
        .map(|w| w.eq_ignore_ascii_case(keyword))
        .unwrap_or(false)
}
