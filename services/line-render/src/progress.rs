//! Coarse progress milestones.

/// Row counter that yields a percentage at each new 10% step.
///
/// Milestones never regress or repeat and cap at 100.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressState {
    rows_processed: u64,
    total_rows: u64,
    last_emitted: u32,
}

impl ProgressState {
    pub fn new(total_rows: u64) -> Self {
        Self {
            rows_processed: 0,
            total_rows,
            last_emitted: 0,
        }
    }

    pub fn rows_processed(&self) -> u64 {
        self.rows_processed
    }

    pub fn total_rows(&self) -> u64 {
        self.total_rows
    }

    /// Add a batch of processed rows. Returns the milestone reached, if it is
    /// new.
    pub fn advance(&mut self, rows: u64) -> Option<u32> {
        self.rows_processed = self.rows_processed.saturating_add(rows);
        self.report(self.rows_processed)
    }

    /// Report the cumulative row count.
    pub fn report(&mut self, rows_processed: u64) -> Option<u32> {
        self.rows_processed = rows_processed;
        self.emit(milestone(rows_processed, self.total_rows))
    }

    /// Mark the stream exhausted, reaching 100 if it was not yet reported.
    pub fn complete(&mut self) -> Option<u32> {
        self.emit(100)
    }

    fn emit(&mut self, percent: u32) -> Option<u32> {
        if percent > self.last_emitted {
            self.last_emitted = percent;
            Some(percent)
        } else {
            None
        }
    }
}

/// Nearest 10% step of `rows / total`, capped at 100.
fn milestone(rows: u64, total: u64) -> u32 {
    if total == 0 {
        return 100;
    }
    let tenths = (rows as f64 / total as f64 * 10.0).round();
    ((tenths * 10.0) as u32).min(100)
}
