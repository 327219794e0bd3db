//! The render pipeline: extents, canvas, cursor loop, finish.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use map_common::{MapError, MapResult, RenderConfig};
use projection::Projector;
use renderer::{Canvas, LineStyle, OutputCanvas};
use storage::{count_rows, resolve_extents, CursorStream, GeometryRecord, PgExecutor, QueryExecutor, RawRow};

use crate::config::{ProgressMode, RenderJob};
use crate::progress::ProgressState;

/// Counters for one completed run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderSummary {
    pub rows_fetched: u64,
    pub batches: u64,
    pub rendered: u64,
    pub skipped_unsupported: u64,
    pub skipped_malformed: u64,
    /// Line strings with fewer than two vertices
    pub degenerate: u64,
    pub image_width: u32,
    pub image_height: u32,
    /// Progress milestones in the order they were reported
    pub milestones: Vec<u32>,
    pub output: PathBuf,
}

impl RenderSummary {
    pub fn skipped(&self) -> u64 {
        self.skipped_unsupported + self.skipped_malformed
    }

    fn record_skip(&mut self, error: &MapError) {
        match error {
            MapError::UnsupportedGeometryType(_) => self.skipped_unsupported += 1,
            _ => self.skipped_malformed += 1,
        }
    }
}

/// Runs one render job against an executor.
///
/// The driver owns no connection; the caller opens and closes it. The cursor
/// transaction is committed on success and rolled back on every failure
/// after it was opened.
pub struct Driver<'a, E: QueryExecutor + ?Sized> {
    executor: &'a mut E,
    job: &'a RenderJob,
    style: LineStyle,
}

impl<'a, E: QueryExecutor + ?Sized> Driver<'a, E> {
    pub fn new(executor: &'a mut E, job: &'a RenderJob) -> Self {
        Self {
            executor,
            job,
            style: LineStyle::default(),
        }
    }

    pub fn with_style(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }

    /// Render to the canvas selected by the job's output format.
    pub async fn run(self) -> MapResult<RenderSummary> {
        self.run_with(OutputCanvas::create).await
    }

    /// Render to a canvas built by `make_canvas` once the image size is known.
    pub async fn run_with<C, F>(self, make_canvas: F) -> MapResult<RenderSummary>
    where
        C: Canvas,
        F: FnOnce(&RenderConfig, LineStyle, &Path) -> MapResult<C>,
    {
        let Driver { executor, job, style } = self;

        let extents = resolve_extents(job.extents.as_deref(), &mut *executor, &job.query).await?;
        info!(extents = %extents, "Extents resolved");

        let config = RenderConfig::new(job.image_width, &extents, job.scale, job.format, job.batch_size)?;
        info!(
            width = config.image_width(),
            height = config.image_height(),
            format = %config.format(),
            "Image size"
        );

        let projector = Projector::from_config(extents, &config)?;
        debug!(
            width_ratio = projector.width_ratio(),
            height_ratio = projector.height_ratio(),
            scale = projector.scale(),
            "Projection ratios"
        );

        let mut canvas = make_canvas(&config, style, &job.output)?;

        let mut progress = match job.progress {
            ProgressMode::Off => None,
            ProgressMode::Known(total) => Some(ProgressState::new(total)),
            ProgressMode::Count => {
                info!("Counting rows");
                let total = count_rows(&mut *executor, &job.query).await?;
                info!(total_rows = total, "Row count");
                Some(ProgressState::new(total))
            }
        };

        let mut summary = RenderSummary {
            image_width: config.image_width(),
            image_height: config.image_height(),
            ..RenderSummary::default()
        };

        info!(batch_size = config.batch_size(), "Rendering");
        let mut cursor = CursorStream::open(&mut *executor, &job.query, config.batch_size()).await?;

        loop {
            let batch = match cursor.fetch_next().await {
                Ok(Some(batch)) => batch,
                Ok(None) => break,
                Err(e) => {
                    release(cursor).await;
                    return Err(e);
                }
            };

            let rows = batch.len() as u64;
            for (i, row) in batch.into_iter().enumerate() {
                match render_row(&mut canvas, &projector, row) {
                    Ok(true) => summary.rendered += 1,
                    Ok(false) => summary.degenerate += 1,
                    Err(e) if e.is_recoverable() => {
                        warn!(row = summary.rows_fetched + i as u64, error = %e, "Skipping row");
                        summary.record_skip(&e);
                    }
                    Err(e) => {
                        release(cursor).await;
                        return Err(e);
                    }
                }
            }

            summary.rows_fetched += rows;
            summary.batches += 1;

            if let Some(percent) = progress.as_mut().and_then(|p| p.advance(rows)) {
                info!(percent, rows = summary.rows_fetched, "{}%", percent);
                summary.milestones.push(percent);
            }
        }

        let stats = cursor.close().await?;
        debug!(batches = stats.batches, rows = stats.rows, "Cursor exhausted");

        if let Some(percent) = progress.as_mut().and_then(ProgressState::complete) {
            info!(percent, rows = summary.rows_fetched, "{}%", percent);
            summary.milestones.push(percent);
        }

        summary.output = canvas.finish()?;

        info!(
            rows = summary.rows_fetched,
            batches = summary.batches,
            rendered = summary.rendered,
            skipped_unsupported = summary.skipped_unsupported,
            skipped_malformed = summary.skipped_malformed,
            degenerate = summary.degenerate,
            output = %summary.output.display(),
            "Render complete"
        );

        Ok(summary)
    }
}

/// Decode, project and draw one row. `Ok(false)` means the path was too
/// short to draw.
fn render_row<C: Canvas>(canvas: &mut C, projector: &Projector, row: RawRow) -> MapResult<bool> {
    let record = GeometryRecord::from_row(row)?;
    let points = geometry::decode_line_string(&record.geometry)?;
    let pixels = projector.project_all(&points);
    canvas.draw_path(&pixels, record.stroke_width)
}

async fn release<E: QueryExecutor + ?Sized>(cursor: CursorStream<'_, E>) {
    if let Err(e) = cursor.abort().await {
        warn!(error = %e, "Failed to roll back cursor transaction");
    }
}

/// Connect, render and disconnect.
pub async fn run_job(job: &RenderJob) -> MapResult<RenderSummary> {
    let mut executor = PgExecutor::connect_with_retry(&job.dsn, &job.retry).await?;

    let result = Driver::new(&mut executor, job).run().await;

    if let Err(e) = executor.close().await {
        warn!(error = %e, "Failed to close database connection");
    }

    result
}
