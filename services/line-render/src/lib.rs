//! Streaming line renderer.
//!
//! Resolves the extents of a PostGIS query, streams its rows through a
//! server-side cursor and draws every line string onto a PNG or SVG canvas.

pub mod config;
pub mod pipeline;
pub mod progress;

pub use config::{Args, LogFormat, ProgressMode, RenderJob};
pub use pipeline::{run_job, Driver, RenderSummary};
pub use progress::ProgressState;
