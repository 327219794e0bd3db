//! Command-line options and the validated render job.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use map_common::{
    MapError, MapResult, OutputFormat, DEFAULT_BATCH_SIZE, DEFAULT_IMAGE_WIDTH, DEFAULT_SCALE,
};
use storage::RetryPolicy;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "line-render")]
#[command(about = "Render line geometries from a PostGIS query to a PNG or SVG image")]
pub struct Args {
    /// PostgreSQL connection string (postgres:// URL or key=value pairs)
    #[arg(long = "pg", env = "DATABASE_URL")]
    pub pg: String,

    /// Query returning a line geometry column and an optional stroke width column
    #[arg(long, env = "LINE_RENDER_QUERY")]
    pub query: String,

    /// Output file; the extension (.png or .svg) selects the format
    #[arg(short = 'f', long = "output")]
    pub output: PathBuf,

    /// Region to render: WKT geometry or "minx,miny,maxx,maxy" (default: extent of the data)
    #[arg(long, allow_hyphen_values = true)]
    pub extents: Option<String>,

    /// Image width in pixels; the height follows the aspect ratio of the extents
    #[arg(long, default_value_t = DEFAULT_IMAGE_WIDTH)]
    pub width: u32,

    /// Uniform multiplier applied to projected coordinates
    #[arg(long, default_value_t = DEFAULT_SCALE, allow_negative_numbers = true)]
    pub scale: f64,

    /// Log progress milestones every 10%
    #[arg(long)]
    pub progress: bool,

    /// Expected number of rows (implies --progress; 0 or absent runs the count query)
    #[arg(long)]
    pub total_rows: Option<u64>,

    /// Rows fetched per cursor batch
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: u32,

    /// Connection attempts to retry before giving up
    #[arg(long, default_value_t = 3)]
    pub connect_retries: u32,

    /// Log level
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    pub summary_json: bool,
}

/// How the driver learns the total row count for progress reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    Off,
    /// Count the rows with an extra query before streaming
    Count,
    Known(u64),
}

/// Everything a render run needs, validated before any connection is made.
#[derive(Debug, Clone)]
pub struct RenderJob {
    pub dsn: String,
    pub query: String,
    pub output: PathBuf,
    pub format: OutputFormat,
    pub extents: Option<String>,
    pub image_width: u32,
    pub scale: f64,
    pub batch_size: u32,
    pub progress: ProgressMode,
    pub retry: RetryPolicy,
}

impl RenderJob {
    pub fn from_args(args: &Args) -> MapResult<Self> {
        let query = storage::sql::normalize_query(&args.query);
        if query.is_empty() {
            return Err(MapError::InvalidConfig("query must not be empty".to_string()));
        }
        if args.pg.trim().is_empty() {
            return Err(MapError::InvalidConfig(
                "connection string must not be empty".to_string(),
            ));
        }
        if args.width == 0 {
            return Err(MapError::InvalidConfig("width must be greater than zero".to_string()));
        }
        if !args.scale.is_finite() || args.scale <= 0.0 {
            return Err(MapError::InvalidConfig(format!(
                "scale must be a positive number, got {}",
                args.scale
            )));
        }
        if args.batch_size == 0 {
            return Err(MapError::InvalidConfig(
                "batch size must be greater than zero".to_string(),
            ));
        }

        let format = OutputFormat::from_path(&args.output)?;

        let progress = match (args.total_rows, args.progress) {
            (Some(total), _) if total > 0 => ProgressMode::Known(total),
            (Some(_), _) | (None, true) => ProgressMode::Count,
            (None, false) => ProgressMode::Off,
        };

        let extents = args
            .extents
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(Self {
            dsn: args.pg.clone(),
            query: query.to_string(),
            output: args.output.clone(),
            format,
            extents,
            image_width: args.width,
            scale: args.scale,
            batch_size: args.batch_size,
            progress,
            retry: RetryPolicy {
                max_retries: args.connect_retries,
                ..RetryPolicy::default()
            },
        })
    }
}
