//! line-render
//!
//! Renders the line geometries returned by a PostGIS query into a PNG or SVG
//! image, streaming rows through a server-side cursor.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use line_render::{run_job, Args, LogFormat, RenderJob};

fn main() -> ExitCode {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    if let Err(e) = init_tracing(&args) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    let job = match RenderJob::from_args(&args) {
        Ok(job) => job,
        Err(e) => {
            error!(stage = e.stage(), error = %e, "Invalid options");
            return ExitCode::from(e.exit_code());
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "Failed to create Tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(output = %job.output.display(), format = %job.format, "Starting line-render");

    match runtime.block_on(run_job(&job)) {
        Ok(summary) => {
            if args.summary_json {
                match serde_json::to_string_pretty(&summary) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        error!(error = %e, "Failed to serialize summary");
                        return ExitCode::FAILURE;
                    }
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(stage = e.stage(), error = %e, "Render failed");
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(args: &Args) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&args.log_level))?;

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    let installed = match args.log_format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
    installed.map_err(|e| anyhow::anyhow!("{}", e))
}
