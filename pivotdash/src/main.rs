use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use pivotdash::config::Settings;
use pivotdash::App;

#[derive(Parser, Debug)]
#[command(name = "pivotdash")]
#[command(about = "Terminal pivot dashboard for pre-computed category/period payloads")]
struct Args {
    /// Payload JSON file to open
    #[arg(short, long)]
    payload: Option<PathBuf>,

    /// Config file (default: pivotdash.toml in the config dir or working dir)
    #[arg(short, long, env = "PIVOTDASH_CONFIG")]
    config: Option<PathBuf>,

    /// Directory for CSV exports
    #[arg(short, long)]
    export_dir: Option<PathBuf>,

    /// Initial row cap for the matrix (0 shows every row)
    #[arg(long)]
    max_rows: Option<usize>,

    /// Initial column cap for the matrix (0 shows every column)
    #[arg(long)]
    max_cols: Option<usize>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings =
        Settings::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(payload) = args.payload {
        settings.payload_path = Some(payload);
    }
    if let Some(export_dir) = args.export_dir {
        settings.export_dir = export_dir;
    }
    if let Some(max_rows) = args.max_rows {
        settings.max_rows = max_rows;
    }
    if let Some(max_cols) = args.max_cols {
        settings.max_cols = max_cols;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }
    settings.validate()?;

    // Logging is initialized in App::run() with buffer support
    App::new(settings).run().await?;

    Ok(())
}
