// src/bin/clean_routes.rs
use anyhow::Result;
use clap::Parser;
use flightclean::clean::routes::clean_routes;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "clean-routes")]
#[command(about = "Clean a route reference dataset")]
struct Args {
    /// Input CSV path
    #[arg(default_value = "data/routes.csv")]
    input: PathBuf,

    /// Output CSV path
    #[arg(short, long, default_value = "cleaned_second_file.csv")]
    output: PathBuf,

    /// Rows to show in each stage preview
    #[arg(long, default_value_t = 5)]
    preview_rows: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .init();

    let summary = clean_routes(&args.input, &args.output, args.preview_rows)?;
    info!(
        rows_read = summary.rows_read,
        rows_written = summary.rows_written,
        "done"
    );
    Ok(())
}
