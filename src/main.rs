use anyhow::Result;
use clap::Parser;
use flightclean::{
    clean::{airports::clean_airports, routes::clean_routes},
    history::{CleanRun, History},
};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "flightclean")]
#[command(about = "Clean the airport and route reference datasets")]
struct Args {
    /// Airport dataset input path
    #[arg(long, default_value = "data/airports.csv")]
    airports: PathBuf,

    /// Route dataset input path
    #[arg(long, default_value = "data/routes.csv")]
    routes: PathBuf,

    /// Cleaned airport dataset output path
    #[arg(long, default_value = "cleaned_dataset.csv")]
    airports_out: PathBuf,

    /// Cleaned route dataset output path
    #[arg(long, default_value = "cleaned_second_file.csv")]
    routes_out: PathBuf,

    /// Directory for run history records
    #[arg(long, default_value = "history")]
    history_dir: PathBuf,

    /// Rows to show in each stage preview
    #[arg(long, default_value_t = 5)]
    preview_rows: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    // ─── 2) history store ────────────────────────────────────────────
    let history = History::new(&args.history_dir)?;

    // ─── 3) clean airports ───────────────────────────────────────────
    // A failed pipeline is reported and the other still runs.
    match clean_airports(&args.airports, &args.airports_out, args.preview_rows) {
        Ok(summary) => {
            if let Err(e) = history.record_run(&CleanRun::from_summary(&summary)) {
                error!("failed to record airport run: {:#}", e);
            }
        }
        Err(e) => error!("airport cleaning failed: {:#}", e),
    }

    // ─── 4) clean routes ─────────────────────────────────────────────
    match clean_routes(&args.routes, &args.routes_out, args.preview_rows) {
        Ok(summary) => {
            if let Err(e) = history.record_run(&CleanRun::from_summary(&summary)) {
                error!("failed to record route run: {:#}", e);
            }
        }
        Err(e) => error!("route cleaning failed: {:#}", e),
    }

    info!("all done");
    Ok(())
}
