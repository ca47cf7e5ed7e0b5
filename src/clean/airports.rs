// src/clean/airports.rs
use anyhow::Result;
use std::path::Path;
use std::time::Instant;
use tracing::{info, instrument};

use super::{ops, CleanSummary};
use crate::table::Table;

/// Column the airports dataset marks with `\N` when an airport has no IATA
/// assignment. Optional: inputs without it skip the sentinel filter.
const IATA_COLUMN: &str = "IATA";

/// Clean an airport reference dataset: drop rows with missing cells, drop
/// rows whose IATA code is the `\N` sentinel (when the column exists), drop
/// exact-duplicate rows, and save the result. A preview of the table is
/// printed after each stage.
#[instrument(level = "info", skip(input, output, preview_rows), fields(input = %input.as_ref().display()))]
pub fn clean_airports<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    preview_rows: usize,
) -> Result<CleanSummary> {
    let input = input.as_ref();
    let output = output.as_ref();
    let start = Instant::now();

    let table = Table::load(input)?;
    let rows_read = table.row_count();
    println!("Original data:");
    println!("{}", table.preview_head(preview_rows));

    let table = ops::drop_missing_rows(table);
    println!("\nAfter removing rows with missing values:");
    println!("{}", table.preview_head(preview_rows));

    let table = match table.column(IATA_COLUMN) {
        Some(idx) => {
            let table = ops::drop_sentinel_rows(table, &[idx]);
            println!("\nAfter removing rows with a '{}' value of '{}':", IATA_COLUMN, ops::SENTINEL);
            println!("{}", table.preview_tail(preview_rows));
            table
        }
        None => {
            info!("column {} not present; skipping sentinel filter", IATA_COLUMN);
            println!("\nColumn '{}' not found in the dataset.", IATA_COLUMN);
            table
        }
    };

    let table = ops::dedup_rows(table);
    println!("\nAfter removing duplicates:");
    println!("{}", table.preview_head(preview_rows));

    table.save(output)?;
    println!("\nCleaned data saved to {}", output.display());

    let summary = CleanSummary {
        pipeline: "airports",
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        rows_read,
        rows_written: table.row_count(),
        elapsed: start.elapsed(),
    };
    info!(
        rows_read = summary.rows_read,
        rows_written = summary.rows_written,
        elapsed = ?summary.elapsed,
        "airport clean complete"
    );
    Ok(summary)
}
