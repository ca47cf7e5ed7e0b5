// src/clean/routes.rs
use anyhow::Result;
use std::path::Path;
use std::time::Instant;
use tracing::{info, instrument};

use super::{ops, CleanSummary};
use crate::table::Table;

const SOURCE_COLUMN: &str = "Source airport";
const DESTINATION_COLUMN: &str = "Destination airport";

/// Carrier and equipment details the cleaned route table does not keep.
/// Absent columns are skipped, not errors.
const DROPPED_COLUMNS: &[&str] = &["Airline", "Airline ID", "Codeshare", "Stops", "Equipment"];

/// Clean a route reference dataset: drop rows whose source or destination
/// airport is the `\N` sentinel (when both columns exist), drop rows with a
/// duplicate (source, destination) pair, drop the carrier detail columns,
/// and save the result. A preview of the table is printed after each stage.
#[instrument(level = "info", skip(input, output, preview_rows), fields(input = %input.as_ref().display()))]
pub fn clean_routes<P: AsRef<Path>, Q: AsRef<Path>>(
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

    let table = match (table.column(SOURCE_COLUMN), table.column(DESTINATION_COLUMN)) {
        (Some(src), Some(dst)) => {
            let table = ops::drop_sentinel_rows(table, &[src, dst]);
            println!(
                "\nAfter removing rows with a '{}' or '{}' value of '{}':",
                SOURCE_COLUMN,
                DESTINATION_COLUMN,
                ops::SENTINEL
            );
            println!("{}", table.preview_head(preview_rows));
            table
        }
        _ => {
            info!(
                "columns {} and {} not both present; skipping sentinel filter",
                SOURCE_COLUMN, DESTINATION_COLUMN
            );
            println!(
                "\nRequired columns '{}' or '{}' not found in the dataset.",
                SOURCE_COLUMN, DESTINATION_COLUMN
            );
            table
        }
    };

    let table = ops::dedup_rows_by(table, &[SOURCE_COLUMN, DESTINATION_COLUMN])?;
    println!("\nAfter removing rows with duplicate source and destination pairs:");
    println!("{}", table.preview_head(preview_rows));

    let table = ops::drop_columns(table, DROPPED_COLUMNS);
    println!("\nAfter dropping carrier detail columns:");
    println!("{}", table.preview_head(preview_rows));

    table.save(output)?;
    println!("\nCleaned data saved to {}", output.display());

    let summary = CleanSummary {
        pipeline: "routes",
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
        "route clean complete"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::collections::HashSet;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,flightclean=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    fn write_temp(contents: &str) -> Result<NamedTempFile> {
        let mut tmp = NamedTempFile::new()?;
        tmp.write_all(contents.as_bytes())?;
        Ok(tmp)
    }

    #[test]
    fn test_sentinel_duplicate_and_carrier_columns_are_dropped() -> Result<()> {
        init_test_logging();
        let input = write_temp(
            "Source airport,Destination airport,Airline\n\
             JFK,LAX,AA\n\
             JFK,LAX,DL\n\
             \\N,SFO,UA\n",
        )?;
        let dir = tempdir()?;
        let out_path = dir.path().join("cleaned.csv");

        let summary = clean_routes(input.path(), &out_path, 5)?;
        assert_eq!(summary.rows_read, 3);
        assert_eq!(summary.rows_written, 1);

        let cleaned = Table::load(&out_path)?;
        assert_eq!(cleaned.headers, vec!["Source airport", "Destination airport"]);
        assert_eq!(cleaned.rows, vec![vec!["JFK", "LAX"]]);
        Ok(())
    }

    #[test]
    fn test_no_duplicate_pairs_and_first_occurrence_kept() -> Result<()> {
        init_test_logging();
        let input = write_temp(
            "Airline,Source airport,Destination airport,Stops\n\
             AA,JFK,LAX,0\n\
             DL,SEA,JFK,0\n\
             UA,JFK,LAX,1\n\
             AS,SEA,LAX,0\n\
             BA,SEA,JFK,2\n",
        )?;
        let dir = tempdir()?;
        let out_path = dir.path().join("cleaned.csv");

        clean_routes(input.path(), &out_path, 5)?;
        let cleaned = Table::load(&out_path)?;

        let mut pairs = HashSet::new();
        for row in &cleaned.rows {
            assert!(pairs.insert(row.clone()), "duplicate pair {row:?}");
        }
        // first occurrences, in input order
        assert_eq!(
            cleaned.rows,
            vec![
                vec!["JFK", "LAX"],
                vec!["SEA", "JFK"],
                vec!["SEA", "LAX"],
            ]
        );
        Ok(())
    }

    #[test]
    fn test_dropped_columns_never_reach_the_output_header() -> Result<()> {
        init_test_logging();
        let input = write_temp(
            "Airline,Airline ID,Source airport,Destination airport,Codeshare,Stops,Equipment\n\
             AA,24,JFK,LAX,,0,737\n",
        )?;
        let dir = tempdir()?;
        let out_path = dir.path().join("cleaned.csv");

        clean_routes(input.path(), &out_path, 5)?;
        let cleaned = Table::load(&out_path)?;
        for dropped in DROPPED_COLUMNS {
            assert!(!cleaned.has_column(dropped), "column {dropped} survived");
        }
        assert_eq!(cleaned.headers, vec!["Source airport", "Destination airport"]);
        Ok(())
    }

    #[test]
    fn test_missing_key_columns_fail_the_run() -> Result<()> {
        init_test_logging();
        // sentinel filter skips quietly, but the dedup key is required
        let input = write_temp("Origin,Target\nJFK,LAX\n")?;
        let dir = tempdir()?;
        let out_path = dir.path().join("cleaned.csv");

        let err = clean_routes(input.path(), &out_path, 5).unwrap_err();
        assert!(err.to_string().contains("Source airport"));
        Ok(())
    }
}
