// src/history/mod.rs
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::clean::CleanSummary;

const RUNS_FILE: &str = "runs.jsonl";

/// One recorded cleaning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanRun {
    pub pipeline: String,
    pub input: String,
    pub output: String,
    pub rows_read: usize,
    pub rows_written: usize,
    pub elapsed_ms: u64,
    pub finished_at: DateTime<Utc>,
}

impl CleanRun {
    pub fn from_summary(summary: &CleanSummary) -> Self {
        CleanRun {
            pipeline: summary.pipeline.to_string(),
            input: summary.input.display().to_string(),
            output: summary.output.display().to_string(),
            rows_read: summary.rows_read,
            rows_written: summary.rows_written,
            elapsed_ms: summary.elapsed.as_millis() as u64,
            finished_at: Utc::now(),
        }
    }
}

/// A simple history store: one JSON object per run, appended to
/// `<dir>/runs.jsonl`.
pub struct History {
    runs_path: PathBuf,
}

impl History {
    /// Construct a new `History` store at `history_dir`, creating the
    /// directory if needed.
    pub fn new(history_dir: impl Into<PathBuf>) -> Result<Self> {
        let history_dir = history_dir.into();
        fs::create_dir_all(&history_dir)
            .with_context(|| format!("creating history directory {:?}", &history_dir))?;
        Ok(Self {
            runs_path: history_dir.join(RUNS_FILE),
        })
    }

    /// Append a single run record.
    pub fn record_run(&self, run: &CleanRun) -> Result<()> {
        let line = serde_json::to_string(run).context("serializing run record")?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.runs_path)
            .with_context(|| format!("opening history file {:?}", &self.runs_path))?;
        writeln!(file, "{}", line)
            .with_context(|| format!("appending to history file {:?}", &self.runs_path))?;
        Ok(())
    }

    /// Load every recorded run, oldest first. A store that has never
    /// recorded anything yields an empty list.
    pub fn load_runs(&self) -> Result<Vec<CleanRun>> {
        if !self.runs_path.exists() {
            return Ok(Vec::new());
        }
        let file = File::open(&self.runs_path)
            .with_context(|| format!("opening history file {:?}", &self.runs_path))?;

        let mut runs = Vec::new();
        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line.with_context(|| {
                format!(
                    "reading history file {:?} at line {}",
                    &self.runs_path,
                    idx + 1
                )
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let run: CleanRun = serde_json::from_str(&line).with_context(|| {
                format!(
                    "malformed history record in {:?} at line {}",
                    &self.runs_path,
                    idx + 1
                )
            })?;
            runs.push(run);
        }
        Ok(runs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::time::Duration;
    use tempfile::tempdir;

    fn summary(pipeline: &'static str) -> CleanSummary {
        CleanSummary {
            pipeline,
            input: "data/airports.csv".into(),
            output: "cleaned_dataset.csv".into(),
            rows_read: 10,
            rows_written: 7,
            elapsed: Duration::from_millis(12),
        }
    }

    #[test]
    fn test_runs_round_trip() -> Result<()> {
        let dir = tempdir()?;
        let history = History::new(dir.path().join("history"))?;

        history.record_run(&CleanRun::from_summary(&summary("airports")))?;
        history.record_run(&CleanRun::from_summary(&summary("routes")))?;

        let runs = history.load_runs()?;
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].pipeline, "airports");
        assert_eq!(runs[1].pipeline, "routes");
        assert_eq!(runs[0].rows_read, 10);
        assert_eq!(runs[0].rows_written, 7);
        Ok(())
    }

    #[test]
    fn test_empty_store_loads_no_runs() -> Result<()> {
        let dir = tempdir()?;
        let history = History::new(dir.path().join("history"))?;
        assert!(history.load_runs()?.is_empty());
        Ok(())
    }
}
