// src/clean/mod.rs
pub mod airports;
pub mod ops;
pub mod routes;

use std::path::PathBuf;
use std::time::Duration;

/// Outcome of one cleaning run. Per-stage drop counts go to the log; this is
/// what callers and the history store keep.
#[derive(Debug, Clone)]
pub struct CleanSummary {
    pub pipeline: &'static str,
    pub input: PathBuf,
    pub output: PathBuf,
    pub rows_read: usize,
    pub rows_written: usize,
    pub elapsed: Duration,
}
