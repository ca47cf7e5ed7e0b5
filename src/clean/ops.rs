// src/clean/ops.rs
use anyhow::{bail, Result};
use std::collections::HashSet;
use tracing::info;

use crate::table::Table;

/// Literal the source datasets use for "no data". A present value, distinct
/// from an empty (missing) cell.
pub const SENTINEL: &str = "\\N";

/// Keep only rows in which every cell is non-empty.
pub fn drop_missing_rows(table: Table) -> Table {
    let before = table.rows.len();
    let rows: Vec<Vec<String>> = table
        .rows
        .into_iter()
        .filter(|row| row.iter().all(|cell| !cell.is_empty()))
        .collect();
    info!(
        dropped = before - rows.len(),
        remaining = rows.len(),
        "dropped rows with missing cells"
    );
    Table::new(table.headers, rows)
}

/// Keep only rows in which none of the cells at `cols` holds the `\N`
/// sentinel. Callers resolve the indices beforehand, so an optional column
/// that is absent simply never reaches this stage.
pub fn drop_sentinel_rows(table: Table, cols: &[usize]) -> Table {
    let before = table.rows.len();
    let rows: Vec<Vec<String>> = table
        .rows
        .into_iter()
        .filter(|row| cols.iter().all(|&i| row[i] != SENTINEL))
        .collect();
    info!(
        dropped = before - rows.len(),
        remaining = rows.len(),
        "dropped rows with sentinel values"
    );
    Table::new(table.headers, rows)
}

/// Drop exact-duplicate rows, comparing every column. The first occurrence
/// is kept and row order is preserved.
pub fn dedup_rows(table: Table) -> Table {
    let before = table.rows.len();
    let mut seen: HashSet<Vec<String>> = HashSet::with_capacity(before);
    let rows: Vec<Vec<String>> = table
        .rows
        .into_iter()
        .filter(|row| seen.insert(row.clone()))
        .collect();
    info!(
        dropped = before - rows.len(),
        remaining = rows.len(),
        "dropped duplicate rows"
    );
    Table::new(table.headers, rows)
}

/// Drop rows whose values at `key_columns` duplicate an earlier row, keeping
/// the first occurrence. Unlike the sentinel filter, a key column that does
/// not exist fails the run.
pub fn dedup_rows_by(table: Table, key_columns: &[&str]) -> Result<Table> {
    let mut key_idx = Vec::with_capacity(key_columns.len());
    for name in key_columns {
        match table.column(name) {
            Some(i) => key_idx.push(i),
            None => bail!("dedup key column `{}` not present in table", name),
        }
    }

    let before = table.rows.len();
    let mut seen: HashSet<Vec<String>> = HashSet::with_capacity(before);
    let rows: Vec<Vec<String>> = table
        .rows
        .into_iter()
        .filter(|row| {
            let key: Vec<String> = key_idx.iter().map(|&i| row[i].clone()).collect();
            seen.insert(key)
        })
        .collect();
    info!(
        dropped = before - rows.len(),
        remaining = rows.len(),
        key = ?key_columns,
        "dropped rows with duplicate keys"
    );
    Ok(Table::new(table.headers, rows))
}

/// Remove each column in `names` that exists; absent names are skipped.
pub fn drop_columns(table: Table, names: &[&str]) -> Table {
    let drop: Vec<usize> = names.iter().filter_map(|n| table.column(n)).collect();
    if drop.is_empty() {
        return table;
    }

    let keep: Vec<usize> = (0..table.headers.len())
        .filter(|i| !drop.contains(i))
        .collect();
    let headers: Vec<String> = keep.iter().map(|&i| table.headers[i].clone()).collect();
    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| keep.iter().map(|&i| row[i].clone()).collect())
        .collect();

    info!(
        dropped = drop.len(),
        remaining = headers.len(),
        "dropped columns"
    );
    Table::new(headers, rows)
}
