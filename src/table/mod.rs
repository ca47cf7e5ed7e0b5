// src/table/mod.rs
use anyhow::{Context, Result};
use csv::{ReaderBuilder, Writer};
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// An in-memory delimited table: ordered column names plus the data rows,
/// every cell a string. Rows are always exactly as wide as the header; the
/// loader rejects anything else, so the invariant holds from construction on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Column names, from the header record of the file.
    pub headers: Vec<String>,
    /// Each data record, one `String` per field.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Table { headers, rows }
    }

    /// Read `path` as a comma-delimited table, header record first.
    ///
    /// The reader is strict: a record whose field count differs from the
    /// header is a parse error, not a shorter row.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open input file {}", path.display()))?;
        let mut rdr = ReaderBuilder::new().from_reader(file);

        let headers: Vec<String> = rdr
            .headers()
            .with_context(|| format!("failed to read header row of {}", path.display()))?
            .iter()
            .map(|s| s.to_string())
            .collect();

        let mut rows: Vec<Vec<String>> = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let record = result
                .with_context(|| format!("CSV parse error in {} at record {}", path.display(), idx))?;
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        debug!(
            rows = rows.len(),
            columns = headers.len(),
            "loaded {}",
            path.display()
        );
        Ok(Table { headers, rows })
    }

    /// Write the table to `path` as comma-delimited text, header record
    /// first, column order preserved. Fields are quoted only where the
    /// encoding requires it.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("failed to create output file {}", path.display()))?;
        let mut wtr = Writer::from_writer(file);

        wtr.write_record(&self.headers)
            .with_context(|| format!("failed to write header row to {}", path.display()))?;
        for row in &self.rows {
            wtr.write_record(row)
                .with_context(|| format!("failed to write row to {}", path.display()))?;
        }
        wtr.flush()
            .with_context(|| format!("failed to flush {}", path.display()))?;

        debug!(rows = self.rows.len(), "saved {}", path.display());
        Ok(())
    }

    /// Index of `name` in the header, if the column exists. The membership
    /// test every optional stage performs before touching a column.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// First `n` rows rendered for progress output.
    pub fn preview_head(&self, n: usize) -> String {
        self.render(&self.rows[..self.rows.len().min(n)])
    }

    /// Last `n` rows rendered for progress output.
    pub fn preview_tail(&self, n: usize) -> String {
        let start = self.rows.len().saturating_sub(n);
        self.render(&self.rows[start..])
    }

    fn render(&self, rows: &[Vec<String>]) -> String {
        let mut out = String::new();
        out.push_str(&self.headers.join(" | "));
        for row in rows {
            out.push('\n');
            out.push_str(&row.join(" | "));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> Result<NamedTempFile> {
        let mut tmp = NamedTempFile::new()?;
        tmp.write_all(contents.as_bytes())?;
        Ok(tmp)
    }

    #[test]
    fn test_load_reads_headers_and_rows() -> Result<()> {
        let tmp = write_temp("Name,City,IATA\nGoroka,Goroka,GKA\nMadang,Madang,MAG\n")?;
        let table = Table::load(tmp.path())?;

        assert_eq!(table.headers, vec!["Name", "City", "IATA"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[0], vec!["Goroka", "Goroka", "GKA"]);
        Ok(())
    }

    #[test]
    fn test_quoted_fields_survive_round_trip() -> Result<()> {
        let tmp = write_temp("Name,Country\n\"Mount Hagen, Kagamuga\",Papua New Guinea\n")?;
        let table = Table::load(tmp.path())?;
        assert_eq!(table.rows[0][0], "Mount Hagen, Kagamuga");

        let out = NamedTempFile::new()?;
        table.save(out.path())?;
        let reloaded = Table::load(out.path())?;
        assert_eq!(reloaded, table);
        Ok(())
    }

    #[test]
    fn test_ragged_row_is_a_parse_error() -> Result<()> {
        let tmp = write_temp("A,B,C\n1,2,3\n4,5\n")?;
        let err = Table::load(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("CSV parse error"), "got: {err:#}");
        Ok(())
    }

    #[test]
    fn test_missing_file_names_the_path() {
        let err = Table::load("no/such/file.csv").unwrap_err();
        assert!(err.to_string().contains("no/such/file.csv"));
    }

    #[test]
    fn test_column_lookup() -> Result<()> {
        let tmp = write_temp("A,B\n1,2\n")?;
        let table = Table::load(tmp.path())?;
        assert_eq!(table.column("B"), Some(1));
        assert_eq!(table.column("Z"), None);
        assert!(table.has_column("A"));
        Ok(())
    }

    #[test]
    fn test_preview_head_and_tail() -> Result<()> {
        let tmp = write_temp("A\n1\n2\n3\n")?;
        let table = Table::load(tmp.path())?;
        assert_eq!(table.preview_head(2), "A\n1\n2");
        assert_eq!(table.preview_tail(2), "A\n2\n3");
        // more rows requested than exist is not an error
        assert_eq!(table.preview_head(10), "A\n1\n2\n3");
        Ok(())
    }
}
