// ============================================================
// Layer 4 — Table Loader
// ============================================================
// Loads a headed CSV file into a Table using the csv crate.
//
// Every row must have as many fields as the header; a ragged row
// means the file is not the table we think it is, so loading fails
// instead of silently shifting cells between columns.

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::path::Path;

use crate::domain::table::Table;

/// Read the whole CSV file at `path`.
pub fn read_table(path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Cannot open input CSV '{}'", path.display()))?;

    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("Cannot read header row of '{}'", path.display()))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        // +2: one for the header line, one for 1-based numbering
        let record = record
            .with_context(|| format!("Malformed row at line {} of '{}'", i + 2, path.display()))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    tracing::debug!(
        "Read {} rows x {} columns from '{}'",
        rows.len(),
        headers.len(),
        path.display()
    );

    Ok(Table::new(headers, rows))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_reads_headers_and_rows_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sentences.csv");
        fs::write(&path, "id,text\n1,hello world\n2,foo\n3,\"a, quoted one\"\n").unwrap();

        let t = read_table(&path).unwrap();
        assert_eq!(t.headers, vec!["id", "text"]);
        assert_eq!(t.len(), 3);
        assert_eq!(t.rows[0][1], "hello world");
        assert_eq!(t.rows[2][1], "a, quoted one");
    }

    #[test]
    fn test_header_only_file_is_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        fs::write(&path, "text\n").unwrap();

        let t = read_table(&path).unwrap();
        assert_eq!(t.headers, vec!["text"]);
        assert_eq!(t.len(), 0);
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_table(dir.path().join("nope.csv")).unwrap_err();
        assert!(err.to_string().contains("Cannot open input CSV"));
    }

    #[test]
    fn test_ragged_row_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ragged.csv");
        fs::write(&path, "id,text\n1,hello\n2\n").unwrap();

        assert!(read_table(&path).is_err());
    }
}
