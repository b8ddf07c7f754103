// ============================================================
// Layer 4 — Table Writer
// ============================================================
// Writes a Table to CSV in one go: header first, then every row in
// order. Parent directories are created first, like `mkdir -p`.

use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::{fs, path::Path};

use crate::domain::table::Table;

pub fn write_table(path: impl AsRef<Path>, table: &Table) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create output directory '{}'", parent.display()))?;
    }

    let mut writer = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("Cannot create output CSV '{}'", path.display()))?;

    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer
        .flush()
        .with_context(|| format!("Cannot flush output CSV '{}'", path.display()))?;

    tracing::debug!("Wrote {} rows to '{}'", table.len(), path.display());
    Ok(())
}
