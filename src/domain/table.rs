// ============================================================
// Layer 3 — Table Domain Type
// ============================================================
// A fully materialised CSV table: one header row and an ordered list
// of data rows, every cell kept as a string. Row order is the file
// order and is never changed by anything in this crate.

use anyhow::{bail, Context, Result};

/// Headers plus rows, all cells as strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Column names in file order
    pub headers: Vec<String>,

    /// Data rows; every row has exactly `headers.len()` cells
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Number of data rows (the header is not counted)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Index of the first column called `name`, if any
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Clone every value of column `name` in row order.
    pub fn column_values(&self, name: &str) -> Result<Vec<String>> {
        let idx = self
            .column(name)
            .with_context(|| format!("Column '{}' not found (columns: {:?})", name, self.headers))?;

        Ok(self.rows.iter().map(|row| row[idx].clone()).collect())
    }

    /// Assign a whole column.
    ///
    /// An existing column of that name is overwritten in place; otherwise
    /// the column is appended after the last one.
    pub fn set_column(&mut self, name: &str, values: Vec<String>) -> Result<()> {
        if values.len() != self.rows.len() {
            bail!(
                "Column '{}' has {} values but the table has {} rows",
                name,
                values.len(),
                self.rows.len()
            );
        }

        match self.column(name) {
            Some(idx) => {
                for (row, v) in self.rows.iter_mut().zip(values) {
                    row[idx] = v;
                }
            }
            None => {
                self.headers.push(name.to_string());
                for (row, v) in self.rows.iter_mut().zip(values) {
                    row.push(v);
                }
            }
        }

        Ok(())
    }
}
