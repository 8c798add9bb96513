//! Generic header-plus-rows text table decoded from a container span.

use crate::error::{GeoError, Result};
use std::path::Path;

/// A tab-decoded table with named columns and all-text cells.
///
/// Cells are never inferred as numeric: probe and gene identifiers may
/// carry leading zeros or mixed alphanumerics, and expression values pass
/// through untouched so re-runs are byte-identical.
#[derive(Debug, Clone, Default)]
pub struct DelimitedTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl DelimitedTable {
    /// Decode a span of tab-delimited lines as header plus data rows.
    ///
    /// An empty span yields an empty table. Every data row must match the
    /// header's field count; a ragged row means the container is corrupt.
    pub fn from_lines(lines: &[String]) -> Result<Self> {
        let Some((header, data)) = lines.split_first() else {
            return Ok(Self::default());
        };
        let columns: Vec<String> = header.split('\t').map(str::to_string).collect();
        let mut rows = Vec::with_capacity(data.len());
        for (row_idx, line) in data.iter().enumerate() {
            let fields: Vec<String> = line.split('\t').map(str::to_string).collect();
            if fields.len() != columns.len() {
                return Err(GeoError::RaggedRow {
                    row: row_idx,
                    expected: columns.len(),
                    actual: fields.len(),
                });
            }
            rows.push(fields);
        }
        Ok(Self { columns, rows })
    }

    /// Column names, in physical order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of data rows (header excluded).
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Data rows.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Strip surrounding whitespace from every column name.
    pub fn trim_column_names(&mut self) {
        for name in &mut self.columns {
            *name = name.trim().to_string();
        }
    }

    /// Rename the first column to a canonical name.
    ///
    /// No-op on an empty table.
    pub fn rename_first_column(&mut self, name: &str) {
        if let Some(first) = self.columns.first_mut() {
            *first = name.to_string();
        }
    }

    /// Physical index of an exactly-named column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Resolve a logical column through an ordered alias list.
    ///
    /// Aliases are consulted in list order and the first one present in
    /// the column set wins, regardless of where the matching column sits
    /// physically. List order is priority order.
    pub fn resolve_column(&self, aliases: &[&str]) -> Option<usize> {
        aliases.iter().find_map(|alias| self.column_index(alias))
    }

    /// All values of one column, top to bottom.
    pub fn column_values(&self, index: usize) -> Vec<&str> {
        self.rows.iter().map(|row| row[index].as_str()).collect()
    }

    /// Persist as CSV with a header row and no index column.
    ///
    /// An empty table writes an empty file.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        if !self.columns.is_empty() {
            writer.write_record(&self.columns)?;
            for row in &self.rows {
                writer.write_record(row)?;
            }
        }
        writer.flush()?;
        Ok(())
    }
}
