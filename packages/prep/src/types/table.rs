//! Ordered flat table.
//!
//! A `Table` is an ordered list of columns plus row-major records.
//! Column order is significant for display and CSV output; row order is
//! preserved from source order and join order. Cells not present on a
//! row read as null, so a row never produces a missing-key failure.

use indexmap::IndexMap;

use crate::error::Result;
use crate::types::value::Value;

/// One record: column name to cell value.
pub type Row = IndexMap<String, Value>;

const NULL: Value = Value::Null;

/// An ordered sequence of rows with a significant column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Create an empty table with no columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table with the given column order.
    pub fn with_columns(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            columns: columns.into_iter().map(|c| c.into()).collect(),
            rows: Vec::new(),
        }
    }

    /// Parse CSV bytes. The first record is the header; empty fields
    /// read as null. Short records are padded with nulls.
    pub fn from_csv(bytes: &[u8]) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(bytes);

        let columns: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let mut row = Row::new();
            for (i, column) in columns.iter().enumerate() {
                let value = record
                    .get(i)
                    .map(Value::from_csv_field)
                    .unwrap_or(Value::Null);
                row.insert(column.clone(), value);
            }
            rows.push(row);
        }

        Ok(Self { columns, rows })
    }

    /// Serialize to CSV bytes in column order. Null renders empty.
    pub fn to_csv(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        if self.columns.is_empty() {
            return Ok(buf);
        }
        {
            let mut writer = csv::Writer::from_writer(&mut buf);
            writer.write_record(&self.columns)?;
            for i in 0..self.rows.len() {
                let record: Vec<String> = self
                    .columns
                    .iter()
                    .map(|c| self.get(i, c).render())
                    .collect();
                writer.write_record(&record)?;
            }
            writer.flush()?;
        }
        Ok(buf)
    }

    /// Column names in display order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Whether a column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Borrow the rows.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Read a cell. Unknown columns and absent cells read as null.
    pub fn get(&self, row: usize, column: &str) -> &Value {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&NULL)
    }

    /// Write a cell, creating the column if needed.
    pub fn set(&mut self, row: usize, column: &str, value: Value) {
        self.ensure_column(column);
        if let Some(r) = self.rows.get_mut(row) {
            r.insert(column.to_string(), value);
        }
    }

    /// Append a row. Columns the table has not seen yet are appended to
    /// the column order.
    pub fn push_row(&mut self, row: Row) {
        for column in row.keys() {
            if !self.has_column(column) {
                self.columns.push(column.clone());
            }
        }
        self.rows.push(row);
    }

    /// Create the column (reading as null on every row) if it is absent.
    pub fn ensure_column(&mut self, name: &str) {
        if !self.has_column(name) {
            self.columns.push(name.to_string());
        }
    }

    /// Rename a column, but only when the target name is not already
    /// taken. Returns whether a rename happened.
    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        if !self.has_column(from) || self.has_column(to) {
            return false;
        }
        for column in &mut self.columns {
            if column == from {
                *column = to.to_string();
            }
        }
        for row in &mut self.rows {
            if let Some(value) = row.shift_remove(from) {
                row.insert(to.to_string(), value);
            }
        }
        true
    }

    /// Whether the column is missing or null on every row.
    pub fn all_null(&self, column: &str) -> bool {
        if !self.has_column(column) {
            return true;
        }
        (0..self.len()).all(|i| self.get(i, column).is_null())
    }

    /// Distinct non-null values of a column, rendered as strings, in
    /// first-seen row order.
    pub fn distinct_strings(&self, column: &str) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for i in 0..self.len() {
            let value = self.get(i, column);
            if value.is_null() {
                continue;
            }
            let rendered = value.render();
            if seen.insert(rendered.clone()) {
                out.push(rendered);
            }
        }
        out
    }

    /// Left outer join on the given key columns.
    ///
    /// Base rows are kept in order; each match in `other` produces one
    /// output row, and unmatched base rows carry nulls for the other
    /// table's columns. Non-key columns of `other` that collide with a
    /// base column are renamed with `suffix`. Null keys never match.
    pub fn left_join(&self, other: &Table, keys: &[&str], suffix: &str) -> Table {
        // Resolve the name each incoming column will have on the output.
        let incoming: Vec<(String, String)> = other
            .columns
            .iter()
            .filter(|c| !keys.contains(&c.as_str()))
            .map(|c| {
                let out_name = if self.has_column(c) {
                    format!("{}{}", c, suffix)
                } else {
                    c.clone()
                };
                (c.clone(), out_name)
            })
            .collect();

        let mut columns = self.columns.clone();
        columns.extend(incoming.iter().map(|(_, out)| out.clone()));
        let mut joined = Table::with_columns(columns);

        // Index the right side by key tuple.
        let mut index: std::collections::HashMap<Vec<String>, Vec<usize>> =
            std::collections::HashMap::new();
        for i in 0..other.len() {
            if let Some(tuple) = key_tuple(other, i, keys) {
                index.entry(tuple).or_default().push(i);
            }
        }

        for i in 0..self.len() {
            let matches = key_tuple(self, i, keys)
                .and_then(|tuple| index.get(&tuple))
                .cloned()
                .unwrap_or_default();

            if matches.is_empty() {
                let mut row = self.rows[i].clone();
                for (_, out_name) in &incoming {
                    row.insert(out_name.clone(), Value::Null);
                }
                joined.rows.push(row);
            } else {
                for j in matches {
                    let mut row = self.rows[i].clone();
                    for (src_name, out_name) in &incoming {
                        row.insert(out_name.clone(), other.get(j, src_name).clone());
                    }
                    joined.rows.push(row);
                }
            }
        }

        joined
    }
}

/// Key values for a row, rendered for comparison. None if any key cell
/// is null, which keeps null keys from matching each other.
fn key_tuple(table: &Table, row: usize, keys: &[&str]) -> Option<Vec<String>> {
    let mut tuple = Vec::with_capacity(keys.len());
    for key in keys {
        let value = table.get(row, key);
        if value.is_null() {
            return None;
        }
        tuple.push(value.render());
    }
    Some(tuple)
}
