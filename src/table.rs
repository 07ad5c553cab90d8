//! A minimal column-oriented table for reporting.
//!
//! Columns are ordered and every column holds the same number of values.
//! Values are stored as strings; rendering with [`Display`](std::fmt::Display)
//! produces a fixed-width grid:
//!
//! ```text
//! | Country  | Capital  | Language |
//! | ________ | ________ | _________|
//! | Germany  | Berlin   | German   |
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::FsError;

/// Identifies a column either by name or by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnId<'c> {
    /// Column name.
    Name(&'c str),
    /// Zero-based column index.
    Index(usize),
}

impl<'c> From<&'c str> for ColumnId<'c> {
    fn from(name: &'c str) -> Self {
        ColumnId::Name(name)
    }
}

impl<'c> From<&'c String> for ColumnId<'c> {
    fn from(name: &'c String) -> Self {
        ColumnId::Name(name)
    }
}

impl From<usize> for ColumnId<'_> {
    fn from(index: usize) -> Self {
        ColumnId::Index(index)
    }
}

/// Ordered mapping of column name to column values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    names: Vec<String>,
    columns: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table with the given column names, in order.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidArgument`] if there are no columns or a name repeats
    pub fn new<I, S>(names: I) -> Result<Self, FsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        check_names(&names)?;
        let columns = vec![Vec::new(); names.len()];
        Ok(Self { names, columns })
    }

    /// Create a table from `(name, values)` pairs, in column order.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidArgument`] if there are no columns, a name repeats,
    ///   or the columns differ in length
    pub fn from_columns<I, S, V, X>(columns: I) -> Result<Self, FsError>
    where
        I: IntoIterator<Item = (S, V)>,
        S: Into<String>,
        V: IntoIterator<Item = X>,
        X: ToString,
    {
        let (names, columns): (Vec<String>, Vec<Vec<String>>) = columns
            .into_iter()
            .map(|(name, values)| {
                (
                    name.into(),
                    values.into_iter().map(|v| v.to_string()).collect(),
                )
            })
            .unzip();
        check_names(&names)?;

        if columns.iter().any(|col| col.len() != columns[0].len()) {
            return Err(FsError::InvalidArgument(
                "all columns must have the same number of values".into(),
            ));
        }
        Ok(Self { names, columns })
    }

    /// Name of the column at `index`.
    pub fn col_name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Column names, in column order.
    pub fn col_names(&self) -> &[String] {
        &self.names
    }

    /// Values of a column, looked up by name or index.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidArgument`] if no such column exists
    pub fn col<'c>(&self, id: impl Into<ColumnId<'c>>) -> Result<&[String], FsError> {
        let index = self.col_index(id.into())?;
        Ok(&self.columns[index])
    }

    /// The value at `row` in column `col`.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidArgument`] if the column or row does not exist
    pub fn value<'c>(&self, row: usize, col: impl Into<ColumnId<'c>>) -> Result<&str, FsError> {
        self.col(col)?
            .get(row)
            .map(String::as_str)
            .ok_or_else(|| FsError::InvalidArgument(format!("row index {row} out of range")))
    }

    /// Values of row `index`, in column order.
    pub fn row(&self, index: usize) -> Option<Vec<&str>> {
        (index < self.n_rows()).then(|| {
            self.columns
                .iter()
                .map(|col| col[index].as_str())
                .collect()
        })
    }

    /// Row `index` as `(column name, value)` pairs, in column order.
    pub fn row_map(&self, index: usize) -> Option<Vec<(&str, &str)>> {
        (index < self.n_rows()).then(|| {
            self.names
                .iter()
                .zip(&self.columns)
                .map(|(name, col)| (name.as_str(), col[index].as_str()))
                .collect()
        })
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Number of columns.
    pub fn n_cols(&self) -> usize {
        self.names.len()
    }

    /// Append a row given as values in column order.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidArgument`] if the number of values differs from the number of columns
    pub fn add_row<I, X>(&mut self, values: I) -> Result<(), FsError>
    where
        I: IntoIterator<Item = X>,
        X: ToString,
    {
        let values: Vec<String> = values.into_iter().map(|v| v.to_string()).collect();
        if values.len() != self.n_cols() {
            return Err(FsError::InvalidArgument(format!(
                "the number of row values ({}) must be equal to the number of columns ({})",
                values.len(),
                self.n_cols()
            )));
        }

        for (col, value) in self.columns.iter_mut().zip(values) {
            col.push(value);
        }
        Ok(())
    }

    /// Append a row given as `(column name, value)` pairs in any order.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidArgument`] if the keys differ from the column names
    pub fn add_row_map<I, K, X>(&mut self, row: I) -> Result<(), FsError>
    where
        I: IntoIterator<Item = (K, X)>,
        K: Into<String>,
        X: ToString,
    {
        let mut row: HashMap<String, String> = row
            .into_iter()
            .map(|(k, v)| (k.into(), v.to_string()))
            .collect();

        let keys: HashSet<&str> = row.keys().map(String::as_str).collect();
        let names: HashSet<&str> = self.names.iter().map(String::as_str).collect();
        let mut differing: Vec<&str> = keys.symmetric_difference(&names).copied().collect();
        if !differing.is_empty() {
            differing.sort_unstable();
            return Err(FsError::InvalidArgument(format!(
                "the row keys must be equal to the column names, but the following keys differed: {differing:?}"
            )));
        }

        for (name, col) in self.names.iter().zip(self.columns.iter_mut()) {
            if let Some(value) = row.remove(name) {
                col.push(value);
            }
        }
        Ok(())
    }

    /// Append several positional rows.
    ///
    /// Rows before the first invalid one are kept.
    ///
    /// # Errors
    ///
    /// The first error returned by [`add_row`](Self::add_row).
    pub fn add_rows<I, R, X>(&mut self, rows: I) -> Result<(), FsError>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = X>,
        X: ToString,
    {
        rows.into_iter().try_for_each(|row| self.add_row(row))
    }

    fn col_index(&self, id: ColumnId<'_>) -> Result<usize, FsError> {
        match id {
            ColumnId::Name(name) => self
                .names
                .iter()
                .position(|n| n == name)
                .ok_or_else(|| FsError::InvalidArgument(format!("no column named {name:?}"))),
            ColumnId::Index(index) if index < self.n_cols() => Ok(index),
            ColumnId::Index(index) => Err(FsError::InvalidArgument(format!(
                "column index {index} out of range"
            ))),
        }
    }

    /// Serialize the table as a pretty-printed JSON object of columns.
    ///
    /// # Errors
    ///
    /// - [`FsError::Serialization`] if serialization fails
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, FsError> {
        serde_json::to_string_pretty(self).map_err(|e| FsError::Serialization(e.to_string()))
    }
}

fn check_names(names: &[String]) -> Result<(), FsError> {
    if names.is_empty() {
        return Err(FsError::InvalidArgument(
            "table must have at least one column".into(),
        ));
    }
    let mut seen = HashSet::new();
    if let Some(dup) = names.iter().find(|name| !seen.insert(name.as_str())) {
        return Err(FsError::InvalidArgument(format!(
            "duplicate column name {dup:?}"
        )));
    }
    Ok(())
}

fn write_cells<'v>(
    f: &mut fmt::Formatter<'_>,
    widths: &[usize],
    cells: impl Iterator<Item = &'v str>,
) -> fmt::Result {
    f.write_str("| ")?;
    for (i, (cell, &width)) in cells.zip(widths).enumerate() {
        if i > 0 {
            f.write_str(" | ")?;
        }
        write!(f, "{cell:<width$}")?;
    }
    f.write_str("|")
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths: Vec<usize> = self
            .names
            .iter()
            .zip(&self.columns)
            .map(|(name, col)| {
                col.iter()
                    .chain(std::iter::once(name))
                    .map(|v| v.chars().count())
                    .max()
                    .unwrap_or(0)
                    + 1
            })
            .collect();
        let separators: Vec<String> = widths.iter().map(|w| "_".repeat(*w)).collect();

        write_cells(f, &widths, self.names.iter().map(String::as_str))?;
        for index in 0..self.n_rows() {
            f.write_str("\n")?;
            write_cells(f, &widths, separators.iter().map(String::as_str))?;
            f.write_str("\n")?;
            write_cells(f, &widths, self.columns.iter().map(|col| col[index].as_str()))?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Table {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.n_cols()))?;
        for (name, col) in self.names.iter().zip(&self.columns) {
            map.serialize_entry(name, col)?;
        }
        map.end()
    }
}
