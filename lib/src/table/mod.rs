//! In-memory tables with named, typed columns.
//!
//! A [`Table`] is a list of named [`Column`]s of equal length plus a row
//! index. Cells are one of missing, number or text, which is all the raw
//! housing data needs. The row index is assigned once when a table is built
//! (`0..n`) and carried through every projection, so two blocks derived from
//! the same input can be checked for alignment before they are concatenated.
//!
//! # Example
//!
//! ```rust
//! use housing_features::table::{Cell, Column, Table};
//!
//! let table = Table::new(vec![
//!     Column::new("LotArea", vec![Cell::from(5000.0), Cell::Missing]),
//!     Column::new("Street", vec![Cell::from("Pave"), Cell::from("Grvl")]),
//! ])
//! .unwrap();
//!
//! assert_eq!(table.shape(), (2, 2));
//! assert!(table.column("LotArea").unwrap().cells()[1].is_missing());
//! ```

mod csv_io;

pub use csv_io::MISSING_MARKERS;

use crate::preprocessing::error::FeatureError;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A single table cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    /// Absent value (empty field, `NA`, NaN).
    Missing,
    /// Numeric value. A NaN payload is treated as missing.
    Number(f64),
    /// Free-text category value.
    Text(String),
}

impl Cell {
    /// Whether the cell holds no value.
    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Missing => true,
            Cell::Number(v) => v.is_nan(),
            Cell::Text(_) => false,
        }
    }

    /// Numeric value of the cell, `None` for missing and text cells.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(v) if !v.is_nan() => Some(*v),
            _ => None,
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        if value.is_nan() {
            Cell::Missing
        } else {
            Cell::Number(value)
        }
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Cell::Missing, Cell::from)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Missing => Ok(()),
            Cell::Number(v) if v.is_nan() => Ok(()),
            Cell::Number(v) => write!(f, "{}", format_number(*v)),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

/// Shortest decimal rendering of a number; integral values carry no fraction.
pub(crate) fn format_number(value: f64) -> String {
    // Rust prints -0.0 as "-0"
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

/// A named column of cells.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    name: String,
    cells: Vec<Cell>,
}

impl Column {
    /// Create a column from a name and its cells.
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// Create a numeric column; NaN entries become missing cells.
    pub fn from_f64(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self::new(name, values.into_iter().map(Cell::from).collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Numeric view of the column; missing cells are NaN.
    ///
    /// # Errors
    /// [`FeatureError::NonNumeric`] on the first text cell.
    pub fn to_f64(&self) -> Result<Vec<f64>, FeatureError> {
        self.cells
            .iter()
            .enumerate()
            .map(|(row, cell)| match cell {
                Cell::Missing => Ok(f64::NAN),
                Cell::Number(v) => Ok(*v),
                Cell::Text(s) => Err(FeatureError::NonNumeric {
                    column: self.name.clone(),
                    row,
                    value: s.clone(),
                }),
            })
            .collect()
    }

    pub fn into_parts(self) -> (String, Vec<Cell>) {
        (self.name, self.cells)
    }
}

/// A row-indexed collection of equal-length named columns.
///
/// A table with no columns still has rows: an empty feature block keeps the
/// index of the table it was derived from, so concatenating it is a no-op.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    index: Vec<usize>,
    columns: Vec<Column>,
}

impl Table {
    /// Build a table with a fresh positional index `0..n`.
    ///
    /// # Errors
    /// - [`FeatureError::LengthMismatch`] if the columns differ in length
    /// - [`FeatureError::DuplicateColumn`] if two columns share a name
    pub fn new(columns: Vec<Column>) -> Result<Self, FeatureError> {
        let n_rows = columns.first().map_or(0, Column::len);
        Self::with_index((0..n_rows).collect(), columns)
    }

    /// Build a table over an explicit row index.
    pub fn with_index(index: Vec<usize>, columns: Vec<Column>) -> Result<Self, FeatureError> {
        let mut table = Self::empty(index);
        for column in columns {
            table.push_column(column)?;
        }
        Ok(table)
    }

    /// A table with rows but no columns.
    pub fn empty(index: Vec<usize>) -> Self {
        Self {
            index,
            columns: Vec::new(),
        }
    }

    pub fn n_rows(&self) -> usize {
        self.index.len()
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows(), self.n_cols())
    }

    pub fn index(&self) -> &[usize] {
        &self.index
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Position of a column by name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Look up a column, failing with [`FeatureError::ColumnNotFound`].
    pub fn require(&self, name: &str) -> Result<&Column, FeatureError> {
        self.column(name)
            .ok_or_else(|| FeatureError::ColumnNotFound(name.to_string()))
    }

    /// Append a column on the right.
    pub fn push_column(&mut self, column: Column) -> Result<(), FeatureError> {
        if column.len() != self.n_rows() {
            return Err(FeatureError::LengthMismatch {
                column: column.name,
                expected: self.n_rows(),
                got: column.cells.len(),
            });
        }
        if self.contains(&column.name) {
            return Err(FeatureError::DuplicateColumn(column.name));
        }
        self.columns.push(column);
        Ok(())
    }

    /// Remove a column and return it, keeping the order of the others.
    pub fn take_column(&mut self, name: &str) -> Option<Column> {
        let pos = self.position(name)?;
        Some(self.columns.remove(pos))
    }

    /// Project the named columns, in the given order, into a new table.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Table, FeatureError> {
        let columns = names
            .iter()
            .map(|name| self.require(name.as_ref()).cloned())
            .collect::<Result<Vec<_>, _>>()?;
        Table::with_index(self.index.clone(), columns)
    }

    /// Concatenate `other`'s columns to the right of this table's.
    ///
    /// # Errors
    /// - [`FeatureError::IndexMismatch`] unless both tables share the same row index
    /// - [`FeatureError::DuplicateColumn`] if a name appears on both sides
    pub fn hconcat(mut self, other: Table) -> Result<Table, FeatureError> {
        if self.index != other.index {
            return Err(FeatureError::IndexMismatch {
                left_rows: self.n_rows(),
                right_rows: other.n_rows(),
            });
        }
        let mut seen: HashSet<&str> = self.columns.iter().map(Column::name).collect();
        for column in &other.columns {
            if !seen.insert(column.name()) {
                return Err(FeatureError::DuplicateColumn(column.name.clone()));
            }
        }
        self.columns.extend(other.columns);
        Ok(self)
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    /// Dense row-major matrix of the table for model code; missing cells are NaN.
    ///
    /// # Errors
    /// [`FeatureError::NonNumeric`] if any cell holds text.
    pub fn to_array(&self) -> Result<Array2<f64>, FeatureError> {
        let mut array = Array2::zeros((self.n_rows(), self.n_cols()));
        for (col, column) in self.columns.iter().enumerate() {
            for (row, value) in column.to_f64()?.into_iter().enumerate() {
                array[[row, col]] = value;
            }
        }
        Ok(array)
    }
}
