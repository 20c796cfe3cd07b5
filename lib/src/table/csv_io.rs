//! CSV reading and writing for [`Table`].
//!
//! Column types are inferred per column the way pandas does it: a column whose
//! non-missing fields all parse as numbers is numeric, any other column keeps
//! every field as text (so `"20"` in a text column stays the category `"20"`).

use super::{Cell, Column, Table};
use crate::preprocessing::error::FeatureError;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Field values read as missing (pandas' default `na_values`).
pub const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing_marker(field: &str) -> bool {
    MISSING_MARKERS.contains(&field)
}

/// Infer the cells of one column from its raw fields.
fn infer_column(name: String, fields: Vec<String>) -> Column {
    let numeric = fields
        .iter()
        .filter(|f| !is_missing_marker(f))
        .all(|f| f.trim().parse::<f64>().is_ok());

    let cells = fields
        .into_iter()
        .map(|field| {
            if is_missing_marker(&field) {
                Cell::Missing
            } else if numeric {
                field.trim().parse::<f64>().map_or(Cell::Missing, Cell::from)
            } else {
                Cell::Text(field)
            }
        })
        .collect();

    Column::new(name, cells)
}

impl Table {
    /// Read a table from CSV with a header row.
    ///
    /// # Errors
    /// - [`FeatureError::CsvError`] for malformed input (including ragged rows)
    /// - [`FeatureError::DuplicateColumn`] for repeated header names
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, FeatureError> {
        let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        let mut fields: Vec<Vec<String>> = vec![Vec::new(); headers.len()];

        for result in rdr.records() {
            let record = result?;
            for (col, field) in record.iter().enumerate() {
                fields[col].push(field.to_string());
            }
        }

        let columns = headers
            .into_iter()
            .zip(fields)
            .map(|(name, raw)| infer_column(name, raw))
            .collect();

        let table = Table::new(columns)?;
        tracing::debug!(
            rows = table.n_rows(),
            columns = table.n_cols(),
            "Read CSV table"
        );
        Ok(table)
    }

    /// Read a table from a CSV file.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, FeatureError> {
        let file = File::open(path)?;
        Self::from_csv_reader(BufReader::new(file))
    }

    /// Write the table as CSV with a header row; missing cells are empty fields.
    pub fn to_csv_writer<W: Write>(&self, writer: W) -> Result<(), FeatureError> {
        let mut wtr = WriterBuilder::new().from_writer(writer);

        wtr.write_record(self.column_names())?;
        for row in 0..self.n_rows() {
            wtr.write_record(self.columns.iter().map(|c| c.cells[row].to_string()))?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Write the table to a CSV file.
    pub fn to_csv_path<P: AsRef<Path>>(&self, path: P) -> Result<(), FeatureError> {
        let file = File::create(path)?;
        self.to_csv_writer(BufWriter::new(file))
    }
}
