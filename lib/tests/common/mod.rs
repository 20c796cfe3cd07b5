//! Synthetic Ames-shaped tables for integration tests.

use housing_features::schema::{
    AMES_IDENTIFIER, AMES_NOMINAL, AMES_NUMERIC, AMES_ORDINAL, AMES_TARGET,
};
use housing_features::{Cell, Column, Table};

/// Nominal columns whose values are numbers in the raw file.
pub const NUMBER_VALUED_NOMINAL: &[&str] = &[
    "MSSubClass",
    "YearBuilt",
    "YearRemodAdd",
    "BsmtFullBath",
    "BsmtHalfBath",
    "GarageYrBlt",
    "MoSold",
    "YrSold",
];

const QUALITY_LEVELS: &[&str] = &["Ex", "Gd", "TA", "Fa", "Po"];

/// Every schema column with deterministic values and scattered missing cells.
///
/// Category values cycle with short periods, so any table with at least 13
/// rows observes every category that a shorter table can produce.
pub fn ames_table(n_rows: usize, with_target: bool) -> Table {
    let mut columns = vec![Column::from_f64(
        AMES_IDENTIFIER,
        (1..=n_rows).map(|i| i as f64).collect(),
    )];

    for (j, name) in AMES_NUMERIC.iter().enumerate() {
        let values = (0..n_rows)
            .map(|i| {
                if (i + j) % 7 == 3 {
                    f64::NAN
                } else {
                    ((i * 31 + j * 17) % 500) as f64
                }
            })
            .collect();
        columns.push(Column::from_f64(*name, values));
    }

    for (j, name) in AMES_ORDINAL.iter().enumerate() {
        let cells = (0..n_rows)
            .map(|i| {
                if (i + j) % 11 == 5 {
                    Cell::Missing
                } else {
                    Cell::from(QUALITY_LEVELS[(i + j) % QUALITY_LEVELS.len()])
                }
            })
            .collect();
        columns.push(Column::new(*name, cells));
    }

    for (j, name) in AMES_NOMINAL.iter().enumerate() {
        let cells = if NUMBER_VALUED_NOMINAL.contains(name) {
            (0..n_rows)
                .map(|i| Cell::Number((1950 + (i * 7 + j) % 4) as f64))
                .collect()
        } else {
            (0..n_rows)
                .map(|i| {
                    if (i + j) % 13 == 7 {
                        Cell::Missing
                    } else {
                        Cell::Text(format!("{}{}", &name[..2], (i + j) % 3))
                    }
                })
                .collect()
        };
        columns.push(Column::new(*name, cells));
    }

    if with_target {
        columns.push(Column::from_f64(
            AMES_TARGET,
            (0..n_rows).map(|i| 100_000.0 + 1_000.0 * i as f64).collect(),
        ));
    }

    Table::new(columns).expect("synthetic columns have equal length and unique names")
}
