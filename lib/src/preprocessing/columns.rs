//! Column selection for transformers.

use crate::preprocessing::error::FeatureError;
use crate::table::Table;
use serde::{Deserialize, Serialize};

/// Specifies which columns a transformer is fitted on.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnSpec {
    /// The named columns, in this order.
    Names(Vec<String>),
    /// Every column of the table, in table order.
    #[default]
    All,
}

impl ColumnSpec {
    /// Build a spec from column names.
    pub fn names<S: AsRef<str>>(names: &[S]) -> Self {
        ColumnSpec::Names(names.iter().map(|s| s.as_ref().to_string()).collect())
    }

    /// Resolve the spec against a table.
    ///
    /// # Errors
    /// [`FeatureError::ColumnNotFound`] if a named column is absent.
    pub fn resolve(&self, table: &Table) -> Result<Vec<String>, FeatureError> {
        match self {
            ColumnSpec::Names(names) => {
                for name in names {
                    table.require(name)?;
                }
                Ok(names.clone())
            }
            ColumnSpec::All => Ok(table
                .column_names()
                .into_iter()
                .map(str::to_string)
                .collect()),
        }
    }
}
