//! Ordinal encoding for categorical features.
//!
//! Maps categorical values to integer ranks (0, 1, 2, ...).

use crate::preprocessing::columns::ColumnSpec;
use crate::preprocessing::encoding::category::{distinct_sorted, Category};
use crate::preprocessing::encoding::HandleUnknown;
use crate::preprocessing::error::FeatureError;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use crate::table::{Cell, Column, Table};
use serde::{Deserialize, Serialize};

/// Rank given to missing values and to unknown values under [`HandleUnknown::Ignore`].
pub const SENTINEL_RANK: f64 = -1.0;

/// Ordinal encoder for categorical features.
///
/// Each selected column is encoded independently. The distinct non-missing
/// values of a column are sorted (see [`Category`]) and ranked by position,
/// so `{"Ex", "Gd", "TA"}` becomes `Ex=0, Gd=1, TA=2`. Missing cells always
/// encode as [`SENTINEL_RANK`].
///
/// # Example
/// ```ignore
/// use housing_features::preprocessing::{OrdinalEncoder, Transformer, FittedTransformer};
///
/// let encoder = OrdinalEncoder::new().with_columns(ColumnSpec::names(&["LandSlope"]));
/// let fitted = encoder.fit(&train)?;
/// let ranks = fitted.transform(&test)?;
/// ```
#[derive(Clone, Debug, Default)]
pub struct OrdinalEncoder {
    columns: ColumnSpec,
    /// How to handle unknown categories during transform.
    handle_unknown: HandleUnknown,
}

impl OrdinalEncoder {
    /// Create a new OrdinalEncoder over all columns, mapping unknowns to the sentinel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the encoder to a subset of columns.
    pub fn with_columns(mut self, columns: ColumnSpec) -> Self {
        self.columns = columns;
        self
    }

    /// Set the strategy for handling unknown categories.
    pub fn with_handle_unknown(mut self, strategy: HandleUnknown) -> Self {
        self.handle_unknown = strategy;
        self
    }
}

/// Serializable parameters for a fitted OrdinalEncoder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrdinalEncoderParams {
    /// Encoded column names.
    pub columns: Vec<String>,
    /// Sorted categories for each column; the position is the rank.
    pub categories_: Vec<Vec<Category>>,
    /// Handle unknown strategy.
    pub handle_unknown: HandleUnknown,
}

/// Fitted OrdinalEncoder ready for inference.
#[derive(Clone, Debug)]
pub struct FittedOrdinalEncoder {
    columns: Vec<String>,
    categories_: Vec<Vec<Category>>,
    handle_unknown: HandleUnknown,
}

impl FittedOrdinalEncoder {
    /// Encoded column names, in output order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Get the categories learned for each column.
    pub fn categories(&self) -> &[Vec<Category>] {
        &self.categories_
    }

    /// Rank of a category in a column, `None` if it was not seen during fit.
    pub fn rank(&self, column: usize, category: &Category) -> Option<usize> {
        if category.is_missing() {
            return None;
        }
        self.categories_.get(column)?.binary_search(category).ok()
    }

    fn encode_column(&self, idx: usize, column: &Column) -> Result<Column, FeatureError> {
        let mut unseen = 0usize;
        let mut cells = Vec::with_capacity(column.len());

        for cell in column.cells() {
            let category = Category::from_cell(cell);
            let rank = match self.rank(idx, &category) {
                Some(rank) => rank as f64,
                None if category.is_missing() => SENTINEL_RANK,
                None => {
                    if self.handle_unknown == HandleUnknown::Error {
                        return Err(FeatureError::UnseenCategory {
                            column: column.name().to_string(),
                            value: category.label(),
                        });
                    }
                    unseen += 1;
                    SENTINEL_RANK
                }
            };
            cells.push(Cell::Number(rank));
        }

        if unseen > 0 {
            tracing::warn!(
                column = column.name(),
                count = unseen,
                "Unseen ordinal categories encoded as sentinel rank"
            );
        }
        Ok(Column::new(column.name(), cells))
    }
}

impl Transformer for OrdinalEncoder {
    type Params = OrdinalEncoderParams;
    type Fitted = FittedOrdinalEncoder;

    fn fit(&self, table: &Table) -> Result<Self::Fitted, FeatureError> {
        if table.n_rows() == 0 {
            return Err(FeatureError::EmptyData(
                "Cannot fit OrdinalEncoder on empty data".to_string(),
            ));
        }

        let columns = self.columns.resolve(table)?;
        let categories_ = columns
            .iter()
            .map(|name| Ok(distinct_sorted(table.require(name)?.cells(), false)))
            .collect::<Result<Vec<_>, FeatureError>>()?;

        tracing::debug!(
            columns = columns.len(),
            categories = categories_.iter().map(Vec::len).sum::<usize>(),
            "Fitted ordinal encoder"
        );

        Ok(FittedOrdinalEncoder {
            columns,
            categories_,
            handle_unknown: self.handle_unknown,
        })
    }
}

impl FittedTransformer for FittedOrdinalEncoder {
    type Params = OrdinalEncoderParams;

    fn transform(&self, table: &Table) -> Result<Table, FeatureError> {
        let encoded = self
            .columns
            .iter()
            .enumerate()
            .map(|(idx, name)| self.encode_column(idx, table.require(name)?))
            .collect::<Result<Vec<_>, _>>()?;

        Table::with_index(table.index().to_vec(), encoded)
    }

    fn extract_params(&self) -> Self::Params {
        OrdinalEncoderParams {
            columns: self.columns.clone(),
            categories_: self.categories_.clone(),
            handle_unknown: self.handle_unknown,
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, FeatureError> {
        if params.columns.len() != params.categories_.len() {
            return Err(FeatureError::InvalidParameter(format!(
                "{} columns but {} category lists",
                params.columns.len(),
                params.categories_.len()
            )));
        }

        // Ranks rely on binary search over the stored order
        let categories_ = params
            .categories_
            .into_iter()
            .map(|mut cats| {
                cats.sort();
                cats.dedup();
                cats
            })
            .collect();

        Ok(FittedOrdinalEncoder {
            columns: params.columns,
            categories_,
            handle_unknown: params.handle_unknown,
        })
    }

    fn n_features_in(&self) -> usize {
        self.columns.len()
    }
}
