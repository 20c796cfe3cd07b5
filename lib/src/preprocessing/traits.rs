//! Core traits for preprocessing transformers.
//!
//! This module defines the two central traits:
//! - [`Transformer`]: Used during fitting; has configuration and learns from a table.
//! - [`FittedTransformer`]: After fitting; applies the learned parameters and
//!   can be persisted.
//!
//! Keeping the two apart is what lets a vocabulary learned on training data be
//! applied unchanged to an inference table.

use crate::preprocessing::error::FeatureError;
use crate::serialization::SerializableParams;
use crate::table::Table;

/// Trait for unfitted transformers.
///
/// # Example
/// ```ignore
/// use housing_features::preprocessing::{OrdinalEncoder, Transformer, FittedTransformer};
///
/// let encoder = OrdinalEncoder::new();
/// let fitted = encoder.fit(&train)?;
/// let ranks = fitted.transform(&test)?;
/// ```
pub trait Transformer: Clone {
    /// Serializable representation of learned parameters.
    type Params: SerializableParams;
    /// The fitted transformer type ready for inference.
    type Fitted: FittedTransformer<Params = Self::Params>;

    /// Fit the transformer to the table.
    ///
    /// # Errors
    /// Returns [`FeatureError`] if:
    /// - The table has no rows
    /// - A selected column is absent
    /// - A cell has a type the transformer cannot learn from
    fn fit(&self, table: &Table) -> Result<Self::Fitted, FeatureError>;

    /// Fit the transformer and transform the same table in one step.
    fn fit_transform(&self, table: &Table) -> Result<Table, FeatureError> {
        let fitted = self.fit(table)?;
        fitted.transform(table)
    }
}

/// Trait for fitted transformers ready for inference.
///
/// # Guarantees
/// - `transform` never mutates its input and returns a new owned table with the
///   input's row index.
/// - `extract_params()` + `from_params()` is a round-trip.
pub trait FittedTransformer: Clone {
    /// Serializable representation of learned parameters.
    type Params: SerializableParams;

    /// Transform a table using the learned parameters.
    ///
    /// Columns are looked up by name, so the table may carry extra columns.
    fn transform(&self, table: &Table) -> Result<Table, FeatureError>;

    /// Extract learned parameters as a serializable representation.
    fn extract_params(&self) -> Self::Params;

    /// Reconstruct a fitted transformer from parameters.
    fn from_params(params: Self::Params) -> Result<Self, FeatureError>
    where
        Self: Sized;

    /// Save the fitted transformer to a file.
    fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> std::io::Result<()> {
        let params = self.extract_params();
        let bytes = params.to_bytes().map_err(std::io::Error::other)?;
        std::fs::write(path, bytes)
    }

    /// Load a fitted transformer from a file.
    fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, FeatureError>
    where
        Self: Sized,
    {
        let bytes = std::fs::read(path)?;
        let params = Self::Params::from_bytes(&bytes)
            .map_err(|e| FeatureError::SerializationError(e.to_string()))?;
        Self::from_params(params)
    }

    /// Returns the number of input columns seen during fit.
    fn n_features_in(&self) -> usize;
}
