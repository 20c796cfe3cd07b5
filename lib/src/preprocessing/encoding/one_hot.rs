//! One-hot encoding for categorical features.
//!
//! Expands each categorical column into one indicator column per category.

use crate::preprocessing::columns::ColumnSpec;
use crate::preprocessing::encoding::category::{distinct_sorted, Category};
use crate::preprocessing::encoding::HandleUnknown;
use crate::preprocessing::error::FeatureError;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use crate::table::{Cell, Column, Table};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One-hot encoder for categorical features.
///
/// Every distinct value of a selected column becomes an indicator column named
/// `<column>_<value>`. Missing values are a category of their own (labelled
/// `nan`) when they occur during fit. There is no cap on the number of
/// categories per column.
///
/// Indicator names are unique. A name that repeats an earlier indicator or one
/// of the reserved names (see [`with_reserved_names`](Self::with_reserved_names))
/// gets the smallest suffix `_2`, `_3`, ... not taken by any other name, so
/// `Code = [20, "20"]` gives `Code_20` and `Code_20_2`.
///
/// # Example
/// ```ignore
/// use housing_features::preprocessing::{OneHotEncoder, Transformer, FittedTransformer};
///
/// // Street: ["Pave", "Pave", "Grvl"]
/// let fitted = OneHotEncoder::new().fit(&data)?;
/// let encoded = fitted.transform(&data)?;
/// // Street_Grvl: [0, 0, 1]
/// // Street_Pave: [1, 1, 0]
/// ```
#[derive(Clone, Debug, Default)]
pub struct OneHotEncoder {
    columns: ColumnSpec,
    /// How to handle unknown categories during transform.
    handle_unknown: HandleUnknown,
    /// Names of other output columns that indicators must not reuse.
    reserved: Vec<String>,
}

impl OneHotEncoder {
    /// Create a new OneHotEncoder over all columns, ignoring unknowns.
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

    /// Names the indicators will sit next to in an assembled table.
    pub fn with_reserved_names<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        self.reserved = names.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }
}

/// Serializable parameters for a fitted OneHotEncoder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OneHotEncoderParams {
    /// Encoded column names.
    pub columns: Vec<String>,
    /// Sorted categories for each column.
    pub categories_: Vec<Vec<Category>>,
    /// Indicator name of each category, aligned with `categories_`.
    pub feature_names_: Vec<Vec<String>>,
    /// Handle unknown strategy.
    pub handle_unknown: HandleUnknown,
}

/// Fitted OneHotEncoder ready for inference.
#[derive(Clone, Debug)]
pub struct FittedOneHotEncoder {
    columns: Vec<String>,
    categories_: Vec<Vec<Category>>,
    feature_names_: Vec<Vec<String>>,
    handle_unknown: HandleUnknown,
}

impl FittedOneHotEncoder {
    /// Encoded column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Get the categories learned for each column.
    pub fn categories(&self) -> &[Vec<Category>] {
        &self.categories_
    }

    /// Get the number of indicator columns produced.
    pub fn n_features_out(&self) -> usize {
        self.categories_.iter().map(Vec::len).sum()
    }

    /// Indicator column names, in output order.
    pub fn feature_names(&self) -> Vec<String> {
        self.feature_names_.iter().flatten().cloned().collect()
    }

    fn expand_column(&self, idx: usize, column: &Column) -> Result<Vec<Column>, FeatureError> {
        let cats = &self.categories_[idx];
        let mut indicators = vec![vec![0.0f64; column.len()]; cats.len()];
        let mut unseen = 0usize;

        for (row, cell) in column.cells().iter().enumerate() {
            let category = Category::from_cell(cell);
            match cats.binary_search(&category) {
                Ok(pos) => indicators[pos][row] = 1.0,
                Err(_) => {
                    if self.handle_unknown == HandleUnknown::Error {
                        return Err(FeatureError::UnseenCategory {
                            column: column.name().to_string(),
                            value: category.label(),
                        });
                    }
                    // Ignore leaves the row all zeros
                    unseen += 1;
                }
            }
        }

        if unseen > 0 {
            tracing::warn!(
                column = column.name(),
                count = unseen,
                "Unseen nominal categories encoded as all-zero indicators"
            );
        }

        Ok(self.feature_names_[idx]
            .iter()
            .zip(indicators)
            .map(|(name, values)| {
                Column::new(name.as_str(), values.into_iter().map(Cell::Number).collect())
            })
            .collect())
    }
}

/// Unique indicator names for the given columns and their sorted categories.
///
/// The first occurrence of `<column>_<label>` keeps it unless it is reserved;
/// every later or reserved occurrence takes the smallest free `_<k>` suffix,
/// `k >= 2`. Suffixed names never match any plain name.
fn indicator_names(
    columns: &[String],
    categories: &[Vec<Category>],
    reserved: &[String],
) -> Vec<Vec<String>> {
    let plain: Vec<Vec<String>> = columns
        .iter()
        .zip(categories)
        .map(|(name, cats)| cats.iter().map(|c| format!("{}_{}", name, c.label())).collect())
        .collect();

    let reserved: HashSet<&str> = reserved.iter().map(String::as_str).collect();
    let mut taken: HashSet<String> = reserved.iter().map(|s| s.to_string()).collect();
    taken.extend(plain.iter().flatten().cloned());
    let mut kept: HashSet<String> = HashSet::new();

    let mut unique = Vec::with_capacity(plain.len());
    for names in plain {
        let mut column_names = Vec::with_capacity(names.len());
        for name in names {
            if !reserved.contains(name.as_str()) && kept.insert(name.clone()) {
                column_names.push(name);
                continue;
            }
            let mut k = 2usize;
            let renamed = loop {
                let candidate = format!("{}_{}", name, k);
                if taken.insert(candidate.clone()) {
                    break candidate;
                }
                k += 1;
            };
            tracing::debug!(from = %name, to = %renamed, "Renamed colliding indicator");
            column_names.push(renamed);
        }
        unique.push(column_names);
    }
    unique
}

impl Transformer for OneHotEncoder {
    type Params = OneHotEncoderParams;
    type Fitted = FittedOneHotEncoder;

    fn fit(&self, table: &Table) -> Result<Self::Fitted, FeatureError> {
        if table.n_rows() == 0 {
            return Err(FeatureError::EmptyData(
                "Cannot fit OneHotEncoder on empty data".to_string(),
            ));
        }

        let columns = self.columns.resolve(table)?;
        let categories_ = columns
            .iter()
            .map(|name| Ok(distinct_sorted(table.require(name)?.cells(), true)))
            .collect::<Result<Vec<_>, FeatureError>>()?;
        let feature_names_ = indicator_names(&columns, &categories_, &self.reserved);

        let fitted = FittedOneHotEncoder {
            columns,
            categories_,
            feature_names_,
            handle_unknown: self.handle_unknown,
        };
        tracing::debug!(
            columns = fitted.columns.len(),
            indicators = fitted.n_features_out(),
            "Fitted one-hot encoder"
        );
        Ok(fitted)
    }
}

impl FittedTransformer for FittedOneHotEncoder {
    type Params = OneHotEncoderParams;

    fn transform(&self, table: &Table) -> Result<Table, FeatureError> {
        let mut encoded = Table::empty(table.index().to_vec());
        for (idx, name) in self.columns.iter().enumerate() {
            for indicator in self.expand_column(idx, table.require(name)?)? {
                encoded.push_column(indicator)?;
            }
        }
        Ok(encoded)
    }

    fn extract_params(&self) -> Self::Params {
        OneHotEncoderParams {
            columns: self.columns.clone(),
            categories_: self.categories_.clone(),
            feature_names_: self.feature_names_.clone(),
            handle_unknown: self.handle_unknown,
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, FeatureError> {
        if params.columns.len() != params.categories_.len()
            || params.columns.len() != params.feature_names_.len()
        {
            return Err(FeatureError::InvalidParameter(format!(
                "{} columns but {} category lists and {} name lists",
                params.columns.len(),
                params.categories_.len(),
                params.feature_names_.len()
            )));
        }

        // Lookup relies on binary search, and names are aligned by position
        for (column, (cats, names)) in params
            .columns
            .iter()
            .zip(params.categories_.iter().zip(&params.feature_names_))
        {
            if !cats.windows(2).all(|w| w[0] < w[1]) || cats.len() != names.len() {
                return Err(FeatureError::InvalidParameter(format!(
                    "categories of '{}' are not sorted, distinct and named",
                    column
                )));
            }
        }

        let mut seen = HashSet::new();
        if let Some(dup) = params.feature_names_.iter().flatten().find(|n| !seen.insert(*n)) {
            return Err(FeatureError::DuplicateColumn(dup.clone()));
        }

        Ok(FittedOneHotEncoder {
            columns: params.columns,
            categories_: params.categories_,
            feature_names_: params.feature_names_,
            handle_unknown: params.handle_unknown,
        })
    }

    fn n_features_in(&self) -> usize {
        self.columns.len()
    }
}

/// Weighted-modality rescaling of an indicator block.
///
/// Each column is divided by the square root of its count of ones within this
/// block, as done before factor analysis of mixed data. A column with no ones
/// stays all zeros. Non-indicator cells are rejected.
///
/// # Errors
/// [`FeatureError::NonNumeric`] if a cell holds text.
pub fn weight_modalities(block: Table) -> Result<Table, FeatureError> {
    let index = block.index().to_vec();
    let mut weighted = Table::empty(index);

    for column in block.into_columns() {
        let values = column.to_f64()?;
        let count = values.iter().filter(|&&v| v == 1.0).count();
        let scale = if count > 0 {
            1.0 / (count as f64).sqrt()
        } else {
            0.0
        };
        let (name, _) = column.into_parts();
        let cells = values
            .into_iter()
            .map(|v| Cell::from(v * scale))
            .collect();
        weighted.push_column(Column::new(name, cells))?;
    }

    Ok(weighted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn street() -> Table {
        Table::new(vec![Column::new(
            "Street",
            vec![Cell::from("Pave"), Cell::from("Pave"), Cell::from("Grvl")],
        )])
        .unwrap()
    }

    fn values(table: &Table, name: &str) -> Vec<f64> {
        table.column(name).unwrap().to_f64().unwrap()
    }

    #[test]
    fn test_one_hot_encoder_single_column() {
        let data = street();
        let fitted = OneHotEncoder::new().fit(&data).unwrap();

        assert_eq!(fitted.n_features_in(), 1);
        assert_eq!(fitted.n_features_out(), 2);
        assert_eq!(fitted.feature_names(), vec!["Street_Grvl", "Street_Pave"]);

        let transformed = fitted.transform(&data).unwrap();
        assert_eq!(transformed.column_names(), vec!["Street_Grvl", "Street_Pave"]);
        assert_eq!(values(&transformed, "Street_Pave"), vec![1.0, 1.0, 0.0]);
        assert_eq!(values(&transformed, "Street_Grvl"), vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_one_hot_exactly_one_indicator_per_row() {
        let data = Table::new(vec![
            Column::new(
                "Alley",
                vec![Cell::from("Grvl"), Cell::Missing, Cell::from("Pave")],
            ),
            Column::from_f64("MoSold", vec![2.0, 5.0, 2.0]),
        ])
        .unwrap();

        let fitted = OneHotEncoder::new().fit(&data).unwrap();
        let transformed = fitted.transform(&data).unwrap();

        for (idx, source) in fitted.columns().iter().enumerate() {
            let prefix = format!("{}_", source);
            let siblings: Vec<&Column> = transformed
                .columns()
                .iter()
                .filter(|c| c.name().starts_with(&prefix))
                .collect();
            assert_eq!(siblings.len(), fitted.categories()[idx].len());
            for row in 0..data.n_rows() {
                let ones: f64 = siblings
                    .iter()
                    .map(|c| c.cells()[row].as_f64().unwrap())
                    .sum();
                assert_eq!(ones, 1.0);
            }
        }
    }

    #[test]
    fn test_one_hot_missing_is_own_category() {
        let data = Table::new(vec![Column::new(
            "Fence",
            vec![Cell::Missing, Cell::from("MnPrv")],
        )])
        .unwrap();

        let transformed = OneHotEncoder::new().fit_transform(&data).unwrap();
        assert_eq!(transformed.column_names(), vec!["Fence_MnPrv", "Fence_nan"]);
        assert_eq!(values(&transformed, "Fence_nan"), vec![1.0, 0.0]);
    }

    #[test]
    fn test_one_hot_numeric_labels() {
        let data = Table::new(vec![Column::from_f64("MSSubClass", vec![60.0, 20.0])]).unwrap();
        let transformed = OneHotEncoder::new().fit_transform(&data).unwrap();
        assert_eq!(
            transformed.column_names(),
            vec!["MSSubClass_20", "MSSubClass_60"]
        );
    }

    #[test]
    fn test_one_hot_encoder_unknown_ignore() {
        let train = street();
        let test = Table::new(vec![Column::new("Street", vec![Cell::from("Dirt")])]).unwrap();

        let fitted = OneHotEncoder::new().fit(&train).unwrap();
        let transformed = fitted.transform(&test).unwrap();
        assert_eq!(transformed.shape(), (1, 2));
        assert_eq!(values(&transformed, "Street_Grvl"), vec![0.0]);
        assert_eq!(values(&transformed, "Street_Pave"), vec![0.0]);
    }

    #[test]
    fn test_one_hot_encoder_unknown_error() {
        let train = street();
        let test = Table::new(vec![Column::new("Street", vec![Cell::from("Dirt")])]).unwrap();

        let fitted = OneHotEncoder::new()
            .with_handle_unknown(HandleUnknown::Error)
            .fit(&train)
            .unwrap();
        let result = fitted.transform(&test);
        assert!(matches!(result, Err(FeatureError::UnseenCategory { .. })));
    }

    #[test]
    fn test_one_hot_encoder_empty_data() {
        let result = OneHotEncoder::new().fit(&Table::empty(Vec::new()));
        assert!(matches!(result, Err(FeatureError::EmptyData(_))));
    }

    #[test]
    fn test_one_hot_encoder_no_columns() {
        let data = Table::empty(vec![0, 1]);
        let transformed = OneHotEncoder::new().fit_transform(&data).unwrap();
        assert_eq!(transformed.shape(), (2, 0));
    }

    #[test]
    fn test_one_hot_encoder_serialization() {
        let data = street();
        let fitted = OneHotEncoder::new().fit(&data).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("onehot.bin");
        fitted.save_to_file(&path).unwrap();

        let loaded = FittedOneHotEncoder::load_from_file(&path).unwrap();
        assert_eq!(loaded.feature_names(), fitted.feature_names());
        assert_eq!(
            loaded.transform(&data).unwrap(),
            fitted.transform(&data).unwrap()
        );
    }

    #[test]
    fn test_one_hot_colliding_names() {
        let data = Table::new(vec![
            Column::new("Roof", vec![Cell::from("Hip_Gable"), Cell::from("Flat")]),
            Column::new("Roof_Hip", vec![Cell::from("Gable"), Cell::from("Gable")]),
            Column::new("Code", vec![Cell::from("20"), Cell::from(20.0)]),
        ])
        .unwrap();

        let fitted = OneHotEncoder::new().fit(&data).unwrap();
        assert_eq!(
            fitted.feature_names(),
            vec![
                "Roof_Flat",
                "Roof_Hip_Gable",
                "Roof_Hip_Gable_2",
                "Code_20",
                "Code_20_2",
            ]
        );

        let transformed = fitted.transform(&data).unwrap();
        assert_eq!(values(&transformed, "Roof_Hip_Gable"), vec![1.0, 0.0]);
        assert_eq!(values(&transformed, "Roof_Hip_Gable_2"), vec![1.0, 1.0]);
        // Numbers sort before text
        assert_eq!(values(&transformed, "Code_20"), vec![0.0, 1.0]);
        assert_eq!(values(&transformed, "Code_20_2"), vec![1.0, 0.0]);
    }

    #[test]
    fn test_one_hot_reserved_names() {
        let data = Table::new(vec![Column::new(
            "Sale",
            vec![Cell::from("Price"), Cell::from("Normal")],
        )])
        .unwrap();

        let fitted = OneHotEncoder::new()
            .with_reserved_names(&["Sale_Price", "Sale_Price_2"])
            .fit(&data)
            .unwrap();
        assert_eq!(fitted.feature_names(), vec!["Sale_Normal", "Sale_Price_3"]);
    }

    #[test]
    fn test_one_hot_suffix_skips_plain_names() {
        let data = Table::new(vec![
            Column::new("A", vec![Cell::from("x_2"), Cell::from("x")]),
            Column::new("A_x", vec![Cell::from("2"), Cell::from("2")]),
        ])
        .unwrap();

        let names = OneHotEncoder::new().fit(&data).unwrap().feature_names();
        assert_eq!(names, vec!["A_x", "A_x_2", "A_x_2_2"]);
    }

    #[test]
    fn test_one_hot_from_params_rejects_duplicate_names() {
        let fitted = OneHotEncoder::new().fit(&street()).unwrap();
        let mut params = fitted.extract_params();
        params.feature_names_[0][1] = params.feature_names_[0][0].clone();

        let result = FittedOneHotEncoder::from_params(params);
        assert!(matches!(result, Err(FeatureError::DuplicateColumn(_))));
    }

    #[test]
    fn test_weight_modalities() {
        let encoded = OneHotEncoder::new().fit_transform(&street()).unwrap();
        let weighted = weight_modalities(encoded).unwrap();

        let pave = values(&weighted, "Street_Pave");
        let expected = 1.0 / 2.0f64.sqrt();
        assert!((pave[0] - expected).abs() < 1e-12);
        assert!((pave[1] - expected).abs() < 1e-12);
        assert_eq!(pave[2], 0.0);
        assert_eq!(values(&weighted, "Street_Grvl"), vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_weight_modalities_zero_count() {
        let block = Table::new(vec![Column::from_f64("Street_Dirt", vec![0.0, 0.0])]).unwrap();
        let weighted = weight_modalities(block).unwrap();
        assert_eq!(values(&weighted, "Street_Dirt"), vec![0.0, 0.0]);
    }
}
