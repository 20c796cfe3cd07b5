//! Simple Imputer.
//!
//! Fills missing numeric cells with a per-column statistic. The default is the
//! constant 0, which reads a missing area or count as "not present".
//!
//! # Example
//! ```ignore
//! use housing_features::preprocessing::{SimpleImputer, ImputeStrategy, Transformer};
//!
//! let imputer = SimpleImputer::new(ImputeStrategy::Constant(0.0));
//! let imputed = imputer.fit_transform(&numeric)?;
//! ```

use crate::preprocessing::columns::ColumnSpec;
use crate::preprocessing::error::FeatureError;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use crate::table::{Cell, Column, Table};
use serde::{Deserialize, Serialize};

/// Strategy for imputing missing values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ImputeStrategy {
    /// Replace missing values with a constant value.
    Constant(f64),
    /// Replace missing values with the mean of each column.
    Mean,
    /// Replace missing values with the median of each column.
    Median,
}

impl Default for ImputeStrategy {
    fn default() -> Self {
        ImputeStrategy::Constant(0.0)
    }
}

/// Serializable parameters for a fitted SimpleImputer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimpleImputerParams {
    /// Strategy used for imputation.
    pub strategy: ImputeStrategy,
    /// Imputed column names.
    pub columns: Vec<String>,
    /// Statistics (fill values) for each column.
    pub statistics_: Vec<f64>,
}

/// SimpleImputer transformer (unfitted).
#[derive(Clone, Debug, Default)]
pub struct SimpleImputer {
    strategy: ImputeStrategy,
    columns: ColumnSpec,
}

impl SimpleImputer {
    /// Create a new SimpleImputer over all columns with the specified strategy.
    pub fn new(strategy: ImputeStrategy) -> Self {
        Self {
            strategy,
            columns: ColumnSpec::All,
        }
    }

    /// Restrict the imputer to a subset of columns.
    pub fn with_columns(mut self, columns: ColumnSpec) -> Self {
        self.columns = columns;
        self
    }
}

/// Compute the fill value of one column, ignoring missing values.
fn compute_statistic(values: &[f64], strategy: &ImputeStrategy) -> f64 {
    let mut present: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();

    if let ImputeStrategy::Constant(val) = strategy {
        return *val;
    }
    if present.is_empty() {
        return 0.0; // Default to 0 if all values are missing
    }

    match strategy {
        ImputeStrategy::Mean => present.iter().sum::<f64>() / present.len() as f64,
        ImputeStrategy::Median => {
            present.sort_by(f64::total_cmp);
            let n = present.len();
            if n % 2 == 0 {
                (present[n / 2 - 1] + present[n / 2]) / 2.0
            } else {
                present[n / 2]
            }
        }
        ImputeStrategy::Constant(val) => *val,
    }
}

impl Transformer for SimpleImputer {
    type Params = SimpleImputerParams;
    type Fitted = FittedSimpleImputer;

    fn fit(&self, table: &Table) -> Result<Self::Fitted, FeatureError> {
        if table.n_rows() == 0 {
            return Err(FeatureError::EmptyData(
                "Cannot fit SimpleImputer on empty data".to_string(),
            ));
        }

        let columns = self.columns.resolve(table)?;
        let statistics_ = columns
            .iter()
            .map(|name| {
                let values = table.require(name)?.to_f64()?;
                Ok(compute_statistic(&values, &self.strategy))
            })
            .collect::<Result<Vec<_>, FeatureError>>()?;

        Ok(FittedSimpleImputer {
            strategy: self.strategy.clone(),
            columns,
            statistics_,
        })
    }
}

/// Fitted SimpleImputer ready for inference.
#[derive(Clone, Debug)]
pub struct FittedSimpleImputer {
    strategy: ImputeStrategy,
    columns: Vec<String>,
    statistics_: Vec<f64>,
}

impl FittedSimpleImputer {
    /// Get the imputation statistics (fill values) for each column.
    pub fn statistics(&self) -> &[f64] {
        &self.statistics_
    }

    /// Imputed column names, in output order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

impl FittedTransformer for FittedSimpleImputer {
    type Params = SimpleImputerParams;

    fn transform(&self, table: &Table) -> Result<Table, FeatureError> {
        let mut imputed = Table::empty(table.index().to_vec());
        let mut filled = 0usize;

        for (name, &fill) in self.columns.iter().zip(&self.statistics_) {
            let values = table.require(name)?.to_f64()?;
            let cells = values
                .into_iter()
                .map(|v| {
                    if v.is_nan() {
                        filled += 1;
                        Cell::Number(fill)
                    } else {
                        Cell::Number(v)
                    }
                })
                .collect();
            imputed.push_column(Column::new(name.as_str(), cells))?;
        }

        tracing::debug!(
            columns = self.columns.len(),
            filled,
            strategy = ?self.strategy,
            "Imputed numeric block"
        );
        Ok(imputed)
    }

    fn extract_params(&self) -> Self::Params {
        SimpleImputerParams {
            strategy: self.strategy.clone(),
            columns: self.columns.clone(),
            statistics_: self.statistics_.clone(),
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, FeatureError> {
        if params.columns.len() != params.statistics_.len() {
            return Err(FeatureError::InvalidParameter(format!(
                "{} columns but {} statistics",
                params.columns.len(),
                params.statistics_.len()
            )));
        }

        Ok(Self {
            strategy: params.strategy,
            columns: params.columns,
            statistics_: params.statistics_,
        })
    }

    fn n_features_in(&self) -> usize {
        self.columns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_data_with_missing() -> Table {
        // LotArea: [1, 3, 5], LotFrontage: [NaN, 4, 6]
        Table::new(vec![
            Column::from_f64("LotArea", vec![1.0, 3.0, 5.0]),
            Column::from_f64("LotFrontage", vec![f64::NAN, 4.0, 6.0]),
        ])
        .unwrap()
    }

    fn values(table: &Table, name: &str) -> Vec<f64> {
        table.column(name).unwrap().to_f64().unwrap()
    }

    #[test]
    fn test_simple_imputer_default_is_zero() {
        let data = create_test_data_with_missing();
        let imputed = SimpleImputer::default().fit_transform(&data).unwrap();

        assert_eq!(values(&imputed, "LotArea"), vec![1.0, 3.0, 5.0]);
        assert_eq!(values(&imputed, "LotFrontage"), vec![0.0, 4.0, 6.0]);
    }

    #[test]
    fn test_simple_imputer_mean() {
        let data = create_test_data_with_missing();
        let fitted = SimpleImputer::new(ImputeStrategy::Mean).fit(&data).unwrap();

        // LotFrontage: mean of [4, 6] = 5 (NaN excluded)
        assert_eq!(fitted.statistics(), &[3.0, 5.0]);

        let imputed = fitted.transform(&data).unwrap();
        assert_eq!(values(&imputed, "LotFrontage"), vec![5.0, 4.0, 6.0]);
    }

    #[test]
    fn test_simple_imputer_median() {
        let data = Table::new(vec![Column::from_f64(
            "GarageArea",
            vec![1.0, f64::NAN, 10.0, 2.0],
        )])
        .unwrap();
        let fitted = SimpleImputer::new(ImputeStrategy::Median).fit(&data).unwrap();
        assert_eq!(fitted.statistics(), &[2.0]);
    }

    #[test]
    fn test_simple_imputer_all_missing() {
        let data =
            Table::new(vec![Column::from_f64("PoolArea", vec![f64::NAN, f64::NAN])]).unwrap();
        let fitted = SimpleImputer::new(ImputeStrategy::Mean).fit(&data).unwrap();
        assert_eq!(fitted.statistics(), &[0.0]);
    }

    #[test]
    fn test_simple_imputer_stats_reused_on_new_data() {
        let train = create_test_data_with_missing();
        let fitted = SimpleImputer::new(ImputeStrategy::Mean).fit(&train).unwrap();

        let test = Table::new(vec![
            Column::from_f64("LotArea", vec![f64::NAN]),
            Column::from_f64("LotFrontage", vec![f64::NAN]),
        ])
        .unwrap();
        let imputed = fitted.transform(&test).unwrap();
        assert_eq!(values(&imputed, "LotArea"), vec![3.0]);
        assert_eq!(values(&imputed, "LotFrontage"), vec![5.0]);
    }

    #[test]
    fn test_simple_imputer_rejects_text() {
        let data = Table::new(vec![Column::new(
            "LotArea",
            vec![Cell::from(1.0), Cell::from("large")],
        )])
        .unwrap();
        let result = SimpleImputer::default().fit(&data);
        assert!(matches!(result, Err(FeatureError::NonNumeric { row: 1, .. })));
    }

    #[test]
    fn test_simple_imputer_keeps_index() {
        let data = create_test_data_with_missing();
        let imputed = SimpleImputer::default()
            .with_columns(ColumnSpec::names(&["LotFrontage"]))
            .fit_transform(&data)
            .unwrap();
        assert_eq!(imputed.column_names(), vec!["LotFrontage"]);
        assert_eq!(imputed.index(), data.index());
    }

    #[test]
    fn test_simple_imputer_serialization() {
        let data = create_test_data_with_missing();
        let fitted = SimpleImputer::new(ImputeStrategy::Mean).fit(&data).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("imputer.bin");
        fitted.save_to_file(&path).unwrap();

        let loaded = FittedSimpleImputer::load_from_file(&path).unwrap();
        assert_eq!(loaded.statistics(), fitted.statistics());
        assert_eq!(loaded.columns(), fitted.columns());
    }

    #[test]
    fn test_simple_imputer_from_params_mismatch() {
        let params = SimpleImputerParams {
            strategy: ImputeStrategy::Mean,
            columns: vec!["a".to_string()],
            statistics_: vec![],
        };
        let result = FittedSimpleImputer::from_params(params);
        assert!(matches!(result, Err(FeatureError::InvalidParameter(_))));
    }
}
