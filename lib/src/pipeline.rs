//! Feature pipeline assembling the model-ready table.
//!
//! A [`FeaturePipeline`] holds a [`Schema`] plus the encoding policies. Fitting
//! it on a training table learns the numeric fill values, the ordinal ranks and
//! the nominal vocabulary; the resulting [`FittedFeaturePipeline`] applies
//! exactly that vocabulary to any table with the same columns, so train and
//! test matrices line up column for column.
//!
//! The output of [`FittedFeaturePipeline::complete_data`] is laid out as
//!
//! ```text
//! | numeric (missing -> 0) | ordinal ranks | nominal indicators | target? |
//! ```
//!
//! Indicator names never reuse a numeric, ordinal or target column name; see
//! [`OneHotEncoder`] for the renaming rule.
//!
//! The free functions at the bottom of this module fit the Ames schema on the
//! table they are given and apply it to that same table.

use crate::preprocessing::encoding::{
    weight_modalities, FittedOneHotEncoder, FittedOrdinalEncoder, HandleUnknown, OneHotEncoder,
    OneHotEncoderParams, OrdinalEncoder, OrdinalEncoderParams,
};
use crate::preprocessing::imputation::{
    FittedSimpleImputer, ImputeStrategy, SimpleImputer, SimpleImputerParams,
};
use crate::preprocessing::{ColumnSpec, FeatureError, FittedTransformer, Transformer};
use crate::schema::{Classification, Schema};
use crate::table::Table;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Check a table against the schema, warning once about ignored columns.
fn classify(schema: &Schema, table: &Table) -> Result<Classification, FeatureError> {
    let classification = schema.classify(table)?;
    if !classification.unclassified.is_empty() {
        tracing::warn!(
            columns = ?classification.unclassified,
            "Ignoring columns outside the schema"
        );
    }
    Ok(classification)
}

/// Imputed numeric columns, ordinal ranks, then the target when present.
fn numeric_block(
    schema: &Schema,
    imputer: &FittedSimpleImputer,
    ordinal: &FittedOrdinalEncoder,
    table: &Table,
    classification: &Classification,
) -> Result<Table, FeatureError> {
    let numeric = imputer.transform(table)?;
    let ranks = ordinal.transform(table)?;
    tracing::debug!(
        numeric = numeric.n_cols(),
        ordinal = ranks.n_cols(),
        "Built numeric block"
    );

    let mut block = numeric.hconcat(ranks)?;
    if classification.has_target {
        block.push_column(table.require(&schema.target)?.clone())?;
    }
    Ok(block)
}

/// Unfitted feature pipeline: schema and encoding policies.
///
/// # Example
/// ```ignore
/// use housing_features::{FeaturePipeline, HandleUnknown};
///
/// let fitted = FeaturePipeline::ames()
///     .with_handle_unknown(HandleUnknown::Ignore)
///     .fit(&train)?;
/// let x_train = fitted.complete_data(&train)?;
/// let x_test = fitted.complete_data(&test)?;
/// ```
#[derive(Clone, Debug)]
pub struct FeaturePipeline {
    schema: Schema,
    impute_strategy: ImputeStrategy,
    handle_unknown: HandleUnknown,
}

impl Default for FeaturePipeline {
    fn default() -> Self {
        Self::ames()
    }
}

impl FeaturePipeline {
    /// Pipeline over a custom schema, with constant-zero imputation and
    /// unknown categories ignored.
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            impute_strategy: ImputeStrategy::default(),
            handle_unknown: HandleUnknown::default(),
        }
    }

    /// Pipeline over the built-in Ames Housing schema.
    pub fn ames() -> Self {
        Self::new(Schema::ames())
    }

    /// Set how the encoders treat categories unseen at fit time.
    pub fn with_handle_unknown(mut self, strategy: HandleUnknown) -> Self {
        self.handle_unknown = strategy;
        self
    }

    /// Set the fill strategy for missing numeric values.
    pub fn with_impute_strategy(mut self, strategy: ImputeStrategy) -> Self {
        self.impute_strategy = strategy;
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    fn imputer(&self) -> SimpleImputer {
        SimpleImputer::new(self.impute_strategy.clone())
            .with_columns(ColumnSpec::names(&self.schema.numeric))
    }

    fn ordinal_encoder(&self) -> OrdinalEncoder {
        OrdinalEncoder::new()
            .with_columns(ColumnSpec::names(&self.schema.ordinal))
            .with_handle_unknown(self.handle_unknown)
    }

    fn one_hot_encoder(&self) -> OneHotEncoder {
        let mut reserved: Vec<&str> = Vec::new();
        reserved.extend(self.schema.numeric.iter().map(String::as_str));
        reserved.extend(self.schema.ordinal.iter().map(String::as_str));
        reserved.push(&self.schema.target);

        OneHotEncoder::new()
            .with_columns(ColumnSpec::names(&self.schema.nominal))
            .with_handle_unknown(self.handle_unknown)
            .with_reserved_names(&reserved)
    }

    /// Fit all three encoders on a table already checked against the schema.
    fn fit_encoders(&self, table: &Table) -> Result<FittedFeaturePipeline, FeatureError> {
        let fitted = FittedFeaturePipeline {
            schema: self.schema.clone(),
            imputer: self.imputer().fit(table)?,
            ordinal: self.ordinal_encoder().fit(table)?,
            one_hot: self.one_hot_encoder().fit(table)?,
        };
        tracing::info!(
            rows = table.n_rows(),
            features = fitted.n_features_out(),
            "Fitted feature pipeline"
        );
        Ok(fitted)
    }
}

impl Transformer for FeaturePipeline {
    type Params = FeaturePipelineParams;
    type Fitted = FittedFeaturePipeline;

    /// Learn fill values and vocabularies from a training table.
    ///
    /// # Errors
    /// - [`FeatureError::InvalidParameter`] if the schema groups overlap
    /// - [`FeatureError::MissingColumn`] if a schema column is absent
    /// - [`FeatureError::EmptyData`] if the table has no rows
    /// - [`FeatureError::NonNumeric`] if a numeric column holds text
    fn fit(&self, table: &Table) -> Result<Self::Fitted, FeatureError> {
        self.schema.validate()?;
        classify(&self.schema, table)?;
        self.fit_encoders(table)
    }
}

/// Serializable parameters for a fitted feature pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeaturePipelineParams {
    pub schema: Schema,
    pub imputer: SimpleImputerParams,
    pub ordinal: OrdinalEncoderParams,
    pub one_hot: OneHotEncoderParams,
}

/// Fitted feature pipeline ready to build feature tables.
#[derive(Clone, Debug)]
pub struct FittedFeaturePipeline {
    schema: Schema,
    imputer: FittedSimpleImputer,
    ordinal: FittedOrdinalEncoder,
    one_hot: FittedOneHotEncoder,
}

impl FittedFeaturePipeline {
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Fitted ordinal encoder, for inspecting the learned ranks.
    pub fn ordinal_encoder(&self) -> &FittedOrdinalEncoder {
        &self.ordinal
    }

    /// Fitted one-hot encoder, for inspecting the learned vocabulary.
    pub fn one_hot_encoder(&self) -> &FittedOneHotEncoder {
        &self.one_hot
    }

    /// Number of feature columns produced by [`complete_data`](Self::complete_data),
    /// not counting the target.
    pub fn n_features_out(&self) -> usize {
        self.imputer.columns().len() + self.ordinal.columns().len() + self.one_hot.n_features_out()
    }

    /// Feature column names in output order, not counting the target.
    pub fn feature_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.imputer.columns().to_vec();
        names.extend_from_slice(self.ordinal.columns());
        names.extend(self.one_hot.feature_names());
        names
    }

    /// Numeric columns with missing values filled, the ordinal ranks to their
    /// right, and the target last when present.
    pub fn numerical_data(&self, table: &Table) -> Result<Table, FeatureError> {
        let classification = classify(&self.schema, table)?;
        numeric_block(&self.schema, &self.imputer, &self.ordinal, table, &classification)
    }

    /// Nominal block: indicator columns when `one_hot` is set, otherwise the
    /// projected raw nominal columns.
    pub fn categorical_data(&self, table: &Table, one_hot: bool) -> Result<Table, FeatureError> {
        classify(&self.schema, table)?;
        self.nominal_block(table, one_hot)
    }

    fn nominal_block(&self, table: &Table, one_hot: bool) -> Result<Table, FeatureError> {
        let block = if one_hot {
            self.one_hot.transform(table)?
        } else {
            table.select(&self.schema.nominal)?
        };
        tracing::debug!(columns = block.n_cols(), one_hot, "Built nominal block");
        Ok(block)
    }

    /// Ordinal ranks only.
    pub fn ordinal_data(&self, table: &Table) -> Result<Table, FeatureError> {
        classify(&self.schema, table)?;
        self.ordinal.transform(table)
    }

    /// The full feature table, target last when present.
    pub fn complete_data(&self, table: &Table) -> Result<Table, FeatureError> {
        let classification = classify(&self.schema, table)?;
        self.assemble(table, &classification)
    }

    fn assemble(
        &self,
        table: &Table,
        classification: &Classification,
    ) -> Result<Table, FeatureError> {
        let mut numeric =
            numeric_block(&self.schema, &self.imputer, &self.ordinal, table, classification)?;
        let target = numeric.take_column(&self.schema.target);
        let nominal = self.nominal_block(table, true)?;

        let mut complete = numeric.hconcat(nominal)?;
        if let Some(target) = target {
            complete.push_column(target)?;
        }

        tracing::info!(
            rows = complete.n_rows(),
            columns = complete.n_cols(),
            "Assembled feature table"
        );
        Ok(complete)
    }

    /// Inputs for factor analysis of mixed data: the numeric block as returned
    /// by [`numerical_data`](Self::numerical_data) and the indicator block
    /// rescaled by [`weight_modalities`].
    pub fn famd_data(&self, table: &Table) -> Result<(Table, Table), FeatureError> {
        let classification = classify(&self.schema, table)?;
        self.famd(table, &classification)
    }

    fn famd(
        &self,
        table: &Table,
        classification: &Classification,
    ) -> Result<(Table, Table), FeatureError> {
        let numeric =
            numeric_block(&self.schema, &self.imputer, &self.ordinal, table, classification)?;
        let nominal = weight_modalities(self.nominal_block(table, true)?)?;
        Ok((numeric, nominal))
    }
}

impl FittedTransformer for FittedFeaturePipeline {
    type Params = FeaturePipelineParams;

    fn transform(&self, table: &Table) -> Result<Table, FeatureError> {
        self.complete_data(table)
    }

    fn extract_params(&self) -> Self::Params {
        FeaturePipelineParams {
            schema: self.schema.clone(),
            imputer: self.imputer.extract_params(),
            ordinal: self.ordinal.extract_params(),
            one_hot: self.one_hot.extract_params(),
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, FeatureError> {
        params.schema.validate()?;
        let fitted = Self {
            imputer: FittedSimpleImputer::from_params(params.imputer)?,
            ordinal: FittedOrdinalEncoder::from_params(params.ordinal)?,
            one_hot: FittedOneHotEncoder::from_params(params.one_hot)?,
            schema: params.schema,
        };

        if fitted.imputer.columns() != fitted.schema.numeric.as_slice()
            || fitted.ordinal.columns() != fitted.schema.ordinal.as_slice()
            || fitted.one_hot.columns() != fitted.schema.nominal.as_slice()
        {
            return Err(FeatureError::InvalidParameter(
                "fitted columns do not match the schema groups".to_string(),
            ));
        }

        let mut seen: HashSet<String> = HashSet::new();
        seen.insert(fitted.schema.target.clone());
        if let Some(dup) = fitted.feature_names().into_iter().find(|n| !seen.insert(n.clone())) {
            return Err(FeatureError::DuplicateColumn(dup));
        }
        Ok(fitted)
    }

    fn n_features_in(&self) -> usize {
        self.schema.numeric.len() + self.schema.ordinal.len() + self.schema.nominal.len()
    }
}

/// Numeric block of an Ames table: numeric columns with missing values set to
/// 0, ordinal ranks, then `SalePrice` if present.
pub fn numerical_data(table: &Table) -> Result<Table, FeatureError> {
    let pipeline = FeaturePipeline::ames();
    let classification = classify(&pipeline.schema, table)?;
    let imputer = pipeline.imputer().fit(table)?;
    let ordinal = pipeline.ordinal_encoder().fit(table)?;
    numeric_block(&pipeline.schema, &imputer, &ordinal, table, &classification)
}

/// Nominal block of an Ames table, one-hot encoded or raw.
pub fn categorical_data(table: &Table, one_hot: bool) -> Result<Table, FeatureError> {
    let pipeline = FeaturePipeline::ames();
    classify(&pipeline.schema, table)?;
    if !one_hot {
        return table.select(&pipeline.schema.nominal);
    }
    pipeline.one_hot_encoder().fit(table)?.transform(table)
}

/// Ordinal ranks of an Ames table.
pub fn ordinal_data(table: &Table) -> Result<Table, FeatureError> {
    let pipeline = FeaturePipeline::ames();
    classify(&pipeline.schema, table)?;
    pipeline.ordinal_encoder().fit(table)?.transform(table)
}

/// Complete feature table of an Ames table.
pub fn complete_data(table: &Table) -> Result<Table, FeatureError> {
    let pipeline = FeaturePipeline::ames();
    let classification = classify(&pipeline.schema, table)?;
    pipeline.fit_encoders(table)?.assemble(table, &classification)
}

/// Numeric block and weighted indicator block of an Ames table.
pub fn famd_data(table: &Table) -> Result<(Table, Table), FeatureError> {
    let pipeline = FeaturePipeline::ames();
    let classification = classify(&pipeline.schema, table)?;
    pipeline.fit_encoders(table)?.famd(table, &classification)
}
