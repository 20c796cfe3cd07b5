//! # housing-features
//!
//! Turns the Ames Housing table into a numeric feature table ready for
//! regression models.
//!
//! ## Core Design Principles
//!
//! - **Fixed classification**: which column is numeric, ordinal or nominal is
//!   decided by a [`Schema`], never inferred from cell types. Year and count
//!   columns such as `YrSold` or `MSSubClass` are nominal even though they
//!   parse as numbers.
//! - **Fit / apply separation**: vocabularies are learned once by
//!   [`FeaturePipeline::fit`](preprocessing::Transformer::fit) and applied
//!   unchanged to any table, so train and test matrices share their columns.
//! - **No mutation**: every operation borrows its input and returns a new
//!   [`Table`].
//!
//! ## Quick Start
//!
//! ```ignore
//! use housing_features::{FeaturePipeline, Table, Transformer};
//!
//! let train = Table::from_csv_path("train.csv")?;
//! let test = Table::from_csv_path("test.csv")?;
//!
//! let fitted = FeaturePipeline::ames().fit(&train)?;
//! let x_train = fitted.complete_data(&train)?; // SalePrice last
//! let x_test = fitted.complete_data(&test)?; // no SalePrice column
//!
//! x_train.to_csv_path("train_features.csv")?;
//! ```
//!
//! ## Module Structure
//!
//! - `table`: named-column tables, CSV input and output
//! - `schema`: column groups and the built-in Ames lists
//! - `preprocessing`: imputer and encoders behind the `Transformer` traits
//! - `pipeline`: assembly of the numeric, ordinal and nominal blocks
//! - `serialization`: byte encoding of fitted parameters

/// Feature table assembly.
pub mod pipeline;

/// Column transformers: imputation and categorical encoding.
pub mod preprocessing;

/// Column classification.
pub mod schema;

/// Persistence of fitted parameters.
pub mod serialization;

/// In-memory tables and CSV I/O.
pub mod table;

pub use pipeline::{
    categorical_data, complete_data, famd_data, numerical_data, ordinal_data, FeaturePipeline,
    FeaturePipelineParams, FittedFeaturePipeline,
};
pub use preprocessing::{
    FeatureError, FittedTransformer, HandleUnknown, ImputeStrategy, Transformer,
};
pub use schema::{ColumnGroup, Schema};
pub use table::{Cell, Column, Table};
