//! Column transformers used to build the feature table.
//!
//! Every transformer comes in two halves:
//!
//! - [`Transformer`]: unfitted, holds configuration (columns, policies)
//! - [`FittedTransformer`]: fitted, holds what was learned and can be saved
//!
//! Transformers take a [`Table`](crate::table::Table) and return a new one with
//! the same row index; input tables are never modified.
//!
//! # Available Transformers
//!
//! ## Imputation
//! - [`SimpleImputer`]: Fill missing numeric values with a constant (default 0), mean or median
//!
//! ## Encoding
//! - [`OrdinalEncoder`]: Ranks in sorted category order, `-1` for missing or unknown
//! - [`OneHotEncoder`]: One indicator column per observed category
//! - [`weight_modalities`]: Rescale an indicator block by its modality counts
//!
//! # Example
//!
//! ```ignore
//! use housing_features::preprocessing::{
//!     ColumnSpec, FittedOrdinalEncoder, FittedTransformer, OrdinalEncoder, Transformer,
//! };
//!
//! let encoder = OrdinalEncoder::new().with_columns(ColumnSpec::names(&["KitchenQual"]));
//! let fitted = encoder.fit(&train)?;
//! fitted.save_to_file("kitchen.bin")?;
//!
//! let loaded = FittedOrdinalEncoder::load_from_file("kitchen.bin")?;
//! let ranks = loaded.transform(&test)?;
//! ```

pub mod columns;
pub mod encoding;
pub mod error;
pub mod imputation;
pub mod traits;

// Re-export main types
pub use columns::ColumnSpec;
pub use encoding::{
    weight_modalities, Category, FittedOneHotEncoder, FittedOrdinalEncoder, HandleUnknown,
    OneHotEncoder, OneHotEncoderParams, OrdinalEncoder, OrdinalEncoderParams, SENTINEL_RANK,
};
pub use error::FeatureError;
pub use imputation::{FittedSimpleImputer, ImputeStrategy, SimpleImputer, SimpleImputerParams};
pub use traits::{FittedTransformer, Transformer};
