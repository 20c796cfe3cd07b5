//! Categorical feature encoding transformers.
//!
//! # Available Encoders
//!
//! ## OrdinalEncoder
//! Maps each column's categories to ranks `0..k-1` in sorted order; missing
//! and unknown values get the sentinel rank `-1`.
//!
//! ```ignore
//! // LandSlope: ["Gtl", "Mod", "Gtl", NA]  ->  [0, 1, 0, -1]
//! ```
//!
//! ## OneHotEncoder
//! Expands each column into one indicator column per observed category,
//! named `<column>_<category>`.
//!
//! ```ignore
//! // Street: ["Pave", "Pave", "Grvl"]
//! // Street_Grvl: [0, 0, 1]
//! // Street_Pave: [1, 1, 0]
//! ```
//!
//! # Category order
//!
//! Both encoders learn categories in the order defined by [`Category`]:
//! numbers ascending, then text in byte order, then missing. The same order
//! is used on every fit, so a vocabulary learned once is stable.

mod category;
mod one_hot;
mod ordinal;

pub use category::Category;
pub use one_hot::{weight_modalities, FittedOneHotEncoder, OneHotEncoder, OneHotEncoderParams};
pub use ordinal::{FittedOrdinalEncoder, OrdinalEncoder, OrdinalEncoderParams, SENTINEL_RANK};

/// Strategy for handling categories not seen during fit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum HandleUnknown {
    /// Fail with
    /// [`FeatureError::UnseenCategory`](crate::preprocessing::FeatureError::UnseenCategory).
    Error,
    /// Encode as the sentinel rank (ordinal) or all-zero indicators (one-hot).
    #[default]
    Ignore,
}
