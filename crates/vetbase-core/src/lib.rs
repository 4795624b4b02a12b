pub mod domain;
pub mod error;
pub mod normalize;

pub use domain::*;
pub use error::CoreError;
pub use normalize::{
    normalize_batch, BatchReport, NormalizeOptions, NormalizationResult, Normalizer,
    OverflowPolicy,
};
