//! Leakage prediction and model comparison.
//!
//! - [`predictor`]: [`LeakagePrediction`] and the fitted / pure Hamming-weight predictors
//! - [`compare`]: Pearson correlation between 256-entry prediction tables

mod compare;
mod predictor;

pub use compare::{compare_models, compare_tables, pearson_correlation, ModelComparison};
pub use predictor::{FittedPredictor, LeakagePrediction, PureHammingWeight};
