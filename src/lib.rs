//! # leakage-model
//!
//! Fit linear-regression leakage models for side-channel measurements.
//!
//! This crate relates an intermediate byte value of a computation (e.g. an
//! AES S-box output) to a measured leakage sample (e.g. one point of a power
//! trace) with ordinary least squares over a chosen family of basis functions:
//! - Single-bit models: one coefficient per (low-order) bit
//! - Hamming-weight model: one coefficient for the number of set bits
//! - Full-parity model: one coefficient per non-zero bitmask (255 of them)
//!
//! Fitted models predict the leakage of every byte value and can be compared
//! with each other, or with reduced templates, by Pearson correlation.
//!
//! ## Quick Start
//!
//! ```
//! use leakage_model::{
//!     compare_models, BasisFamily, HammingWeightTable, LeakageModel, PureHammingWeight,
//! };
//!
//! let values: Vec<u8> = (0..=255).cycle().take(1024).collect();
//! let measurements: Vec<f64> = values.iter().map(|&v| 1.5 * v.count_ones() as f64 + 80.0).collect();
//!
//! let model = LeakageModel::new(BasisFamily::all_bits());
//! let fit = model.fit(&values, &measurements).unwrap();
//! println!("adjusted R²: {:?}", fit.quality.adj_r_squared);
//!
//! let fitted = model.predictor(&fit).unwrap();
//! let pure = PureHammingWeight::new(HammingWeightTable::popcount());
//! let comparison = compare_models(&fitted, &pure).unwrap();
//! assert!((comparison.correlation - 1.0).abs() < 1e-9);
//! ```
//!
//! Lookup tables (S-box, Hamming weights) are ordinary inputs; the crate
//! holds no global state and every fit is independent.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod config;
mod constants;
mod error;
mod model;
mod result;
mod types;

// Functional modules
pub mod basis;
pub mod output;
pub mod prediction;
pub mod regression;
pub mod simulation;
pub mod tables;
pub mod templates;

// Re-exports for public API
pub use basis::{BasisFamily, BasisFunction, BasisKind};
pub use config::FitConfig;
pub use constants::{BITS_PER_BYTE, FULL_PARITY_FEATURES, NUM_BYTE_VALUES};
pub use error::{LeakageError, Result};
pub use model::LeakageModel;
pub use prediction::{
    compare_models, compare_tables, pearson_correlation, FittedPredictor, LeakagePrediction,
    ModelComparison, PureHammingWeight,
};
pub use result::{FitQuality, FitResult};
pub use simulation::{simulate_measurements, SingleBitSimulation};
pub use tables::{sbox_outputs, HammingWeightTable, SubstitutionTable};
pub use templates::ReducedTemplate;
pub use types::{Coefficients, DesignMatrix, IntermediateValue, Measurement, Observation};

/// Fit `basis` to index-aligned values and measurements with default configuration.
///
/// Shorthand for `LeakageModel::new(basis).fit(values, measurements)`.
pub fn fit(
    basis: BasisFamily,
    values: &[IntermediateValue],
    measurements: &[Measurement],
) -> Result<FitResult> {
    LeakageModel::new(basis).fit(values, measurements)
}
