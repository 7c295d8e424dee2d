//! Main `LeakageModel` entry point and builder.

use crate::basis::{BasisFamily, BasisFunction};
use crate::config::FitConfig;
use crate::error::Result;
use crate::prediction::FittedPredictor;
use crate::regression::{build_design_matrix, solve_least_squares};
use crate::result::FitResult;
use crate::types::{split_observations, IntermediateValue, Measurement, Observation};

/// Main entry point for fitting leakage models.
///
/// Pick a family, adjust the configuration with the builder methods, then
/// fit it to index-aligned intermediate values and measurements.
///
/// # Example
///
/// ```
/// use leakage_model::{BasisFamily, LeakageModel, LeakagePrediction};
///
/// let values: Vec<u8> = (0..=255).collect();
/// let measurements: Vec<f64> = values.iter().map(|&v| 0.5 * (v & 1) as f64 + 3.0).collect();
///
/// let model = LeakageModel::new(BasisFamily::all_bits());
/// let fit = model.fit(&values, &measurements).unwrap();
/// assert!((fit.coefficients[0] - 0.5).abs() < 1e-9);
///
/// let predictor = model.predictor(&fit).unwrap();
/// assert!((predictor.predict(1) - 3.5).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct LeakageModel {
    basis: BasisFamily,
    config: FitConfig,
}

impl LeakageModel {
    /// Model over `basis` with default configuration (intercept included).
    pub fn new(basis: BasisFamily) -> Self {
        Self {
            basis,
            config: FitConfig::default(),
        }
    }

    /// Model over `basis` with an explicit configuration.
    pub fn with_config(basis: BasisFamily, config: FitConfig) -> Self {
        Self { basis, config }
    }

    /// Include or omit the trailing intercept column.
    pub fn intercept(mut self, include: bool) -> Self {
        self.config.include_intercept = include;
        self
    }

    /// Set the relative singular-value cutoff for the rank check.
    pub fn rcond(mut self, rcond: f64) -> Self {
        self.config.rcond = Some(rcond);
        self
    }

    /// Get the current configuration.
    pub fn config(&self) -> &FitConfig {
        &self.config
    }

    /// Get the basis family.
    pub fn basis(&self) -> &BasisFamily {
        &self.basis
    }

    /// Number of coefficients a fit produces.
    pub fn parameter_count(&self) -> usize {
        self.basis.feature_count() + usize::from(self.config.include_intercept)
    }

    /// Fit the model to index-aligned values and measurements.
    ///
    /// The fit either succeeds with a complete [`FitResult`] or fails
    /// without output; see [`solve_least_squares`] for the error conditions.
    pub fn fit(&self, values: &[IntermediateValue], measurements: &[Measurement]) -> Result<FitResult> {
        self.config.validate()?;
        log::debug!(
            "fitting {} to {} observations ({} parameters)",
            self.basis.name(),
            values.len(),
            self.parameter_count()
        );

        let design = build_design_matrix(values, &self.basis, self.config.include_intercept)?;
        let solution = solve_least_squares(&design, measurements, &self.config)?;

        Ok(FitResult::from_solution(
            self.basis.kind(),
            self.config.include_intercept,
            solution,
        ))
    }

    /// Fit the model to a sequence of observations.
    pub fn fit_observations(&self, observations: &[Observation]) -> Result<FitResult> {
        let (values, measurements) = split_observations(observations);
        self.fit(&values, &measurements)
    }

    /// Predictor for a result fitted with this model's family.
    pub fn predictor(&self, result: &FitResult) -> Result<FittedPredictor> {
        FittedPredictor::from_fit(self.basis.clone(), result)
    }
}
