//! Configuration for leakage-model fitting.

use crate::error::{LeakageError, Result};

/// Configuration options for [`LeakageModel`](crate::LeakageModel).
#[derive(Debug, Clone, PartialEq)]
pub struct FitConfig {
    /// Append a constant intercept column as the last design-matrix column (default: true).
    ///
    /// Also selects the R² flavour: centered with an intercept, uncentered without.
    pub include_intercept: bool,

    /// Relative cutoff for the numerical rank of the design matrix (default: None).
    ///
    /// Singular values below `rcond * σ_max` count as zero. `None` uses
    /// `max(N, K) * f64::EPSILON`, the usual least-squares default.
    pub rcond: Option<f64>,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            include_intercept: true,
            rcond: None,
        }
    }
}

impl FitConfig {
    /// Check that all values are in range.
    pub fn validate(&self) -> Result<()> {
        if let Some(rcond) = self.rcond {
            if !rcond.is_finite() || rcond < 0.0 {
                return Err(LeakageError::InvalidConfig {
                    message: format!("rcond must be finite and non-negative, got {}", rcond),
                });
            }
        }
        Ok(())
    }

    /// Absolute singular-value cutoff for an `n_rows` x `n_cols` design
    /// whose largest singular value is `sigma_max`.
    pub fn rank_tolerance(&self, sigma_max: f64, n_rows: usize, n_cols: usize) -> f64 {
        let rcond = self
            .rcond
            .unwrap_or(n_rows.max(n_cols) as f64 * f64::EPSILON);
        rcond * sigma_max
    }
}
