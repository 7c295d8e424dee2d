//! Fit result types.

use serde::{Deserialize, Serialize};

use crate::basis::BasisKind;
use crate::regression::OlsSolution;

/// Complete result of a leakage-model fit.
///
/// Immutable once produced; serialize it with [`crate::output::to_json`] to
/// hand it to persistence or plotting code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    /// Family the coefficients belong to.
    ///
    /// Only the kind is kept; a Hamming-weight fit does not carry its table.
    pub family: BasisKind,

    /// Fitted coefficients in design-matrix column order.
    ///
    /// When `has_intercept` is set, the last entry is the intercept.
    pub coefficients: Vec<f64>,

    /// Whether the design matrix carried an intercept column.
    pub has_intercept: bool,

    /// Fit-quality statistics.
    pub quality: FitQuality,
}

/// Goodness-of-fit statistics of an OLS fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitQuality {
    /// Number of observations (N).
    pub n_observations: usize,

    /// Number of fitted coefficients (K).
    pub n_parameters: usize,

    /// Residual degrees of freedom (N − K).
    pub df_resid: usize,

    /// Residual sum of squares.
    pub residual_sum_of_squares: f64,

    /// Coefficient of determination; `None` for constant measurements.
    pub r_squared: Option<f64>,

    /// Adjusted coefficient of determination; `None` for constant measurements.
    pub adj_r_squared: Option<f64>,

    /// Standard error of each coefficient, same order as the coefficients.
    pub std_errors: Vec<f64>,
}

impl FitResult {
    pub(crate) fn from_solution(family: BasisKind, has_intercept: bool, solution: OlsSolution) -> Self {
        let n_parameters = solution.coefficients.len();
        Self {
            family,
            coefficients: solution.coefficients.iter().copied().collect(),
            has_intercept,
            quality: FitQuality {
                n_observations: solution.n_observations,
                n_parameters,
                df_resid: solution.df_resid,
                residual_sum_of_squares: solution.residual_sum_of_squares,
                r_squared: solution.r_squared,
                adj_r_squared: solution.adj_r_squared,
                std_errors: solution.std_errors,
            },
        }
    }

    /// The intercept, if the model has one.
    pub fn intercept(&self) -> Option<f64> {
        if self.has_intercept {
            self.coefficients.last().copied()
        } else {
            None
        }
    }

    /// Coefficients of the basis functions, without the intercept.
    pub fn slopes(&self) -> &[f64] {
        if self.has_intercept {
            &self.coefficients[..self.coefficients.len().saturating_sub(1)]
        } else {
            &self.coefficients
        }
    }

    /// t statistic of each coefficient (estimate / standard error).
    ///
    /// Entries are infinite or NaN for a perfect fit, where the standard errors vanish.
    pub fn t_values(&self) -> Vec<f64> {
        self.coefficients
            .iter()
            .zip(&self.quality.std_errors)
            .map(|(b, se)| b / se)
            .collect()
    }
}
