//! Model comparison by Pearson correlation of prediction tables.
//!
//! The correlation coefficient is invariant under affine maps `a·x + b`
//! (a > 0) of either input, so two models that differ only by scale and
//! offset correlate at exactly 1.

use serde::{Deserialize, Serialize};

use super::predictor::LeakagePrediction;
use crate::error::{LeakageError, Result};

/// Outcome of comparing two leakage models over all byte values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelComparison {
    /// Label of the first model.
    pub first_label: String,
    /// Label of the second model.
    pub second_label: String,
    /// Prediction table of the first model.
    pub first: Vec<f64>,
    /// Prediction table of the second model.
    pub second: Vec<f64>,
    /// Pearson correlation between the two tables.
    pub correlation: f64,
}

/// Pearson correlation coefficient of two equally long series.
///
/// # Errors
///
/// - [`LeakageError::DimensionMismatch`] if the lengths differ
/// - [`LeakageError::Dimension`] for fewer than two entries
/// - [`LeakageError::ZeroVariance`] if either series is constant
pub fn pearson_correlation(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(LeakageError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    if a.len() < 2 {
        return Err(LeakageError::Dimension(format!(
            "correlation needs at least 2 entries, got {}",
            a.len()
        )));
    }

    let n = a.len() as f64;
    let mean_a = a.iter().sum::<f64>() / n;
    let mean_b = b.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (&x, &y) in a.iter().zip(b) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    if var_a == 0.0 || var_b == 0.0 {
        return Err(LeakageError::ZeroVariance);
    }

    // Clamp rounding overshoot
    Ok((cov / (var_a.sqrt() * var_b.sqrt())).clamp(-1.0, 1.0))
}

/// Compare two models over all 256 byte values.
pub fn compare_models<A, B>(first: &A, second: &B) -> Result<ModelComparison>
where
    A: LeakagePrediction + ?Sized,
    B: LeakagePrediction + ?Sized,
{
    compare_tables(
        first.label(),
        first.prediction_table(),
        second.label(),
        second.prediction_table(),
    )
}

/// Compare two precomputed prediction tables, e.g. a model against a reduced template.
pub fn compare_tables(
    first_label: String,
    first: Vec<f64>,
    second_label: String,
    second: Vec<f64>,
) -> Result<ModelComparison> {
    let correlation = pearson_correlation(&first, &second)?;
    log::debug!(
        "correlation({}, {}) = {:.6}",
        first_label,
        second_label,
        correlation
    );
    Ok(ModelComparison {
        first_label,
        second_label,
        first,
        second,
        correlation,
    })
}
