//! Leakage prediction from fitted or fixed models.

use crate::basis::{BasisFamily, BasisFunction};
use crate::constants::NUM_BYTE_VALUES;
use crate::error::{LeakageError, Result};
use crate::result::FitResult;
use crate::tables::HammingWeightTable;
use crate::types::{Coefficients, IntermediateValue, Measurement};

/// A model that predicts the leakage of every intermediate value.
pub trait LeakagePrediction {
    /// Predicted measurement for `value`.
    fn predict(&self, value: IntermediateValue) -> Measurement;

    /// Short human-readable label for reports.
    fn label(&self) -> String;

    /// Predictions for all 256 byte values, indexed by value.
    fn prediction_table(&self) -> Vec<Measurement> {
        (0..NUM_BYTE_VALUES)
            .map(|v| self.predict(v as IntermediateValue))
            .collect()
    }
}

/// Predictor reconstructed from fitted coefficients.
///
/// `predict(v) = dot(features(v) [+ 1], β)`.
#[derive(Debug, Clone)]
pub struct FittedPredictor {
    basis: BasisFamily,
    coefficients: Coefficients,
    include_intercept: bool,
}

impl FittedPredictor {
    /// Pair coefficients with the family and intercept convention they were fitted with.
    ///
    /// # Errors
    ///
    /// [`LeakageError::DimensionMismatch`] if the coefficient count differs
    /// from `feature_count() + include_intercept`.
    pub fn new(basis: BasisFamily, coefficients: Coefficients, include_intercept: bool) -> Result<Self> {
        let expected = basis.feature_count() + usize::from(include_intercept);
        if coefficients.len() != expected {
            return Err(LeakageError::DimensionMismatch {
                expected,
                actual: coefficients.len(),
            });
        }
        Ok(Self {
            basis,
            coefficients,
            include_intercept,
        })
    }

    /// Predictor for a fit result.
    ///
    /// Only the family kind is recorded in a [`FitResult`], not its lookup
    /// table. A Hamming-weight predictor therefore evaluates with the table
    /// in `basis`, which must be the table the coefficients were fitted
    /// with. [`LeakageModel::predictor`](crate::LeakageModel::predictor)
    /// reuses the model's own family and always satisfies this.
    ///
    /// # Errors
    ///
    /// [`LeakageError::FamilyMismatch`] if `result` was fitted with another family.
    pub fn from_fit(basis: BasisFamily, result: &FitResult) -> Result<Self> {
        if basis.kind() != result.family {
            return Err(LeakageError::FamilyMismatch {
                expected: basis.kind().to_string(),
                actual: result.family.to_string(),
            });
        }
        let coefficients = Coefficients::from_column_slice(&result.coefficients);
        Self::new(basis, coefficients, result.has_intercept)
    }

    /// The coefficients.
    pub fn coefficients(&self) -> &Coefficients {
        &self.coefficients
    }

    /// The family.
    pub fn basis(&self) -> &BasisFamily {
        &self.basis
    }
}

impl LeakagePrediction for FittedPredictor {
    fn predict(&self, value: IntermediateValue) -> Measurement {
        let n_features = self.basis.feature_count();
        let features = self.basis.features(value);
        let mut prediction: f64 = features
            .iter()
            .zip(self.coefficients.iter())
            .map(|(x, b)| x * b)
            .sum();
        if self.include_intercept {
            prediction += self.coefficients[n_features];
        }
        prediction
    }

    fn label(&self) -> String {
        format!("{} fitted", self.basis.name())
    }
}

/// Raw Hamming weight, ignoring any fitted coefficients.
///
/// Correlates with a fitted Hamming-weight model at exactly 1, since the
/// fitted model is an affine map of it.
#[derive(Debug, Clone)]
pub struct PureHammingWeight {
    table: HammingWeightTable,
}

impl PureHammingWeight {
    /// Predictor reading the given table.
    pub fn new(table: HammingWeightTable) -> Self {
        Self { table }
    }
}

impl LeakagePrediction for PureHammingWeight {
    fn predict(&self, value: IntermediateValue) -> Measurement {
        self.table.weight(value) as f64
    }

    fn label(&self) -> String {
        "HammingWeight pure".to_string()
    }
}
