//! Type aliases and common types.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// Value of the internal computation whose leakage is modeled.
pub type IntermediateValue = u8;

/// One sample of a side-channel trace.
pub type Measurement = f64;

/// Regression design matrix: one row per observation, one column per basis function.
pub type DesignMatrix = DMatrix<f64>;

/// Fitted weights, one per design-matrix column.
pub type Coefficients = DVector<f64>;

/// An intermediate value paired with the measurement observed while it was processed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Intermediate value.
    pub value: IntermediateValue,
    /// Observed leakage.
    pub measurement: Measurement,
}

impl Observation {
    /// Pair a value with its measurement.
    pub fn new(value: IntermediateValue, measurement: Measurement) -> Self {
        Self { value, measurement }
    }
}

/// Split observations into index-aligned value and measurement vectors.
pub fn split_observations(observations: &[Observation]) -> (Vec<IntermediateValue>, Vec<Measurement>) {
    observations
        .iter()
        .map(|obs| (obs.value, obs.measurement))
        .unzip()
}
