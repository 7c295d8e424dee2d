//! Reduced templates: the mean measurement of every intermediate value.
//!
//! A reduced template keeps only the per-value mean (no covariance). It is
//! the most expressive byte leakage model and the usual reference when
//! comparing fitted models. With few traces some byte values are never
//! observed; those bins stay empty until the caller fills them from another
//! template via [`ReducedTemplate::fill_missing_from`].

use serde::{Deserialize, Serialize};

use crate::constants::NUM_BYTE_VALUES;
use crate::error::{LeakageError, Result};
use crate::types::{IntermediateValue, Measurement};

/// Per-value mean measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReducedTemplate {
    /// Mean of each bin, `None` for bins without observations.
    means: Vec<Option<f64>>,
    /// Observations per bin.
    counts: Vec<usize>,
}

impl ReducedTemplate {
    /// Bin measurements by intermediate value and average each bin.
    ///
    /// # Errors
    ///
    /// - [`LeakageError::DimensionMismatch`] if the sequences differ in length
    /// - [`LeakageError::Dimension`] if they are empty
    pub fn from_observations(values: &[IntermediateValue], measurements: &[Measurement]) -> Result<Self> {
        if values.len() != measurements.len() {
            return Err(LeakageError::DimensionMismatch {
                expected: values.len(),
                actual: measurements.len(),
            });
        }
        if values.is_empty() {
            return Err(LeakageError::Dimension(
                "cannot build a template from zero observations".to_string(),
            ));
        }

        let mut sums = vec![0.0; NUM_BYTE_VALUES];
        let mut counts = vec![0usize; NUM_BYTE_VALUES];
        for (&v, &y) in values.iter().zip(measurements) {
            sums[v as usize] += y;
            counts[v as usize] += 1;
        }

        let means = sums
            .iter()
            .zip(&counts)
            .map(|(&sum, &count)| (count > 0).then(|| sum / count as f64))
            .collect();

        let template = Self { means, counts };
        let missing = template.missing_values().len();
        if missing > 0 {
            log::warn!(
                "reduced template has {} empty bins out of {} ({} observations)",
                missing,
                NUM_BYTE_VALUES,
                values.len()
            );
        }
        Ok(template)
    }

    /// Mean of `value`'s bin, if it has observations.
    pub fn mean(&self, value: IntermediateValue) -> Option<f64> {
        self.means[value as usize]
    }

    /// Number of observations in `value`'s bin.
    pub fn count(&self, value: IntermediateValue) -> usize {
        self.counts[value as usize]
    }

    /// Byte values whose bin is empty, ascending.
    pub fn missing_values(&self) -> Vec<IntermediateValue> {
        self.means
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_none())
            .map(|(v, _)| v as IntermediateValue)
            .collect()
    }

    /// Whether every bin has a mean.
    pub fn is_complete(&self) -> bool {
        self.means.iter().all(Option::is_some)
    }

    /// Copy the fallback's means into this template's empty bins.
    ///
    /// Bins that already have observations are left untouched. Returns the
    /// number of bins filled. Bins empty in both templates stay empty.
    pub fn fill_missing_from(&mut self, fallback: &ReducedTemplate) -> usize {
        let mut filled = 0;
        for (mean, fallback_mean) in self.means.iter_mut().zip(&fallback.means) {
            if mean.is_none() && fallback_mean.is_some() {
                *mean = *fallback_mean;
                filled += 1;
            }
        }
        if filled > 0 {
            log::warn!("filled {} empty template bins from fallback", filled);
        }
        filled
    }

    /// Mean of every byte value, indexed by value.
    ///
    /// # Errors
    ///
    /// [`LeakageError::IncompleteTemplate`] while any bin is empty.
    pub fn prediction_table(&self) -> Result<Vec<Measurement>> {
        let missing = self.missing_values();
        if !missing.is_empty() {
            return Err(LeakageError::IncompleteTemplate { missing });
        }
        Ok(self.means.iter().flatten().copied().collect())
    }
}
