//! Synthetic leakage data for experiments and tests.
//!
//! All generators take an explicit seed and use `Xoshiro256PlusPlus`, so a
//! given configuration always produces the same data.

use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::error::{LeakageError, Result};
use crate::prediction::LeakagePrediction;
use crate::types::{IntermediateValue, Measurement};

/// Gaussian leakage of a single bit.
///
/// Half of the observations have value 0 and leak `N(mean_zero, sigma_zero²)`,
/// the other half have value 1 and leak `N(mean_one, sigma_one²)`. Fitting the
/// single-bit model with an intercept recovers `mean_one − mean_zero` as the
/// slope and `mean_zero` as the intercept.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleBitSimulation {
    /// Total number of observations (default: 100).
    pub samples: usize,
    /// Mean leakage of bit value 0 (default: 10.0).
    pub mean_zero: f64,
    /// Standard deviation of bit value 0 (default: 2.0).
    pub sigma_zero: f64,
    /// Mean leakage of bit value 1 (default: 20.0).
    pub mean_one: f64,
    /// Standard deviation of bit value 1 (default: 4.0).
    pub sigma_one: f64,
    /// RNG seed (default: 0).
    pub seed: u64,
}

impl Default for SingleBitSimulation {
    fn default() -> Self {
        Self {
            samples: 100,
            mean_zero: 10.0,
            sigma_zero: 2.0,
            mean_one: 20.0,
            sigma_one: 4.0,
            seed: 0,
        }
    }
}

impl SingleBitSimulation {
    /// Generate `(values, measurements)`: zeros first, then ones.
    ///
    /// With an odd sample count the extra observation has value 1.
    pub fn generate(&self) -> Result<(Vec<IntermediateValue>, Vec<Measurement>)> {
        let zero = gaussian(self.mean_zero, self.sigma_zero)?;
        let one = gaussian(self.mean_one, self.sigma_one)?;
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(self.seed);

        let n_zero = self.samples / 2;
        let mut values = Vec::with_capacity(self.samples);
        let mut measurements = Vec::with_capacity(self.samples);
        for i in 0..self.samples {
            if i < n_zero {
                values.push(0);
                measurements.push(zero.sample(&mut rng));
            } else {
                values.push(1);
                measurements.push(one.sample(&mut rng));
            }
        }
        Ok((values, measurements))
    }
}

/// Measurements `model(v) + N(0, noise_sigma²)` for each value.
pub fn simulate_measurements<M>(
    values: &[IntermediateValue],
    model: &M,
    noise_sigma: f64,
    seed: u64,
) -> Result<Vec<Measurement>>
where
    M: LeakagePrediction + ?Sized,
{
    let noise = gaussian(0.0, noise_sigma)?;
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    Ok(values
        .iter()
        .map(|&v| model.predict(v) + noise.sample(&mut rng))
        .collect())
}

fn gaussian(mean: f64, sigma: f64) -> Result<Normal<f64>> {
    if !mean.is_finite() || !sigma.is_finite() || sigma < 0.0 {
        return Err(LeakageError::InvalidConfig {
            message: format!(
                "Gaussian needs a finite mean and a finite non-negative sigma, got N({}, {}²)",
                mean, sigma
            ),
        });
    }
    Normal::new(mean, sigma).map_err(|e| LeakageError::InvalidConfig {
        message: e.to_string(),
    })
}
