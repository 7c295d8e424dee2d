//! Ordinary least squares via singular value decomposition.
//!
//! The coefficients minimize `||A·β − y||²`. The solver works on the SVD
//! `A = U·Σ·Vᵀ` rather than the normal equations `AᵀA·β = Aᵀy`: forming
//! `AᵀA` squares the condition number, which matters for the 256-column
//! full-parity design.
//!
//! Besides β the solver reports the usual fit statistics:
//!
//! ```text
//! RSS    = ||y − A·β||²
//! R²     = 1 − RSS / TSS          TSS = Σ(y − ȳ)² with intercept, Σy² without
//! R²_adj = 1 − (1 − R²)·(N − 1)/(N − K)   with intercept
//!        = 1 − (1 − R²)·N/(N − K)         without
//! se(β)  = sqrt(σ̂²·diag((AᵀA)⁻¹)),  σ̂² = RSS/(N − K),  (AᵀA)⁻¹ = V·Σ⁻²·Vᵀ
//! ```

use nalgebra::{DVector, SVD};

use crate::config::FitConfig;
use crate::error::{LeakageError, Result};
use crate::types::{Coefficients, DesignMatrix, Measurement};

/// Solution of a least-squares problem with fit-quality statistics.
#[derive(Debug, Clone)]
pub struct OlsSolution {
    /// Fitted coefficients, in design-matrix column order.
    pub coefficients: Coefficients,

    /// Residual sum of squares.
    pub residual_sum_of_squares: f64,

    /// Coefficient of determination; `None` when the measurements have no spread.
    pub r_squared: Option<f64>,

    /// Adjusted coefficient of determination; `None` when `r_squared` is.
    pub adj_r_squared: Option<f64>,

    /// Standard error of each coefficient.
    pub std_errors: Vec<f64>,

    /// Numerical rank of the design matrix (always equals the column count).
    pub rank: usize,

    /// Residual degrees of freedom, `N − K`.
    pub df_resid: usize,

    /// Number of observations, `N`.
    pub n_observations: usize,
}

/// Solve `design · β ≈ measurements` in the least-squares sense.
///
/// `config.include_intercept` tells the solver whether `design` carries an
/// intercept column, which selects the centered or uncentered R².
///
/// # Errors
///
/// - [`LeakageError::DimensionMismatch`] if `measurements` and `design` disagree on N
/// - [`LeakageError::Dimension`] if N = 0
/// - [`LeakageError::Underdetermined`] if N ≤ K; no minimum-norm solution is returned
/// - [`LeakageError::RankDeficient`] if the columns are numerically collinear
/// - [`LeakageError::NonFiniteMeasurement`] for NaN or infinite measurements
/// - [`LeakageError::NonFiniteDesign`] for NaN or infinite design entries
/// - [`LeakageError::InvalidConfig`] for an invalid `rcond`
pub fn solve_least_squares(
    design: &DesignMatrix,
    measurements: &[Measurement],
    config: &FitConfig,
) -> Result<OlsSolution> {
    config.validate()?;

    let (n, k) = design.shape();
    if measurements.len() != n {
        return Err(LeakageError::DimensionMismatch {
            expected: n,
            actual: measurements.len(),
        });
    }
    if n == 0 {
        return Err(LeakageError::Dimension(
            "least squares is undefined for zero observations".to_string(),
        ));
    }
    if n <= k {
        return Err(LeakageError::Underdetermined {
            observations: n,
            parameters: k,
        });
    }
    if let Some(index) = measurements.iter().position(|y| !y.is_finite()) {
        return Err(LeakageError::NonFiniteMeasurement { index });
    }
    // Column-major storage
    if let Some(pos) = design.iter().position(|x| !x.is_finite()) {
        return Err(LeakageError::NonFiniteDesign {
            row: pos % n,
            col: pos / n,
        });
    }

    let y = DVector::from_column_slice(measurements);

    let svd = SVD::try_new(design.clone(), true, true, f64::EPSILON, 0)
        .ok_or_else(|| LeakageError::Decomposition("SVD did not converge".to_string()))?;

    let sigma_max = svd.singular_values.max();
    let tolerance = config.rank_tolerance(sigma_max, n, k);
    let rank = svd.rank(tolerance);
    if rank < k {
        log::debug!(
            "design matrix rank {} < {} columns (sigma_max={:.3e}, tol={:.3e})",
            rank,
            k,
            sigma_max,
            tolerance
        );
        return Err(LeakageError::RankDeficient {
            rank,
            parameters: k,
        });
    }

    let coefficients = svd
        .solve(&y, tolerance)
        .map_err(|msg| LeakageError::Decomposition(msg.to_string()))?;

    let residuals = &y - design * &coefficients;
    let rss = residuals.norm_squared();
    let df_resid = n - k;

    let tss = if config.include_intercept {
        let mean = y.mean();
        y.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
    } else {
        y.norm_squared()
    };

    let (r_squared, adj_r_squared) = if tss > 0.0 {
        let r2 = 1.0 - rss / tss;
        let numerator = if config.include_intercept { n - 1 } else { n } as f64;
        let adj = 1.0 - (1.0 - r2) * numerator / df_resid as f64;
        (Some(r2), Some(adj))
    } else {
        log::warn!("measurements have zero total sum of squares; R² is undefined");
        (None, None)
    };

    let std_errors = coefficient_std_errors(&svd, rss / df_resid as f64)?;

    log::debug!(
        "OLS fit: N={}, K={}, RSS={:.6e}, R²={:?}, adj R²={:?}",
        n,
        k,
        rss,
        r_squared,
        adj_r_squared
    );

    Ok(OlsSolution {
        coefficients,
        residual_sum_of_squares: rss,
        r_squared,
        adj_r_squared,
        std_errors,
        rank,
        df_resid,
        n_observations: n,
    })
}

/// `sqrt(σ̂² · diag(V·Σ⁻²·Vᵀ))` for a full-rank SVD.
fn coefficient_std_errors(
    svd: &SVD<f64, nalgebra::Dyn, nalgebra::Dyn>,
    sigma2: f64,
) -> Result<Vec<f64>> {
    let v_t = svd
        .v_t
        .as_ref()
        .ok_or_else(|| LeakageError::Decomposition("right singular vectors missing".to_string()))?;

    let std_errors = (0..v_t.ncols())
        .map(|j| {
            let variance: f64 = svd
                .singular_values
                .iter()
                .enumerate()
                .map(|(i, &s)| (v_t[(i, j)] / s).powi(2))
                .sum();
            (sigma2 * variance).sqrt()
        })
        .collect();

    Ok(std_errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basis::BasisFamily;
    use crate::regression::build_design_matrix;

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol * expected.abs().max(1.0),
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_two_bit_scenario() {
        let family = BasisFamily::single_bit(2).unwrap();
        let a = build_design_matrix(&[0, 1, 2, 3], &family, true).unwrap();
        let sol = solve_least_squares(&a, &[1.0, 2.0, 3.0, 6.0], &FitConfig::default()).unwrap();

        // The interaction contrast [1, -1, -1, 1] is the only residual direction:
        // residuals = 0.5 * [1, -1, -1, 1], fitted = [0.5, 2.5, 3.5, 5.5]
        assert_close(sol.coefficients[0], 2.0, 1e-10);
        assert_close(sol.coefficients[1], 3.0, 1e-10);
        assert_close(sol.coefficients[2], 0.5, 1e-10);
        assert_close(sol.residual_sum_of_squares, 1.0, 1e-10);
        assert_eq!(sol.df_resid, 1);
        assert_eq!(sol.rank, 3);

        // TSS = 14
        assert_close(sol.r_squared.unwrap(), 13.0 / 14.0, 1e-10);
        assert_close(sol.adj_r_squared.unwrap(), 11.0 / 14.0, 1e-10);

        // (AᵀA)⁻¹ has diagonal [1, 1, 3/4] and σ̂² = 1
        assert_close(sol.std_errors[0], 1.0, 1e-10);
        assert_close(sol.std_errors[1], 1.0, 1e-10);
        assert_close(sol.std_errors[2], 0.75f64.sqrt(), 1e-10);
    }

    #[test]
    fn test_two_bit_exact_fit() {
        let family = BasisFamily::single_bit(2).unwrap();
        let a = build_design_matrix(&[0, 1, 2, 3], &family, true).unwrap();
        let sol = solve_least_squares(&a, &[1.0, 2.0, 3.0, 4.0], &FitConfig::default()).unwrap();

        assert_close(sol.coefficients[0], 1.0, 1e-10);
        assert_close(sol.coefficients[1], 2.0, 1e-10);
        assert_close(sol.coefficients[2], 1.0, 1e-10);
        assert!(sol.residual_sum_of_squares < 1e-20);
        assert_close(sol.r_squared.unwrap(), 1.0, 1e-12);
    }

    #[test]
    fn test_noiseless_round_trip_all_bits() {
        let family = BasisFamily::all_bits();
        let values: Vec<u8> = (0..=255u8).collect();
        let a = build_design_matrix(&values, &family, true).unwrap();

        let beta_true = DVector::from_vec(vec![0.5, -1.25, 3.0, 0.0, 2.5, -0.75, 1.0, 4.0, 10.0]);
        let y = &a * &beta_true;
        let sol = solve_least_squares(&a, y.as_slice(), &FitConfig::default()).unwrap();

        for (est, truth) in sol.coefficients.iter().zip(beta_true.iter()) {
            assert_close(*est, *truth, 1e-6);
        }
        assert!(sol.residual_sum_of_squares < 1e-16);
    }

    #[test]
    fn test_noiseless_round_trip_full_parity() {
        let family = BasisFamily::full_parity();
        // Every byte value twice so the design has full column rank
        let values: Vec<u8> = (0..512u32).map(|i| (i % 256) as u8).collect();
        let a = build_design_matrix(&values, &family, true).unwrap();

        let beta_true = DVector::from_fn(256, |i, _| ((i * 7919) % 101) as f64 / 10.0 - 5.0);
        let y = &a * &beta_true;
        let sol = solve_least_squares(&a, y.as_slice(), &FitConfig::default()).unwrap();

        assert_eq!(sol.rank, 256);
        for (est, truth) in sol.coefficients.iter().zip(beta_true.iter()) {
            assert_close(*est, *truth, 1e-6);
        }
    }

    #[test]
    fn test_underdetermined_rejected() {
        let family = BasisFamily::full_parity();
        let values: Vec<u8> = (0..200u8).collect();
        let a = build_design_matrix(&values, &family, true).unwrap();
        let y = vec![1.0; values.len()];
        assert_eq!(
            solve_least_squares(&a, &y, &FitConfig::default()).unwrap_err(),
            LeakageError::Underdetermined {
                observations: 200,
                parameters: 256
            }
        );

        // N == K is still rejected
        let family = BasisFamily::single_bit(2).unwrap();
        let a = build_design_matrix(&[0, 1, 2], &family, true).unwrap();
        assert!(matches!(
            solve_least_squares(&a, &[1.0, 2.0, 3.0], &FitConfig::default()),
            Err(LeakageError::Underdetermined {
                observations: 3,
                parameters: 3
            })
        ));
    }

    #[test]
    fn test_rank_deficient_rejected() {
        // 300 observations but only 100 distinct values: columns collinear
        let family = BasisFamily::full_parity();
        let values: Vec<u8> = (0..300u32).map(|i| (i % 100) as u8).collect();
        let a = build_design_matrix(&values, &family, true).unwrap();
        let y: Vec<f64> = values.iter().map(|&v| v as f64).collect();
        match solve_least_squares(&a, &y, &FitConfig::default()) {
            Err(LeakageError::RankDeficient { rank, parameters }) => {
                assert_eq!(parameters, 256);
                assert!(rank < 256, "rank {}", rank);
            }
            other => panic!("expected RankDeficient, got {:?}", other),
        }
    }

    #[test]
    fn test_length_mismatch_and_bad_measurements() {
        let family = BasisFamily::all_bits();
        let values: Vec<u8> = (0..20u8).collect();
        let a = build_design_matrix(&values, &family, true).unwrap();

        assert_eq!(
            solve_least_squares(&a, &[0.0; 19], &FitConfig::default()).unwrap_err(),
            LeakageError::DimensionMismatch {
                expected: 20,
                actual: 19
            }
        );

        let mut y = vec![1.0; 20];
        y[7] = f64::NAN;
        assert_eq!(
            solve_least_squares(&a, &y, &FitConfig::default()).unwrap_err(),
            LeakageError::NonFiniteMeasurement { index: 7 }
        );
    }

    #[test]
    fn test_non_finite_design_entries_rejected() {
        let family = BasisFamily::single_bit(2).unwrap();
        let values: Vec<u8> = (0..10u8).collect();
        let clean = build_design_matrix(&values, &family, true).unwrap();

        let mut a = clean.clone();
        a[(3, 0)] = f64::NAN;
        assert_eq!(
            solve_least_squares(&a, &[1.0; 10], &FitConfig::default()).unwrap_err(),
            LeakageError::NonFiniteDesign { row: 3, col: 0 }
        );

        let mut a = clean;
        a[(6, 2)] = f64::INFINITY;
        assert_eq!(
            solve_least_squares(&a, &[1.0; 10], &FitConfig::default()).unwrap_err(),
            LeakageError::NonFiniteDesign { row: 6, col: 2 }
        );
    }

    #[test]
    fn test_constant_measurements_have_no_r_squared() {
        let family = BasisFamily::single_bit(1).unwrap();
        let a = build_design_matrix(&[0, 1, 0, 1, 1], &family, true).unwrap();
        let sol = solve_least_squares(&a, &[3.0; 5], &FitConfig::default()).unwrap();
        assert!(sol.r_squared.is_none());
        assert!(sol.adj_r_squared.is_none());
        assert_close(sol.coefficients[0], 0.0, 1e-12);
        assert_close(sol.coefficients[1], 3.0, 1e-12);
    }

    #[test]
    fn test_uncentered_r_squared_without_intercept() {
        let family = BasisFamily::single_bit(1).unwrap();
        let config = FitConfig {
            include_intercept: false,
            ..FitConfig::default()
        };
        let a = build_design_matrix(&[0, 1, 1, 0, 1], &family, false).unwrap();
        let y = [0.0, 2.0, 2.0, 0.0, 2.0];
        let sol = solve_least_squares(&a, &y, &config).unwrap();
        assert_close(sol.coefficients[0], 2.0, 1e-12);
        assert_close(sol.r_squared.unwrap(), 1.0, 1e-12);
        assert_close(sol.adj_r_squared.unwrap(), 1.0, 1e-12);
    }

    #[test]
    fn test_inputs_not_mutated() {
        let family = BasisFamily::all_bits();
        let values: Vec<u8> = (0..64u8).map(|v| v.wrapping_mul(5)).collect();
        let a = build_design_matrix(&values, &family, true).unwrap();
        let y: Vec<f64> = values.iter().map(|&v| v.count_ones() as f64 + 0.1 * v as f64).collect();
        let (a_before, y_before) = (a.clone(), y.clone());
        solve_least_squares(&a, &y, &FitConfig::default()).unwrap();
        assert_eq!(a, a_before);
        assert_eq!(y, y_before);
    }
}
