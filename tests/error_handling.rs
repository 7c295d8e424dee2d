//! Error conditions surface at the boundary of the failing operation.

use leakage_model::basis::{try_bit, try_parity};
use leakage_model::regression::{build_design_matrix, solve_least_squares};
use leakage_model::{
    pearson_correlation, BasisFamily, BasisFunction, FitConfig, FittedPredictor, HammingWeightTable,
    LeakageError, LeakageModel, Observation,
};

#[test]
fn small_full_parity_fit_is_underdetermined() {
    let values: Vec<u8> = (0..100).collect();
    let measurements: Vec<f64> = values.iter().map(|&v| v.count_ones() as f64).collect();

    let err = LeakageModel::new(BasisFamily::full_parity())
        .fit(&values, &measurements)
        .unwrap_err();
    assert_eq!(
        err,
        LeakageError::Underdetermined {
            observations: 100,
            parameters: 256
        }
    );
}

#[test]
fn full_parity_without_every_value_is_rank_deficient() {
    // Plenty of rows, but only even values: bit 0 is always zero
    let values: Vec<u8> = (0..2000u32).map(|i| ((i * 2) % 256) as u8).collect();
    let measurements: Vec<f64> = values.iter().map(|&v| v as f64 * 0.01).collect();

    let err = LeakageModel::new(BasisFamily::full_parity())
        .fit(&values, &measurements)
        .unwrap_err();
    assert!(
        matches!(err, LeakageError::RankDeficient { parameters: 256, .. }),
        "got {:?}",
        err
    );
}

#[test]
fn constant_bit_column_without_intercept_is_rank_deficient() {
    let values = vec![0u8; 20];
    let measurements = vec![1.0; 20];
    let err = LeakageModel::new(BasisFamily::single_bit(2).unwrap())
        .intercept(false)
        .fit(&values, &measurements)
        .unwrap_err();
    assert_eq!(
        err,
        LeakageError::RankDeficient {
            rank: 0,
            parameters: 2
        }
    );
}

#[test]
fn mismatched_lengths_are_rejected() {
    let model = LeakageModel::new(BasisFamily::all_bits());
    let values: Vec<u8> = (0..50).collect();
    let err = model.fit(&values, &[0.0; 49]).unwrap_err();
    assert_eq!(
        err,
        LeakageError::DimensionMismatch {
            expected: 50,
            actual: 49
        }
    );
}

#[test]
fn empty_dataset_is_rejected() {
    let family = BasisFamily::hamming_weight(HammingWeightTable::popcount());
    assert!(matches!(
        build_design_matrix(&[], &family, true),
        Err(LeakageError::Dimension(_))
    ));
    assert!(matches!(
        LeakageModel::new(family).fit_observations(&[]),
        Err(LeakageError::Dimension(_))
    ));
}

#[test]
fn failed_fit_leaves_no_partial_output() {
    let observations: Vec<Observation> = (0..5u8).map(|v| Observation::new(v, v as f64)).collect();
    let result = LeakageModel::new(BasisFamily::all_bits()).fit_observations(&observations);
    assert!(result.is_err());
}

#[test]
fn invalid_basis_indices_are_rejected() {
    assert!(matches!(
        try_bit(0xAA, 8),
        Err(LeakageError::InvalidBasisIndex { index: 8, min: 0, max: 7 })
    ));
    assert!(matches!(
        try_parity(0xAA, 0),
        Err(LeakageError::InvalidBasisIndex { index: 0, .. })
    ));
    assert!(matches!(
        BasisFamily::single_bit(12),
        Err(LeakageError::InvalidBasisIndex { index: 12, .. })
    ));
}

#[test]
fn predictor_requires_matching_coefficients() {
    let err = FittedPredictor::new(
        BasisFamily::full_parity(),
        leakage_model::Coefficients::zeros(9),
        true,
    )
    .unwrap_err();
    assert_eq!(
        err,
        LeakageError::DimensionMismatch {
            expected: 256,
            actual: 9
        }
    );
}

#[test]
fn solver_checks_measurement_length_against_design() {
    let family = BasisFamily::all_bits();
    let values: Vec<u8> = (0..30).collect();
    let design = build_design_matrix(&values, &family, true).unwrap();
    assert!(matches!(
        solve_least_squares(&design, &[1.0; 31], &FitConfig::default()),
        Err(LeakageError::DimensionMismatch { expected: 30, actual: 31 })
    ));
}

#[test]
fn correlation_of_constant_predictions_is_undefined() {
    let flat = vec![2.0; 256];
    let ramp: Vec<f64> = (0..256).map(|v| v as f64).collect();
    assert_eq!(
        pearson_correlation(&flat, &ramp),
        Err(LeakageError::ZeroVariance)
    );
}

/// A custom family whose feature is undefined at zero.
struct Reciprocal;

impl BasisFunction for Reciprocal {
    fn feature_count(&self) -> usize {
        1
    }

    fn features_into(&self, value: u8, out: &mut [f64]) {
        out[0] = 1.0 / value as f64;
    }

    fn name(&self) -> String {
        "Reciprocal".to_string()
    }
}

#[test]
fn custom_basis_with_non_finite_features_is_rejected() {
    let values: Vec<u8> = (0..16).collect();
    let design = build_design_matrix(&values, &Reciprocal, true).unwrap();
    assert!(matches!(
        solve_least_squares(&design, &[1.0; 16], &FitConfig::default()),
        Err(LeakageError::NonFiniteDesign { row: 0, col: 0 })
    ));
}
