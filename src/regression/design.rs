//! Design-matrix construction.

use crate::basis::BasisFunction;
use crate::error::{LeakageError, Result};
use crate::types::{DesignMatrix, IntermediateValue};

/// Build the regression design matrix for `values`.
///
/// Row `r` holds the features of `values[r]`, followed by a constant 1.0
/// when `include_intercept` is set. The matrix therefore has
/// `basis.feature_count() + include_intercept as usize` columns, with the
/// intercept last.
///
/// # Errors
///
/// Returns [`LeakageError::Dimension`] for an empty value sequence.
pub fn build_design_matrix<B>(
    values: &[IntermediateValue],
    basis: &B,
    include_intercept: bool,
) -> Result<DesignMatrix>
where
    B: BasisFunction + ?Sized,
{
    if values.is_empty() {
        return Err(LeakageError::Dimension(
            "cannot build a design matrix from zero observations".to_string(),
        ));
    }

    let n_features = basis.feature_count();
    let n_cols = n_features + usize::from(include_intercept);
    let mut design = DesignMatrix::zeros(values.len(), n_cols);

    // Reused for every row
    let mut row = vec![0.0; n_features];
    for (r, &value) in values.iter().enumerate() {
        basis.features_into(value, &mut row);
        for (c, &x) in row.iter().enumerate() {
            design[(r, c)] = x;
        }
        if include_intercept {
            design[(r, n_features)] = 1.0;
        }
    }

    log::debug!(
        "built {}x{} design matrix for {} (intercept: {})",
        design.nrows(),
        design.ncols(),
        basis.name(),
        include_intercept
    );

    Ok(design)
}
