//! Linear regression over basis-function features.
//!
//! 1. **Design matrix** ([`design`]): one row of features per observation,
//!    optional trailing intercept column
//! 2. **Least squares** ([`ols`]): SVD-based OLS with fit statistics

mod design;
mod ols;

pub use design::build_design_matrix;
pub use ols::{solve_least_squares, OlsSolution};
