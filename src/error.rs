//! Error types for leakage-model fitting.

/// Errors raised while building, fitting or comparing leakage models.
///
/// Every error surfaces at the boundary of the operation that detected it.
/// Nothing is retried internally and no partial result is ever returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LeakageError {
    /// The input sequence is empty or too short for the operation.
    #[error("dimension error: {0}")]
    Dimension(String),

    /// Two sequences that must be index-aligned have different lengths.
    #[error("dimension mismatch: expected {expected} entries, got {actual}")]
    DimensionMismatch {
        /// Length required by the other operand.
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },

    /// Fewer observations than free parameters.
    #[error(
        "underdetermined fit: {observations} observations for {parameters} parameters \
         (need more observations than parameters)"
    )]
    Underdetermined {
        /// Number of observations (design-matrix rows).
        observations: usize,
        /// Number of parameters (design-matrix columns).
        parameters: usize,
    },

    /// The design matrix has collinear columns, so the coefficients are not unique.
    ///
    /// Typical cause: a full-parity fit over a dataset that does not contain
    /// every byte value.
    #[error("rank-deficient design matrix: rank {rank} for {parameters} parameters")]
    RankDeficient {
        /// Numerical rank of the design matrix.
        rank: usize,
        /// Number of parameters (design-matrix columns).
        parameters: usize,
    },

    /// A bit index or bitmask outside the valid range was requested.
    #[error("invalid basis index {index} (must be in {min}..={max})")]
    InvalidBasisIndex {
        /// The rejected index, mask or bit count.
        index: usize,
        /// Lower bound of the valid range.
        min: usize,
        /// Upper bound of the valid range.
        max: usize,
    },

    /// A measurement is NaN or infinite.
    #[error("measurement {index} is not finite")]
    NonFiniteMeasurement {
        /// Position of the offending measurement.
        index: usize,
    },

    /// A design-matrix entry is NaN or infinite.
    ///
    /// Raised for matrices built from a custom basis function that emits
    /// non-finite features.
    #[error("design matrix entry ({row}, {col}) is not finite")]
    NonFiniteDesign {
        /// Row (observation) of the offending entry.
        row: usize,
        /// Column (parameter) of the offending entry.
        col: usize,
    },

    /// A series has zero variance, so its correlation is undefined.
    #[error("series has zero variance; correlation is undefined")]
    ZeroVariance,

    /// A reduced template still has bins without observations.
    #[error("template incomplete: {} byte values have no observations", missing.len())]
    IncompleteTemplate {
        /// Byte values with no observations.
        missing: Vec<u8>,
    },

    /// Coefficients were fitted with a different basis family.
    #[error("basis family mismatch: coefficients fitted with {actual}, expected {expected}")]
    FamilyMismatch {
        /// Family the caller supplied.
        expected: String,
        /// Family recorded in the fit result.
        actual: String,
    },

    /// The matrix decomposition did not converge.
    #[error("decomposition failed: {0}")]
    Decomposition(String),

    /// A configuration value is out of range.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the offending value.
        message: String,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LeakageError>;
