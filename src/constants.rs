//! Fixed constants of the byte-valued leakage models.

/// Number of distinct intermediate values (all bytes).
pub const NUM_BYTE_VALUES: usize = 256;

/// Number of bits in an intermediate value.
pub const BITS_PER_BYTE: usize = 8;

/// Number of non-zero 8-bit masks, i.e. full-parity basis functions.
///
/// The all-zero mask is the constant function; the intercept column covers it.
pub const FULL_PARITY_FEATURES: usize = 255;

/// Largest valid parity mask.
pub const MAX_PARITY_MASK: usize = 0xFF;
