//! Bit extraction and XOR-parity of byte values.

use crate::constants::{BITS_PER_BYTE, MAX_PARITY_MASK};
use crate::error::{LeakageError, Result};
use crate::types::IntermediateValue;

/// Bit `index` of `value`, as 0 or 1.
///
/// `index` must be in 0..8; larger indices are a caller bug (checked in
/// debug builds only). Use [`try_bit`] for untrusted indices.
#[inline]
pub fn bit(value: IntermediateValue, index: u32) -> u8 {
    debug_assert!(index < BITS_PER_BYTE as u32, "bit index {} out of range", index);
    (value >> index) & 1
}

/// Checked variant of [`bit`].
pub fn try_bit(value: IntermediateValue, index: u32) -> Result<u8> {
    if index as usize >= BITS_PER_BYTE {
        return Err(LeakageError::InvalidBasisIndex {
            index: index as usize,
            min: 0,
            max: BITS_PER_BYTE - 1,
        });
    }
    Ok(bit(value, index))
}

/// XOR-parity of the bits of `value` selected by `mask`.
///
/// Returns 1 iff `value & mask` has an odd number of set bits.
#[inline]
pub fn parity(value: IntermediateValue, mask: u8) -> u8 {
    ((value & mask).count_ones() & 1) as u8
}

/// Checked variant of [`parity`] that rejects the all-zero mask.
///
/// Mask 0 selects no bits and encodes a constant; the intercept column
/// models constants, so no basis function uses it.
pub fn try_parity(value: IntermediateValue, mask: u8) -> Result<u8> {
    if mask == 0 {
        return Err(LeakageError::InvalidBasisIndex {
            index: 0,
            min: 1,
            max: MAX_PARITY_MASK,
        });
    }
    Ok(parity(value, mask))
}
