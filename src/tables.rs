//! Caller-supplied 256-entry lookup tables.
//!
//! The Hamming-weight and substitution tables are inputs to the leakage
//! models, never process-wide state. Callers usually load them alongside
//! their traces; [`HammingWeightTable::popcount`] exists for callers that
//! would rather compute the weights.

use crate::constants::{BITS_PER_BYTE, NUM_BYTE_VALUES};
use crate::error::{LeakageError, Result};
use crate::types::IntermediateValue;

/// Hamming weight of every byte value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HammingWeightTable {
    weights: [u8; NUM_BYTE_VALUES],
}

impl HammingWeightTable {
    /// Wrap a precomputed table.
    ///
    /// Entries are not checked: the caller vouches that every weight is in
    /// 0..=8. Use [`try_from_slice`](Self::try_from_slice) for loaded tables.
    pub fn new(weights: [u8; NUM_BYTE_VALUES]) -> Self {
        Self { weights }
    }

    /// Wrap a table loaded as a slice.
    ///
    /// # Errors
    ///
    /// - [`LeakageError::DimensionMismatch`] unless there are exactly 256 entries
    /// - [`LeakageError::InvalidBasisIndex`] for a weight above 8
    pub fn try_from_slice(weights: &[u8]) -> Result<Self> {
        let weights: [u8; NUM_BYTE_VALUES] =
            weights
                .try_into()
                .map_err(|_| LeakageError::DimensionMismatch {
                    expected: NUM_BYTE_VALUES,
                    actual: weights.len(),
                })?;
        if let Some(&w) = weights.iter().find(|&&w| w as usize > BITS_PER_BYTE) {
            return Err(LeakageError::InvalidBasisIndex {
                index: w as usize,
                min: 0,
                max: BITS_PER_BYTE,
            });
        }
        Ok(Self::new(weights))
    }

    /// Table computed with `count_ones`.
    pub fn popcount() -> Self {
        let mut weights = [0u8; NUM_BYTE_VALUES];
        for (v, w) in weights.iter_mut().enumerate() {
            *w = v.count_ones() as u8;
        }
        Self::new(weights)
    }

    /// Weight of `value`.
    #[inline]
    pub fn weight(&self, value: IntermediateValue) -> u8 {
        self.weights[value as usize]
    }

    /// The raw table.
    pub fn as_slice(&self) -> &[u8] {
        &self.weights
    }
}

/// Byte substitution table (e.g. the AES S-box).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionTable {
    entries: [u8; NUM_BYTE_VALUES],
}

impl SubstitutionTable {
    /// Wrap a precomputed table.
    pub fn new(entries: [u8; NUM_BYTE_VALUES]) -> Self {
        Self { entries }
    }

    /// Wrap a table loaded as a slice, checking it has exactly 256 entries.
    pub fn try_from_slice(entries: &[u8]) -> Result<Self> {
        let entries: [u8; NUM_BYTE_VALUES] =
            entries
                .try_into()
                .map_err(|_| LeakageError::DimensionMismatch {
                    expected: NUM_BYTE_VALUES,
                    actual: entries.len(),
                })?;
        Ok(Self::new(entries))
    }

    /// Substitute a single byte.
    #[inline]
    pub fn lookup(&self, input: u8) -> u8 {
        self.entries[input as usize]
    }
}

/// Intermediate values `sbox[data ^ key]` for a known key byte.
///
/// This is the usual first-round S-box output targeted when profiling an
/// AES implementation: `data` holds one plaintext byte per trace.
pub fn sbox_outputs(data: &[u8], key: u8, sbox: &SubstitutionTable) -> Vec<IntermediateValue> {
    data.iter().map(|&d| sbox.lookup(d ^ key)).collect()
}
