//! Basis-function families.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::bits::{bit, parity};
use crate::constants::{BITS_PER_BYTE, FULL_PARITY_FEATURES};
use crate::error::{LeakageError, Result};
use crate::tables::HammingWeightTable;
use crate::types::IntermediateValue;

/// Feature extraction for one leakage-model family.
///
/// A family maps an intermediate value to a fixed-length feature vector;
/// each feature becomes one design-matrix column. Implement this trait to
/// add a family: the design-matrix builder and the predictor only rely on
/// the methods below.
pub trait BasisFunction {
    /// Number of features produced for every value.
    fn feature_count(&self) -> usize;

    /// Write the features of `value` into `out`.
    ///
    /// `out` has exactly [`feature_count`](Self::feature_count) entries.
    fn features_into(&self, value: IntermediateValue, out: &mut [f64]);

    /// Short human-readable name.
    fn name(&self) -> String;

    /// Allocate and return the features of `value`.
    fn features(&self, value: IntermediateValue) -> Vec<f64> {
        let mut out = vec![0.0; self.feature_count()];
        self.features_into(value, &mut out);
        out
    }
}

/// Serializable descriptor of a family, without its lookup tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BasisKind {
    /// The `bits` least-significant bits, one feature each.
    SingleBit {
        /// Number of low-order bits (1..=8).
        bits: u8,
    },
    /// Hamming weight of the value.
    HammingWeight,
    /// Parity of every non-zero bitmask.
    FullParity,
}

impl fmt::Display for BasisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BasisKind::SingleBit { bits } => write!(f, "SingleBit({})", bits),
            BasisKind::HammingWeight => write!(f, "HammingWeight"),
            BasisKind::FullParity => write!(f, "FullParity"),
        }
    }
}

/// The built-in leakage-model families.
///
/// | Family | Features | Feature `i` |
/// |---|---|---|
/// | `SingleBit(8)` | 8 | bit `i` |
/// | `SingleBit(2)` | 2 | bit `i`, two LSBs only |
/// | `HammingWeight` | 1 | `table[v]` |
/// | `FullParity` | 255 | `parity(v, i + 1)` |
///
/// `SingleBit(8)` assumes independent additive bit contributions,
/// `HammingWeight` assumes all bits contribute equally, and `FullParity`
/// spans every Boolean function of eight bits (the constant coming from the
/// intercept).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BasisFamily {
    /// One feature per low-order bit.
    SingleBit {
        /// Number of low-order bits (1..=8).
        bits: u8,
    },
    /// One feature: the Hamming weight from the supplied table.
    HammingWeight(HammingWeightTable),
    /// One feature per non-zero bitmask, masks 1 through 255.
    FullParity,
}

impl BasisFamily {
    /// Single-bit family over the `bits` least-significant bits.
    pub fn single_bit(bits: u8) -> Result<Self> {
        if bits == 0 || bits as usize > BITS_PER_BYTE {
            return Err(LeakageError::InvalidBasisIndex {
                index: bits as usize,
                min: 1,
                max: BITS_PER_BYTE,
            });
        }
        Ok(BasisFamily::SingleBit { bits })
    }

    /// All eight bits (nine-component model with the intercept).
    pub fn all_bits() -> Self {
        BasisFamily::SingleBit {
            bits: BITS_PER_BYTE as u8,
        }
    }

    /// Hamming-weight family reading the given table.
    pub fn hamming_weight(table: HammingWeightTable) -> Self {
        BasisFamily::HammingWeight(table)
    }

    /// Full-parity family.
    pub fn full_parity() -> Self {
        BasisFamily::FullParity
    }

    /// Descriptor of this family.
    pub fn kind(&self) -> BasisKind {
        match self {
            BasisFamily::SingleBit { bits } => BasisKind::SingleBit { bits: *bits },
            BasisFamily::HammingWeight(_) => BasisKind::HammingWeight,
            BasisFamily::FullParity => BasisKind::FullParity,
        }
    }
}

impl BasisFunction for BasisFamily {
    fn feature_count(&self) -> usize {
        match self {
            BasisFamily::SingleBit { bits } => *bits as usize,
            BasisFamily::HammingWeight(_) => 1,
            BasisFamily::FullParity => FULL_PARITY_FEATURES,
        }
    }

    fn features_into(&self, value: IntermediateValue, out: &mut [f64]) {
        debug_assert_eq!(out.len(), self.feature_count());
        match self {
            BasisFamily::SingleBit { .. } => {
                for (i, slot) in out.iter_mut().enumerate() {
                    *slot = bit(value, i as u32) as f64;
                }
            }
            BasisFamily::HammingWeight(table) => {
                out[0] = table.weight(value) as f64;
            }
            BasisFamily::FullParity => {
                // Column i holds mask i + 1
                for (mask, slot) in (1..=u8::MAX).zip(out.iter_mut()) {
                    *slot = parity(value, mask) as f64;
                }
            }
        }
    }

    fn name(&self) -> String {
        self.kind().to_string()
    }
}
