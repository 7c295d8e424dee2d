//! Basis functions of the byte leakage models.
//!
//! - [`bits`]: bit extraction and XOR-parity primitives
//! - [`family`]: the [`BasisFunction`] contract and the built-in families

pub mod bits;
mod family;

pub use bits::{bit, parity, try_bit, try_parity};
pub use family::{BasisFamily, BasisFunction, BasisKind};
