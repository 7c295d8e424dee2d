//! Output formatting for fit results and model comparisons.

mod json;
mod terminal;

pub use json::{from_json, to_json, to_json_pretty};
pub use terminal::{format_comparison, format_fit};
