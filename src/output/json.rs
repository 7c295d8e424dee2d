//! JSON export of fit results.
//!
//! Field names follow [`FitResult`] and [`FitQuality`](crate::FitQuality);
//! an undefined R² is written as `null`.

use crate::result::FitResult;

/// One-line JSON, e.g. for appending fits to a log file.
pub fn to_json(result: &FitResult) -> Result<String, serde_json::Error> {
    serde_json::to_string(result)
}

/// Indented JSON for files meant to be read by people.
pub fn to_json_pretty(result: &FitResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

/// Load a fit previously exported with [`to_json`] or [`to_json_pretty`].
///
/// # Errors
///
/// Fails on malformed JSON or when a field is missing or has the wrong type.
pub fn from_json(json: &str) -> Result<FitResult, serde_json::Error> {
    serde_json::from_str(json)
}
