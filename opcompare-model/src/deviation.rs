//! Relative Deviation
//!
//! Percentage difference of a measured value against a reference, the way the
//! comparison report prints it.

use crate::ModelError;

/// Relative change of `value` against `reference`, in percent
pub fn percent_change(value: f64, reference: f64) -> Result<f64, ModelError> {
    if reference == 0.0 {
        return Err(ModelError::DivisionByZero {
            quantity: "reference value",
        });
    }
    Ok((value - reference) / reference * 100.0)
}

/// Format a percentage with one decimal, e.g. `"5.0%"`
pub fn format_percent(percent: f64) -> String {
    format!("{:.1}%", percent)
}

/// [`percent_change`] rendered with [`format_percent`]
pub fn percent_label(value: f64, reference: f64) -> Result<String, ModelError> {
    percent_change(value, reference).map(format_percent)
}
