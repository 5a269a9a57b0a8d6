#![warn(missing_docs)]
//! opcompare Report - Result Table and Output
//!
//! Turns two backend benchmark documents into one annotated table:
//! - Document model for the benchmark runner's JSON output
//! - Result table keyed by operator and parameter string
//! - Annotation pass (diff, roofline value, deviations)
//! - Human-readable magnitude formatting
//! - JSON (machine-readable) and text (terminal) rendering

mod annotate;
mod compare;
mod document;
mod humanize;
mod json;
mod report;
mod text;

pub use annotate::{AnnotationError, AnnotationSummary, DeviationKeys, annotate};
pub use compare::{CompareOptions, compare_documents};
pub use document::{BackendResult, BenchmarkDocument, OpMeasurement};
pub use humanize::{humanize, with_human_readable};
pub use json::{DEFAULT_INDENT, generate_json_report};
pub use report::{Cell, ResultEntry, ResultTable};
pub use text::format_human_output;

use thiserror::Error;

/// Errors from building a report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Backend label '{label}' used by both documents; pass distinct labels")]
    DuplicateBackend { label: String },

    #[error("Backend label '{label}' collides with a derived report field; pass another label")]
    ReservedLabel { label: String },

    #[error("Document has no backend results")]
    MissingBackend,

    #[error("Invalid benchmark document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON table
    Json,
    /// Human-readable text
    Human,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Human));
        assert!("csv".parse::<OutputFormat>().is_err());
    }
}
