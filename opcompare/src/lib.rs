#![warn(missing_docs)]
//! # opcompare
//!
//! Compare per-operator benchmark results of two compute backends and put
//! them next to a theoretical roofline value.
//!
//! - **Merging**: both documents end up in one table keyed by operator and
//!   parameter string, with every backend's value kept side by side
//! - **Roofline Model**: memory- or compute-bound estimates for MUL_MAT, CPY
//!   and IM2COL from the operator's shape and element types
//! - **Deviation**: candidate vs baseline, and each backend vs theoretical
//! - **Readable Output**: throughput scaled to T/G/M, JSON or text reports
//!
//! ## Quick Start
//!
//! ```no_run
//! use opcompare::{BenchmarkDocument, CompareOptions, compare_documents, generate_json_report};
//!
//! # fn main() -> anyhow::Result<()> {
//! let vulkan = BenchmarkDocument::from_json(&std::fs::read_to_string("vulkan.json")?)?;
//! let rocm = BenchmarkDocument::from_json(&std::fs::read_to_string("rocm.json")?)?;
//!
//! let (table, _summary) = compare_documents(&vulkan, &rocm, &CompareOptions::default())?;
//! println!("{}", generate_json_report(&table, 4)?);
//! # Ok(())
//! # }
//! ```

// Re-export model types
pub use opcompare_model::{
    Estimate, HardwareProfile, Limit, ModelError, OpKind, ParamValue, ParamsError, ParsedParams,
    estimate, parse_params, percent_change, type_size,
};

// Re-export report types
pub use opcompare_report::{
    AnnotationError, AnnotationSummary, BenchmarkDocument, Cell, CompareOptions, OutputFormat,
    ReportError, ResultEntry, ResultTable, annotate, compare_documents, format_human_output,
    generate_json_report, humanize, with_human_readable,
};

/// Run the opcompare CLI.
///
/// Call this from a binary's `main()`:
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     opcompare::run()
/// }
/// ```
pub use opcompare_cli::run;
