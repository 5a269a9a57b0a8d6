//! Document Comparison
//!
//! Runs the full pipeline over two benchmark documents:
//!
//! ```text
//! baseline doc ──┐
//!                ├─► merge ─► annotate ─► humanize ─► ResultTable
//! candidate doc ─┘
//! ```

use crate::ReportError;
use crate::annotate::{AnnotationSummary, annotate};
use crate::document::BenchmarkDocument;
use crate::humanize::humanize;
use crate::report::ResultTable;
use opcompare_model::HardwareProfile;
use tracing::info;

/// Settings for one comparison
#[derive(Debug, Clone, Default)]
pub struct CompareOptions {
    /// Replaces the baseline document's backend name
    pub baseline_label: Option<String>,
    /// Replaces the candidate document's backend name
    pub candidate_label: Option<String>,
    /// Device peaks for the theoretical model
    pub hardware: HardwareProfile,
}

/// Merge, annotate and format two documents into one table.
///
/// Only `backends[0]` of each document is used.
pub fn compare_documents(
    baseline: &BenchmarkDocument,
    candidate: &BenchmarkDocument,
    options: &CompareOptions,
) -> Result<(ResultTable, AnnotationSummary), ReportError> {
    let baseline = baseline.primary_backend()?;
    let candidate = candidate.primary_backend()?;

    let baseline_label = options
        .baseline_label
        .as_deref()
        .unwrap_or(&baseline.backend);
    let candidate_label = options
        .candidate_label
        .as_deref()
        .unwrap_or(&candidate.backend);

    let mut table = ResultTable::new();
    table.merge(baseline, baseline_label)?;
    table.merge(candidate, candidate_label)?;

    let summary = annotate(&mut table, &options.hardware);
    humanize(&mut table);

    info!(
        baseline = baseline_label,
        candidate = candidate_label,
        entries = summary.entries,
        compared = summary.compared,
        modelled = summary.modelled,
        failures = summary.failures.len(),
        "comparison complete"
    );

    Ok((table, summary))
}
