//! Theoretical Annotation
//!
//! Second pass over a merged [`ResultTable`]: for every entry measured by both
//! backends, record the candidate-vs-baseline `diff` and, for modelled
//! operators, the roofline value and each backend's deviation from it.
//!
//! Failures are scoped to one entry. The theoretical value and both
//! deviations are committed together, so a failing entry keeps only its
//! measurements (and `diff`, which is computed independently).

use crate::report::{Cell, ResultEntry, ResultTable};
use opcompare_model::{HardwareProfile, ModelError, estimate, percent_label};
use thiserror::Error;
use tracing::{debug, warn};

/// A failed per-entry computation, with enough context to find the record
#[derive(Debug, Clone, Error)]
#[error("{op} [{params}]: {source}")]
pub struct AnnotationError {
    /// Operator name
    pub op: String,
    /// Raw parameter string
    pub params: String,
    /// Underlying model failure
    #[source]
    pub source: ModelError,
}

/// Counters from one annotation pass
#[derive(Debug, Clone, Default)]
pub struct AnnotationSummary {
    /// Entries in the table
    pub entries: usize,
    /// Entries measured by both backends
    pub compared: usize,
    /// Entries that received a theoretical value
    pub modelled: usize,
    /// Failures encountered (an entry may fail both `diff` and its model)
    pub failures: Vec<AnnotationError>,
}

/// Output field names for the deviation of each backend from the theoretical value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviationKeys {
    /// Field for the baseline backend
    pub baseline: String,
    /// Field for the candidate backend
    pub candidate: String,
}

impl DeviationKeys {
    /// Derive `diff_<backend>_theoretical` names from two backend labels.
    ///
    /// The backend part is the label lower-cased without its device index
    /// (`ROCm0` -> `rocm`). Labels that collapse to the same name keep their
    /// full text instead.
    pub fn new(baseline: &str, candidate: &str) -> Self {
        let short = (backend_slug(baseline), backend_slug(candidate));
        let lower = (baseline.to_lowercase(), candidate.to_lowercase());
        let (b, c) = if short.0 != short.1 && !short.0.is_empty() && !short.1.is_empty() {
            short
        } else if lower.0 != lower.1 {
            lower
        } else {
            (baseline.to_string(), candidate.to_string())
        };

        Self {
            baseline: format!("diff_{}_theoretical", b),
            candidate: format!("diff_{}_theoretical", c),
        }
    }
}

fn backend_slug(label: &str) -> String {
    label
        .trim_end_matches(|c: char| c.is_ascii_digit())
        .to_lowercase()
}

/// Annotate every entry of `table` measured by both of its backends.
///
/// The first merged label is the baseline, the second the candidate. Tables
/// with fewer than two labels have nothing to compare.
pub fn annotate(table: &mut ResultTable, hw: &HardwareProfile) -> AnnotationSummary {
    let mut summary = AnnotationSummary {
        entries: table.len(),
        ..Default::default()
    };

    let (baseline, candidate) = match table.labels() {
        [baseline, candidate, ..] => (baseline.clone(), candidate.clone()),
        _ => return summary,
    };
    let keys = DeviationKeys::new(&baseline, &candidate);

    for (op, params, entry) in table.iter_mut() {
        let measured = (
            entry.measurement(&baseline).and_then(Cell::as_f64),
            entry.measurement(&candidate).and_then(Cell::as_f64),
        );
        let (Some(base), Some(cand)) = measured else {
            continue;
        };
        summary.compared += 1;

        let context = |source: ModelError| AnnotationError {
            op: op.to_string(),
            params: params.to_string(),
            source,
        };

        match percent_label(cand, base) {
            Ok(diff) => entry.diff = Some(diff),
            Err(e) => {
                let err = context(e);
                warn!("diff skipped: {}", err);
                summary.failures.push(err);
            }
        }

        match theoretical_fields(op, params, base, cand, &keys, hw) {
            Ok(Some((theoretical, deviations))) => {
                commit(entry, theoretical, deviations);
                summary.modelled += 1;
            }
            Ok(None) => debug!(op, params, "no theoretical model"),
            Err(e) => {
                let err = context(e);
                warn!("theoretical model skipped: {}", err);
                summary.failures.push(err);
            }
        }
    }

    summary
}

type Deviations = Vec<(String, String)>;

fn theoretical_fields(
    op: &str,
    params: &str,
    base: f64,
    cand: f64,
    keys: &DeviationKeys,
    hw: &HardwareProfile,
) -> Result<Option<(f64, Deviations)>, ModelError> {
    let Some(estimate) = estimate(op, params, hw)? else {
        return Ok(None);
    };
    let deviations = vec![
        (keys.candidate.clone(), percent_label(cand, estimate.value)?),
        (keys.baseline.clone(), percent_label(base, estimate.value)?),
    ];
    Ok(Some((estimate.value, deviations)))
}

fn commit(entry: &mut ResultEntry, theoretical: f64, deviations: Deviations) {
    entry.theoretical = Some(Cell::from_f64(theoretical));
    entry.deviations = deviations;
}
