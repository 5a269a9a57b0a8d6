//! Result Table
//!
//! Merged view of two benchmark documents, keyed by operator then parameter
//! string. Each entry holds the measured value of every merged backend plus
//! the derived comparison fields.

use crate::ReportError;
use crate::document::BackendResult;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Number;
use std::collections::BTreeMap;

/// A report value: a raw number or preformatted text
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Unformatted number, emitted as-is
    Number(Number),
    /// Formatted text such as `"10.5T"`
    Text(String),
}

impl Cell {
    /// Wrap a float, falling back to text for non-finite values
    pub fn from_f64(value: f64) -> Self {
        match Number::from_f64(value) {
            Some(n) => Cell::Number(n),
            None => Cell::Text(value.to_string()),
        }
    }

    /// Numeric value, `None` once formatted
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => n.as_f64(),
            Cell::Text(_) => None,
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Text(s) => write!(f, "{}", s),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Number(n) => n.serialize(serializer),
            Cell::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// All values recorded for one (operator, parameters) pair
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultEntry {
    measurements: Vec<(String, Cell)>,
    /// Candidate vs baseline, e.g. `"5.0%"`
    pub diff: Option<String>,
    /// Theoretical roofline value
    pub theoretical: Option<Cell>,
    /// `(field name, percentage)` of each backend against `theoretical`
    pub deviations: Vec<(String, String)>,
}

impl ResultEntry {
    /// Measured value of a backend
    pub fn measurement(&self, label: &str) -> Option<&Cell> {
        self.measurements
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, cell)| cell)
    }

    /// Record a backend's value, replacing an earlier one with the same label
    pub fn set_measurement(&mut self, label: &str, value: Cell) {
        match self.measurements.iter_mut().find(|(l, _)| l == label) {
            Some((_, cell)) => *cell = value,
            None => self.measurements.push((label.to_string(), value)),
        }
    }

    /// Measurements in merge order
    pub fn measurements(&self) -> &[(String, Cell)] {
        &self.measurements
    }

    pub(crate) fn measurements_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.measurements.iter_mut().map(|(_, cell)| cell)
    }

    /// Look up a deviation field by name
    pub fn deviation(&self, key: &str) -> Option<&str> {
        self.deviations
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl Serialize for ResultEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.measurements.len()
            + usize::from(self.diff.is_some())
            + usize::from(self.theoretical.is_some())
            + self.deviations.len();
        let mut map = serializer.serialize_map(Some(len))?;
        for (label, cell) in &self.measurements {
            map.serialize_entry(label, cell)?;
        }
        if let Some(diff) = &self.diff {
            map.serialize_entry("diff", diff)?;
        }
        if let Some(theoretical) = &self.theoretical {
            map.serialize_entry("theoretical", theoretical)?;
        }
        for (key, value) in &self.deviations {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Operator -> parameter string -> entry
#[derive(Debug, Clone, Default)]
pub struct ResultTable {
    labels: Vec<String>,
    ops: BTreeMap<String, BTreeMap<String, ResultEntry>>,
}

impl ResultTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one backend's measurements under `label`.
    ///
    /// Entries are created on demand and never removed, so the table ends up
    /// holding the union of every merged backend's configurations. Labels
    /// that would share a JSON key with a derived field are rejected.
    pub fn merge(&mut self, backend: &BackendResult, label: &str) -> Result<(), ReportError> {
        if is_reserved_label(label) {
            return Err(ReportError::ReservedLabel {
                label: label.to_string(),
            });
        }
        if self.labels.iter().any(|l| l == label) {
            return Err(ReportError::DuplicateBackend {
                label: label.to_string(),
            });
        }
        self.labels.push(label.to_string());

        for op_perf in &backend.op_perfs {
            self.ops
                .entry(op_perf.op.clone())
                .or_default()
                .entry(op_perf.params.clone())
                .or_default()
                .set_measurement(label, Cell::Number(op_perf.value()));
        }

        Ok(())
    }

    /// Labels in merge order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Look up one entry
    pub fn get(&self, op: &str, params: &str) -> Option<&ResultEntry> {
        self.ops.get(op)?.get(params)
    }

    /// Operator names in sorted order
    pub fn ops(&self) -> impl Iterator<Item = &String> {
        self.ops.keys()
    }

    /// Iterate over `(op, params, entry)`
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &ResultEntry)> {
        self.ops.iter().flat_map(|(op, entries)| {
            entries
                .iter()
                .map(move |(params, entry)| (op.as_str(), params.as_str(), entry))
        })
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &str, &mut ResultEntry)> {
        self.ops.iter_mut().flat_map(|(op, entries)| {
            entries
                .iter_mut()
                .map(move |(params, entry)| (op.as_str(), params.as_str(), entry))
        })
    }

    /// Entries of one operator
    pub fn entries(&self, op: &str) -> Option<&BTreeMap<String, ResultEntry>> {
        self.ops.get(op)
    }

    /// Total number of entries
    pub fn len(&self) -> usize {
        self.ops.values().map(BTreeMap::len).sum()
    }

    /// Whether the table has no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `diff`, `theoretical` and every `diff_<backend>_theoretical` name
fn is_reserved_label(label: &str) -> bool {
    label == "diff"
        || label == "theoretical"
        || (label.len() >= "diff__theoretical".len()
            && label.starts_with("diff_")
            && label.ends_with("_theoretical"))
}

impl Serialize for ResultTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.ops.serialize(serializer)
    }
}
