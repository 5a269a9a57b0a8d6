//! Benchmark Documents
//!
//! Input format produced by the backend benchmark runner:
//!
//! ```json
//! {"backends": [{"backend": "Vulkan0", "op_perfs": [
//!     {"op": "MUL_MAT", "params": "type_a=f16,...", "perf": 1.0e13},
//!     {"op": "CPY", "params": "type_src=f32,...", "bandwidth": 512.3}
//! ]}]}
//! ```

use crate::ReportError;
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Top-level benchmark result file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkDocument {
    /// Per-backend results, only the first is compared
    pub backends: Vec<BackendResult>,
}

impl BenchmarkDocument {
    /// Parse a document from JSON text
    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The backend entry used for comparison (`backends[0]`)
    pub fn primary_backend(&self) -> Result<&BackendResult, ReportError> {
        self.backends.first().ok_or(ReportError::MissingBackend)
    }
}

/// Measurements of one backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendResult {
    /// Backend name, e.g. `Vulkan0`
    pub backend: String,
    /// One record per operator configuration
    pub op_perfs: Vec<OpMeasurement>,
}

/// One operator measurement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpMeasurement {
    /// Operator name, e.g. `MUL_MAT`
    pub op: String,
    /// Raw parameter string
    pub params: String,
    /// Compute throughput (FLOP/s)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perf: Option<Number>,
    /// Memory throughput (GB/s)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bandwidth: Option<Number>,
}

impl OpMeasurement {
    /// Measured value: `perf`, else `bandwidth`, else zero
    pub fn value(&self) -> Number {
        self.perf
            .clone()
            .or_else(|| self.bandwidth.clone())
            .unwrap_or_else(|| Number::from(0))
    }
}
