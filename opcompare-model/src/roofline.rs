//! Roofline Estimates
//!
//! Closed-form theoretical throughput for the operators we know how to model.
//! Each estimate is the smaller of what memory bandwidth allows and, for
//! matrix multiplication, what the compute units allow.
//!
//! | Operator | Unit         | Model                                   |
//! |----------|--------------|-----------------------------------------|
//! | MUL_MAT  | FLOP/s       | min(2·m·n·k · bandwidth rate, peak)     |
//! | CPY      | GB/s         | element rate · (src + dst bytes)        |
//! | IM2COL   | GB/s         | element rate · (input + dst·kernel bytes) |

use crate::dtype::type_size;
use crate::hardware::HardwareProfile;
use crate::params::parse_params;
use crate::ModelError;
use tracing::debug;

/// Bytes per gigabyte, used to express copy-style estimates in GB/s
pub const GIGA: f64 = 1_000_000_000.0;

/// Operators with a theoretical model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    /// Matrix multiplication
    MulMat,
    /// Tensor copy with type conversion
    Cpy,
    /// Convolution data-layout transform
    Im2Col,
}

impl OpKind {
    /// Resolve an operator name, `None` when the operator has no model
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "MUL_MAT" => Some(OpKind::MulMat),
            "CPY" => Some(OpKind::Cpy),
            "IM2COL" => Some(OpKind::Im2Col),
            _ => None,
        }
    }
}

impl std::fmt::Display for OpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OpKind::MulMat => write!(f, "MUL_MAT"),
            OpKind::Cpy => write!(f, "CPY"),
            OpKind::Im2Col => write!(f, "IM2COL"),
        }
    }
}

/// Which roof bounds the estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    /// Memory bandwidth
    Bandwidth,
    /// Arithmetic peak
    Compute,
}

/// Theoretical throughput for one operator configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    /// Theoretical value, in the unit the benchmark reports for this operator
    pub value: f64,
    /// Side of the roofline that bounds `value`
    pub limit: Limit,
    /// Total bytes read by one invocation, when the model tracks it
    pub read_bytes: Option<f64>,
    /// Total bytes written by one invocation, when the model tracks it
    pub write_bytes: Option<f64>,
}

/// Estimate the theoretical throughput of an operator configuration.
///
/// Returns `Ok(None)` for operators without a model.
pub fn estimate(
    op: &str,
    params: &str,
    hw: &HardwareProfile,
) -> Result<Option<Estimate>, ModelError> {
    let Some(kind) = OpKind::from_name(op) else {
        return Ok(None);
    };

    let estimate = match kind {
        OpKind::MulMat => estimate_mul_mat(params, hw)?,
        OpKind::Cpy => estimate_cpy(params, hw)?,
        OpKind::Im2Col => estimate_im2col(params, hw)?,
    };

    debug!(
        op = %kind,
        params,
        value = estimate.value,
        limit = ?estimate.limit,
        read_bytes = ?estimate.read_bytes,
        write_bytes = ?estimate.write_bytes,
        "roofline estimate"
    );

    Ok(Some(estimate))
}

fn estimate_mul_mat(params: &str, hw: &HardwareProfile) -> Result<Estimate, ModelError> {
    let p = parse_params(params)?;
    let m = p.integer("m")? as f64;
    let n = p.integer("n")? as f64;
    let k = p.integer("k")? as f64;
    let batch = p.array_at("bs", 0)? * p.array_at("bs", 1)?;
    let repeat = p.array_at("nr", 0)? * p.array_at("nr", 1)?;
    let type_a = p.scalar("type_a")?;
    let type_b = p.scalar("type_b")?;
    let size_a = type_size(type_a)?;
    let size_b = type_size(type_b)?;
    // Output elements share type_b's size
    let size_d = size_b;

    let read_per_op = m * k * size_a + k * n * size_b;
    let write_per_op = m * n * size_d;
    let bandwidth_rate = f64::min(
        checked_div(hw.read_bandwidth, read_per_op, "bytes read per product")?,
        checked_div(hw.write_bandwidth, write_per_op, "bytes written per product")?,
    );

    let peak = if type_a == "f32" && type_b == "f32" {
        hw.fp32_flops
    } else {
        hw.fp16_flops
    };
    let bandwidth_flops = 2.0 * m * k * n * bandwidth_rate;
    let (value, limit) = if bandwidth_flops < peak {
        (bandwidth_flops, Limit::Bandwidth)
    } else {
        (peak, Limit::Compute)
    };

    Ok(Estimate {
        value,
        limit,
        read_bytes: Some(read_per_op * batch * repeat),
        write_bytes: Some(write_per_op * batch * repeat),
    })
}

fn estimate_cpy(params: &str, hw: &HardwareProfile) -> Result<Estimate, ModelError> {
    let p = parse_params(params)?;
    let size_src = type_size(p.scalar("type_src")?)?;
    let size_dst = type_size(p.scalar("type_dst")?)?;
    p.get("ne")?;

    let rate = f64::min(
        checked_div(hw.read_bandwidth, size_src, "source element size")?,
        checked_div(hw.write_bandwidth, size_dst, "destination element size")?,
    );

    Ok(Estimate {
        value: rate * (size_src + size_dst) / GIGA,
        limit: Limit::Bandwidth,
        read_bytes: None,
        write_bytes: None,
    })
}

fn estimate_im2col(params: &str, hw: &HardwareProfile) -> Result<Estimate, ModelError> {
    let p = parse_params(params)?;
    let size_input = type_size(p.scalar("type_input")?)?;
    let size_dst = type_size(p.scalar("dst_type")?)?;
    p.get("ne_input")?;
    let kernel = p.array_at("ne_kernel", 0)? * p.array_at("ne_kernel", 1)?;

    let written = size_dst * kernel;
    let rate = f64::min(
        checked_div(hw.read_bandwidth, size_input, "input element size")?,
        checked_div(hw.write_bandwidth, written, "bytes written per input element")?,
    );

    Ok(Estimate {
        value: rate * (size_input + written) / GIGA,
        limit: Limit::Bandwidth,
        read_bytes: None,
        write_bytes: None,
    })
}

fn checked_div(numerator: f64, denominator: f64, quantity: &'static str) -> Result<f64, ModelError> {
    if denominator == 0.0 {
        return Err(ModelError::DivisionByZero { quantity });
    }
    Ok(numerator / denominator)
}
