#![warn(missing_docs)]
//! opcompare Model - Theoretical Operator Performance
//!
//! Provides the pieces needed to put a measured operator throughput next to
//! what the hardware could deliver:
//! - Parameter string parsing (`m=4096,n=1,bs=[1,1],...`)
//! - Element type sizes, including sub-byte quantized types
//! - Hardware peak rates (memory bandwidth, FP16/FP32 compute)
//! - Roofline estimates for MUL_MAT, CPY and IM2COL
//! - Percentage deviation helpers

mod deviation;
mod dtype;
mod hardware;
mod params;
mod roofline;

pub use deviation::{format_percent, percent_change, percent_label};
pub use dtype::type_size;
pub use hardware::HardwareProfile;
pub use params::{ParamValue, ParamsError, ParsedParams, parse_params};
pub use roofline::{Estimate, GIGA, Limit, OpKind, estimate};

use thiserror::Error;

/// Errors from evaluating a theoretical model
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error(transparent)]
    Params(#[from] ParamsError),

    #[error("Unknown type: {0}")]
    UnknownType(String),

    #[error("Division by zero: {quantity} is zero")]
    DivisionByZero { quantity: &'static str },
}
