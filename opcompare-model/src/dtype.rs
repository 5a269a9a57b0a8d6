//! Element Type Sizes
//!
//! Maps tensor element type names to their storage size in bytes. Quantized
//! types are sub-byte, so sizes are fractional.

use crate::ModelError;

/// Bytes per element for a type name.
///
/// Exact names cover the float types. Otherwise `q<N>...` and `iq<N>...` are
/// treated as N-bit quantization.
pub fn type_size(name: &str) -> Result<f64, ModelError> {
    match name {
        "f16" | "bf16" => Ok(2.0),
        "f32" => Ok(4.0),
        "f64" => Ok(8.0),
        "mxfp4" => Ok(0.5),
        _ => {
            let bits = name
                .strip_prefix('q')
                .or_else(|| name.strip_prefix("iq"))
                .and_then(|rest| rest.chars().next())
                .and_then(|c| c.to_digit(10));
            match bits {
                Some(bits) => Ok(f64::from(bits) / 8.0),
                None => Err(ModelError::UnknownType(name.to_string())),
            }
        }
    }
}
