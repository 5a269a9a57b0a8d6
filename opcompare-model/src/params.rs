//! Operator Parameter Strings
//!
//! Benchmark records describe an operator configuration as a flat string of
//! `key=value` pairs, e.g. `type_a=f16,type_b=f32,m=4096,n=1,k=4096,bs=[1,1],nr=[1,1]`.
//! Array values are JSON-like number lists, so commas inside brackets belong to
//! the value rather than separating pairs.

use std::collections::BTreeMap;
use thiserror::Error;

/// Errors from parsing or querying a parameter string
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamsError {
    #[error("Malformed parameter string: '{token}' has no key to continue")]
    Malformed { token: String },

    #[error("Unbalanced brackets in parameter string")]
    UnbalancedBrackets,

    #[error("Invalid array for '{key}': {value}")]
    InvalidArray { key: String, value: String },

    #[error("Missing parameter: {0}")]
    MissingKey(String),

    #[error("Parameter '{key}' is not an integer: {value}")]
    NotAnInteger { key: String, value: String },

    #[error("Parameter '{0}' is an array, expected a scalar")]
    NotAScalar(String),

    #[error("Parameter '{0}' is a scalar, expected an array")]
    NotAnArray(String),

    #[error("Parameter '{key}' has {len} elements, index {index} out of range")]
    IndexOutOfRange { key: String, index: usize, len: usize },
}

/// A single parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Raw text, typed later by the caller
    Scalar(String),
    /// Bracketed number list
    Array(Vec<f64>),
}

/// Parsed `key=value` mapping of an operator parameter string
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedParams {
    values: BTreeMap<String, ParamValue>,
}

impl ParsedParams {
    /// Look up a raw value
    pub fn get(&self, key: &str) -> Result<&ParamValue, ParamsError> {
        self.values
            .get(key)
            .ok_or_else(|| ParamsError::MissingKey(key.to_string()))
    }

    /// Look up a scalar value as text
    pub fn scalar(&self, key: &str) -> Result<&str, ParamsError> {
        match self.get(key)? {
            ParamValue::Scalar(s) => Ok(s),
            ParamValue::Array(_) => Err(ParamsError::NotAScalar(key.to_string())),
        }
    }

    /// Look up a scalar value as a non-negative integer
    pub fn integer(&self, key: &str) -> Result<u64, ParamsError> {
        let raw = self.scalar(key)?;
        raw.trim()
            .parse()
            .map_err(|_| ParamsError::NotAnInteger {
                key: key.to_string(),
                value: raw.to_string(),
            })
    }

    /// Look up an array value
    pub fn array(&self, key: &str) -> Result<&[f64], ParamsError> {
        match self.get(key)? {
            ParamValue::Array(values) => Ok(values),
            ParamValue::Scalar(_) => Err(ParamsError::NotAnArray(key.to_string())),
        }
    }

    /// Look up one element of an array value
    pub fn array_at(&self, key: &str, index: usize) -> Result<f64, ParamsError> {
        let values = self.array(key)?;
        values
            .get(index)
            .copied()
            .ok_or_else(|| ParamsError::IndexOutOfRange {
                key: key.to_string(),
                index,
                len: values.len(),
            })
    }

    /// Whether the key is present
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no parameters were parsed
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over parameters in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.values.iter()
    }
}

/// Parse an operator parameter string.
///
/// Pairs are separated by commas at bracket depth zero. A token without `=`
/// continues the previous value (joined with a literal `,`); a leading token
/// without `=` has nothing to continue and is rejected. Values starting with
/// `[` are decoded as number arrays.
pub fn parse_params(input: &str) -> Result<ParsedParams, ParamsError> {
    let mut raw: BTreeMap<String, String> = BTreeMap::new();
    let mut prev_key: Option<String> = None;

    for token in split_top_level(input)? {
        match token.split_once('=') {
            Some((key, value)) => {
                raw.insert(key.to_string(), value.to_string());
                prev_key = Some(key.to_string());
            }
            None => {
                let value = prev_key
                    .as_ref()
                    .and_then(|key| raw.get_mut(key))
                    .ok_or_else(|| ParamsError::Malformed {
                        token: token.to_string(),
                    })?;
                value.push(',');
                value.push_str(token);
            }
        }
    }

    let mut values = BTreeMap::new();
    for (key, value) in raw {
        let parsed = if value.starts_with('[') {
            let array: Vec<f64> =
                serde_json::from_str(&value).map_err(|_| ParamsError::InvalidArray {
                    key: key.clone(),
                    value: value.clone(),
                })?;
            ParamValue::Array(array)
        } else {
            ParamValue::Scalar(value)
        };
        values.insert(key, parsed);
    }

    Ok(ParsedParams { values })
}

/// Split on commas that are not inside `[...]`
fn split_top_level(input: &str) -> Result<Vec<&str>, ParamsError> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in input.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.checked_sub(1).ok_or(ParamsError::UnbalancedBrackets)?,
            ',' if depth == 0 => {
                tokens.push(&input[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(ParamsError::UnbalancedBrackets);
    }
    tokens.push(&input[start..]);

    Ok(tokens)
}
