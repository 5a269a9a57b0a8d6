//! JSON Output

use crate::report::ResultTable;
use serde::Serialize;
use serde::ser::Error as _;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Default indentation width of the JSON report
pub const DEFAULT_INDENT: usize = 4;

/// Generate a prettified JSON report indented by `indent` spaces.
pub fn generate_json_report(table: &ResultTable, indent: usize) -> Result<String, serde_json::Error> {
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    table.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(serde_json::Error::custom)
}
