//! Human-Readable Magnitudes
//!
//! Final pass that rewrites large throughput numbers as `"10.5T"`, `"640.0G"`,
//! `"1.2M"`. Values at or below one million stay untouched.

use crate::report::{Cell, ResultTable};
use serde_json::Number;

const UNITS: [(f64, &str); 3] = [
    (1_000_000_000_000.0, "T"),
    (1_000_000_000.0, "G"),
    (1_000_000.0, "M"),
];

/// Scale a number to the largest unit it strictly exceeds.
///
/// `1_000_000` is returned unchanged, `1_000_001` becomes `"1.0M"`.
pub fn with_human_readable(value: &Number) -> Cell {
    if let Some(f) = value.as_f64() {
        for (scale, suffix) in UNITS {
            if f > scale {
                return Cell::Text(format!("{:.1}{}", f / scale, suffix));
            }
        }
    }
    Cell::Number(value.clone())
}

/// Format every measured and theoretical value in the table
pub fn humanize(table: &mut ResultTable) {
    for (_, _, entry) in table.iter_mut() {
        for cell in entry.measurements_mut() {
            humanize_cell(cell);
        }
        if let Some(cell) = entry.theoretical.as_mut() {
            humanize_cell(cell);
        }
    }
}

fn humanize_cell(cell: &mut Cell) {
    if let Cell::Number(n) = cell {
        *cell = with_human_readable(n);
    }
}
