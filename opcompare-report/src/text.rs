//! Text Output
//!
//! Terminal-friendly rendering of a result table: one section per operator,
//! one row per parameter string.

use crate::report::{Cell, ResultEntry, ResultTable};

/// Format a table for human-readable display
pub fn format_human_output(table: &ResultTable) -> String {
    let mut output = String::new();
    let labels = table.labels();

    output.push('\n');
    output.push_str(&format!("Operator comparison: {}\n", labels.join(" vs ")));
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    for op in table.ops() {
        let Some(entries) = table.entries(op) else {
            continue;
        };

        let noun = if entries.len() == 1 {
            "configuration"
        } else {
            "configurations"
        };
        output.push_str(&format!("{} ({} {})\n", op, entries.len(), noun));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for (params, entry) in entries {
            output.push_str(&format!("  {}\n", params));

            let measured: Vec<String> = labels
                .iter()
                .map(|label| format!("{}: {}", label, cell_or_dash(entry.measurement(label))))
                .collect();
            output.push_str(&format!("      {}", measured.join("  ")));
            if let Some(diff) = &entry.diff {
                output.push_str(&format!("  diff: {}", diff));
            }
            output.push('\n');

            if let Some(line) = theoretical_line(entry) {
                output.push_str(&line);
            }
        }
        output.push('\n');
    }

    output
}

fn theoretical_line(entry: &ResultEntry) -> Option<String> {
    let theoretical = entry.theoretical.as_ref()?;
    let mut line = format!("      theoretical: {}", theoretical);
    for (key, value) in &entry.deviations {
        line.push_str(&format!("  {}: {}", key, value));
    }
    line.push('\n');
    Some(line)
}

fn cell_or_dash(cell: Option<&Cell>) -> String {
    cell.map_or_else(|| "-".to_string(), Cell::to_string)
}
