//! Output formatting: table, JSON, plain.
//!
//! Renders the statistics map in the format selected by `--output`. Table
//! uses `tabled`, structured formats use serde, plain emits one
//! `key=value` pair per line.

use std::collections::BTreeMap;
use std::io::{self, Write};

use tabled::{settings::Style, Table, Tabled};

use crate::cli::OutputFormat;

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "METRIC")]
    metric: String,
    #[tabled(rename = "VALUE")]
    value: String,
}

/// Render a statistics map in the chosen format.
pub fn render_statistics(format: &OutputFormat, stats: &BTreeMap<String, String>) -> String {
    match format {
        OutputFormat::Table => {
            let rows: Vec<MetricRow> = stats
                .iter()
                .map(|(metric, value)| MetricRow {
                    metric: metric.clone(),
                    value: value.clone(),
                })
                .collect();
            Table::new(rows).with(Style::rounded()).to_string()
        }
        OutputFormat::Json => render_json(stats, false),
        OutputFormat::JsonCompact => render_json(stats, true),
        OutputFormat::Plain => stats
            .iter()
            .map(|(metric, value)| format!("{metric}={value}"))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> String {
    let result = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    result.expect("serialization should not fail")
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}
