//! Metrics report rendering (text, JSON, CSV)

use crate::cli::OutputFormat;
use crate::metrics::{MetricsRow, MetricsTable};
use serde::Serialize;
use std::io::{self, Write};

/// Fixed-width table:
///
/// ```text
///    NP   Runtime(s)    Speedup Efficiency
///     2     1.000000      1.000      0.500
///     4     0.300000      3.333      0.833
/// ```
pub fn to_text(table: &MetricsTable) -> String {
    let mut output = format!(
        "{:>5} {:>12} {:>10} {:>10}\n",
        "NP", "Runtime(s)", "Speedup", "Efficiency"
    );
    for row in table.rows() {
        output.push_str(&format!(
            "{:>5} {:>12.6} {:>10.3} {:>10.3}\n",
            row.process_count, row.runtime_seconds, row.speedup, row.efficiency
        ));
    }
    output
}

#[derive(Debug, Serialize)]
struct JsonBaseline {
    process_count: u32,
    runtime_seconds: f64,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    baseline: JsonBaseline,
    rows: &'a [MetricsRow],
}

/// Pretty-printed JSON document with the baseline and all rows
pub fn to_json(table: &MetricsTable) -> serde_json::Result<String> {
    let report = JsonReport {
        baseline: JsonBaseline {
            process_count: table.baseline_process_count(),
            runtime_seconds: table.baseline_runtime(),
        },
        rows: table.rows(),
    };
    serde_json::to_string_pretty(&report)
}

/// CSV with header `np,runtime_s,speedup,efficiency`
pub fn to_csv(table: &MetricsTable) -> String {
    let mut output = String::from("np,runtime_s,speedup,efficiency\n");
    for row in table.rows() {
        output.push_str(&format!(
            "{},{:.6},{:.6},{:.6}\n",
            row.process_count, row.runtime_seconds, row.speedup, row.efficiency
        ));
    }
    output
}

/// Render `table` in `format` to `writer`
pub fn write_report<W: Write>(
    table: &MetricsTable,
    format: OutputFormat,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => writer.write_all(to_text(table).as_bytes()),
        OutputFormat::Csv => writer.write_all(to_csv(table).as_bytes()),
        OutputFormat::Json => {
            let json = to_json(table)?;
            writeln!(writer, "{}", json)
        }
    }
}
