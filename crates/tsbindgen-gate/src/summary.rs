//! Validation summary.
//!
//! Two renderings of the same aggregation: a machine-readable JSON value
//! written next to the output (also on halt, so downstream tooling always
//! has a stable artifact), and a colored per-code table for the terminal.

use colored::Colorize;
use serde::Serialize;
use tsbindgen_common::{Diagnostic, DiagnosticSink, Severity};

/// One row of the per-code table.
#[derive(Clone, Debug, Serialize)]
pub struct DiagnosticCount {
    pub code: String,
    pub severity: Severity,
    pub count: usize,
}

/// The machine-readable summary.
#[derive(Debug, Serialize)]
pub struct ValidationSummary {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    pub counts: Vec<DiagnosticCount>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationSummary {
    #[must_use]
    pub fn from_sink(sink: &DiagnosticSink) -> Self {
        let diagnostics = sink.snapshot();
        let counts = sink
            .counts()
            .into_iter()
            .map(|(code, count)| {
                let severity = diagnostics
                    .iter()
                    .find(|d| d.code == code)
                    .map_or(Severity::Info, |d| d.severity);
                DiagnosticCount {
                    code: code.to_string(),
                    severity,
                    count,
                }
            })
            .collect();
        Self {
            errors: sink.error_count(),
            warnings: sink.warning_count(),
            infos: sink.count(Severity::Info),
            counts,
            diagnostics,
        }
    }

    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).expect("summary serializes")
    }
}

/// Render the human-facing per-code table.
#[must_use]
pub fn render_summary_table(summary: &ValidationSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} error(s), {} warning(s), {} info\n",
        summary.errors, summary.warnings, summary.infos
    ));
    for row in &summary.counts {
        let severity = match row.severity {
            Severity::Error => "error".red().bold().to_string(),
            Severity::Warning => "warning".yellow().to_string(),
            Severity::Info => "info".dimmed().to_string(),
        };
        out.push_str(&format!("  {:<8} {:<10} {:>5}\n", row.code, severity, row.count));
    }
    out
}
