//! Output formatting for issue reports.

use anyhow::Result;
use jqa_sonar_core::{IssueReport, Severity};
use std::fmt::Write;

use crate::OutputFormat;

/// Print the report in the specified format.
pub fn print(report: &IssueReport, format: OutputFormat) -> Result<()> {
    print!("{}", render(report, format)?);
    Ok(())
}

/// Render the report in the specified format.
pub fn render(report: &IssueReport, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => render_text(report, true),
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(report)?),
        OutputFormat::Compact => render_compact(report),
    })
}

fn color(severity: Severity) -> &'static str {
    match severity {
        Severity::Blocker | Severity::Critical => "\x1b[31m",
        Severity::Major => "\x1b[33m",
        Severity::Minor | Severity::Info => "\x1b[34m",
    }
}

fn render_text(report: &IssueReport, colored: bool) -> String {
    let mut out = String::new();
    for issue in &report.issues {
        out.push_str(&issue.format());
        out.push('\n');
    }

    let summary = report.summary();
    if colored {
        let worst = report.issues.iter().map(|i| i.severity).max();
        let code = worst.map_or("\x1b[32m", color);
        let _ = writeln!(out, "{code}{summary}\x1b[0m");
    } else {
        let _ = writeln!(out, "{summary}");
    }
    out
}

fn render_compact(report: &IssueReport) -> String {
    report.issues.iter().map(|issue| format!("{issue}\n")).collect()
}
