use std::error::Error as _;
use std::fmt::Write as _;

use anyhow::{Context, Result};
use camino::Utf8Path;
use serde::Serialize;

use super::{EntryReport, Outcome, RunReport, ScaffoldError, Summary};

const RULE_WIDTH: usize = 60;

/// Banner printed before the entry lines.
pub fn format_header(name: Option<&str>) -> String {
    let mut out = String::new();
    let title = match name {
        Some(name) => format!("{} - project structure setup", name),
        None => "Project structure setup".to_owned(),
    };
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", rule());
    out
}

pub fn format_entry(entry: &EntryReport) -> String {
    match (entry.outcome, entry.not_a_directory) {
        (Outcome::Created, _) => format!("✓ created: {}", entry.path),
        (Outcome::Skipped, false) => format!("⊘ skipped (already exists): {}", entry.path),
        (Outcome::Skipped, true) => format!("⊘ skipped (exists, not a directory): {}", entry.path),
    }
}

pub fn format_entries(entries: &[EntryReport]) -> String {
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(out, "{}", format_entry(entry));
    }
    out
}

/// Summary block with counts, the next-step hint and the project path.
pub fn format_summary(report: &RunReport, next_step: Option<&str>) -> String {
    let mut out = String::new();
    let Summary { created, skipped } = report.summary();

    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "Setup complete");
    let _ = writeln!(out, "✓ {} folders created", created);
    let _ = writeln!(out, "⊘ {} folders skipped (already existed)", skipped);
    if report.dry_run {
        let _ = writeln!(out, "(dry run, nothing was changed)");
    }
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out);
    if let Some(step) = next_step {
        let _ = writeln!(out, "Next step: {}", step);
    }
    let _ = writeln!(out, "Project path: {}", report.base_path);
    out
}

/// Full human-readable report.
pub fn format_text(report: &RunReport, name: Option<&str>, next_step: Option<&str>) -> String {
    let mut out = format_header(name);
    let _ = writeln!(out);
    if report.base_path_created {
        let _ = writeln!(out, "Base path created: {}", report.base_path);
        let _ = writeln!(out);
    }
    out.push_str(&format_entries(&report.entries));
    let _ = writeln!(out);
    out.push_str(&format_summary(report, next_step));
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a RunReport,
    summary: Summary,
}

pub fn format_json(report: &RunReport) -> Result<String> {
    let doc = JsonReport {
        report,
        summary: report.summary(),
    };
    serde_json::to_string_pretty(&doc).context("serializing run report")
}

#[derive(Serialize)]
struct JsonFailure<'a> {
    base_path: &'a Utf8Path,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    failed_entry: Option<&'a Utf8Path>,
    completed: &'a [EntryReport],
}

/// JSON document for an aborted run: the error chain plus the entries finished before it.
pub fn format_json_failure(base: &Utf8Path, err: &ScaffoldError) -> Result<String> {
    let mut error = err.to_string();
    let mut cause = err.source();
    while let Some(inner) = cause {
        let _ = write!(error, ": {}", inner);
        cause = inner.source();
    }
    let failed_entry = match err {
        ScaffoldError::BasePath { .. } => None,
        ScaffoldError::Entry { entry, .. } => Some(entry.as_path()),
    };
    let doc = JsonFailure {
        base_path: base,
        error,
        failed_entry,
        completed: err.completed(),
    };
    serde_json::to_string_pretty(&doc).context("serializing failure report")
}

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}
