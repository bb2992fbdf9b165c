// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Terminal output.

use std::fmt::Write;

use console::{style, StyledObject};

use crate::audit::{AuditEntry, AuditRecord};
use crate::cli::args::OutputFormat;
use crate::classifier::Verdict;

use super::ReportMeta;

/// Print the record to stdout in the requested format.
pub fn print_record(record: &AuditRecord, meta: &ReportMeta, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(record, meta),
        OutputFormat::Text => print_text(record, meta),
    }
}

/// Print findings and the verdict summary.
pub fn print_text(record: &AuditRecord, meta: &ReportMeta) {
    print!("{}", text_report(record, meta));
}

/// Print the whole record as JSON.
pub fn print_json(record: &AuditRecord, meta: &ReportMeta) {
    let json = json_report(record, meta);
    println!(
        "{}",
        serde_json::to_string_pretty(&json).unwrap_or_default()
    );
}

fn marker(verdict: Verdict) -> StyledObject<&'static str> {
    match verdict {
        Verdict::Compliant => style("✓").green().bold(),
        Verdict::NonCompliant => style("✗").red().bold(),
        Verdict::Warning => style("⚠").yellow().bold(),
        Verdict::NotApplicable => style("-").dim(),
        Verdict::Error => style("!").magenta().bold(),
    }
}

fn finding(entry: &AuditEntry) -> String {
    let mut line = format!(
        "{} {} {}",
        marker(entry.verdict),
        style(&entry.rule.chapter_id).cyan(),
        entry.rule.title
    );

    if let Some(path) = &entry.file_path {
        let _ = write!(line, " {}", style(path.display()).dim());
    }

    match entry.verdict {
        Verdict::Error => {
            if let Some(detail) = &entry.detail {
                let _ = write!(line, "\n    {} {}", style("→").dim(), detail);
            }
        }
        _ => {
            if let Some(value) = &entry.matched_value {
                let _ = write!(
                    line,
                    "\n    {} found '{}', expected '{}'",
                    style("→").dim(),
                    value,
                    entry.rule.expected_value
                );
            }
        }
    }

    line
}

/// The text report: failing entries first, then counts per verdict.
pub fn text_report(record: &AuditRecord, meta: &ReportMeta) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} ({})",
        style(&meta.profile.benchmark).bold(),
        meta.profile.name
    );

    for entry in record
        .entries()
        .iter()
        .filter(|e| matches!(e.verdict, Verdict::NonCompliant | Verdict::Warning | Verdict::Error))
    {
        let _ = writeln!(out, "  {}", finding(entry));
    }

    for skipped in record.skipped() {
        let _ = writeln!(
            out,
            "  {} {} not evaluated: {}",
            style("⚠").yellow().bold(),
            style(&skipped.rule.chapter_id).cyan(),
            skipped.reason.message
        );
    }

    for rejected in &meta.rejected {
        let _ = writeln!(out, "  {} {}", style("⚠").yellow().bold(), rejected);
    }

    let summary = record.summary();
    let _ = writeln!(out, "\nPerformed {} tests:", summary.total);
    for verdict in Verdict::ALL {
        let _ = writeln!(
            out,
            "  {} {:<8} {:>5} ({:.0}%)",
            marker(verdict),
            verdict.label(),
            summary.count(verdict),
            summary.percent(verdict)
        );
    }

    out
}

/// The JSON document printed by `--format json`.
pub fn json_report(record: &AuditRecord, meta: &ReportMeta) -> serde_json::Value {
    serde_json::json!({
        "platform": meta.profile.platform,
        "profile": meta.profile.name,
        "benchmark": meta.profile.benchmark,
        "base_dir": meta.base_dir,
        "generated": meta.generated.to_rfc3339(),
        "summary": record.summary(),
        "entries": record.entries(),
        "skipped": record.skipped(),
        "rejected": meta.rejected,
    })
}
