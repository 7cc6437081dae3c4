//! Human-readable report: one block per analyzer, then a summary line.

use std::fmt::Write;

use lantern_core::Status;

use super::Reporter;
use crate::engine::types::Report;

pub struct TextReporter;

impl Reporter for TextReporter {
    fn name(&self) -> &'static str {
        "text"
    }

    fn render(&self, report: &Report) -> Result<String, serde_json::Error> {
        Ok(render_text(report))
    }
}

pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "Lantern analysis of {} ({} environment)\n",
        report.project.display(),
        report.environment
    );

    for run in &report.runs {
        let _ = writeln!(
            out,
            "[{}] {} ({}, {}, ~{} min)",
            run.status.tag(),
            run.title,
            run.id,
            run.severity.name(),
            run.time_to_fix
        );
        if let Some(message) = &run.message {
            let _ = writeln!(out, "    {message}");
        }
        if let Some(code) = &run.error_code {
            let _ = writeln!(out, "    error code: {code}");
        }
        for issue in &run.issues {
            match issue.location() {
                Some(location) => {
                    let _ = writeln!(out, "    - {location}: {}", issue.message);
                }
                None => {
                    let _ = writeln!(out, "    - {}", issue.message);
                }
            }
            let _ = writeln!(out, "      fix: {}", issue.recommendation);
        }
    }

    let summary = &report.summary;
    let parts: Vec<String> = Status::all()
        .iter()
        .map(|status| format!("{} {}", summary.count(*status), status.name()))
        .collect();
    let _ = writeln!(out, "\n{} analyzers: {}", summary.total(), parts.join(", "));
    out
}
