//! Terminal renderings of batch and single-decision results.

use crate::batch::BatchOutput;
use anyhow::Context;
use std::fmt::Write as _;
use stopgate_types::{GateReport, Outcome};

/// Counts, ranked reasons, then artifact paths.
pub fn render_batch_summary(output: &BatchOutput) -> String {
    let totals = &output.totals;
    let mut out = String::new();

    let _ = writeln!(out, "TOTAL: {}", totals.total);
    let _ = writeln!(out, "ALLOW: {}", totals.allow);
    let _ = writeln!(out, "REVIEW: {}", totals.review);
    let _ = writeln!(out, "STOP: {}", totals.stop);
    out.push_str("Top reasons:\n");
    for (code, count) in totals.ranked_reasons() {
        let _ = writeln!(out, "- {code}: {count}");
    }
    out.push_str("Artifacts:\n");
    let artifacts = &output.artifacts;
    for path in [
        &artifacts.negative_proof,
        &artifacts.review_queue,
        &artifacts.allow_list,
    ] {
        let _ = writeln!(out, " - {path}");
    }
    if let Some(trace) = &output.trace_path {
        let _ = writeln!(out, " - {trace}");
    }

    out
}

pub fn render_gate_text(report: &GateReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Query: {}", report.query);
    let _ = writeln!(out, "Chunks: {}", report.chunk_count);
    let _ = writeln!(out, "Decision: {}", report.status);
    let _ = writeln!(
        out,
        "Reason: {}",
        report.reason.map(|r| r.as_str()).unwrap_or("none")
    );
    let _ = writeln!(out, "Explanation: {}", report.explanation);

    if !report.next_actions.is_empty() {
        out.push_str("\nNext actions:\n");
        for action in &report.next_actions {
            let _ = writeln!(out, "  - {}: {}", action.action, action.description);
        }
    }

    match report.status {
        Outcome::Allow => out.push_str("\nLLM generation can PROCEED\n"),
        Outcome::Review | Outcome::Stop => out.push_str("\nLLM generation should be SKIPPED\n"),
    }

    out
}

pub fn render_gate_json(report: &GateReport) -> anyhow::Result<String> {
    let mut text = serde_json::to_string_pretty(report).context("serialize gate report")?;
    text.push('\n');
    Ok(text)
}
