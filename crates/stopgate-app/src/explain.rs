//! The `explain` use case: look up reason-code guidance.

use std::fmt::Write as _;
use stopgate_types::explain::{self, Explanation};

/// Output from the explain use case.
#[derive(Clone, Debug)]
pub enum ExplainOutput {
    Found(Explanation),
    /// Unknown code; includes every known one.
    NotFound {
        identifier: String,
        available_codes: Vec<&'static str>,
    },
}

pub fn run_explain(identifier: &str) -> ExplainOutput {
    match explain::lookup_explanation(identifier.trim()) {
        Some(exp) => ExplainOutput::Found(exp),
        None => ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            available_codes: explain::all_codes(),
        },
    }
}

/// Format an explanation for terminal display.
pub fn format_explanation(exp: &Explanation) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{} ({})", exp.title, exp.code);
    out.push_str(&"=".repeat(exp.title.len()));
    out.push_str("\n\n");
    out.push_str(exp.description);
    out.push('\n');

    out.push_str("\nOutcome: ");
    out.push_str(exp.code.outcome().as_str());
    out.push('\n');

    if !exp.next_actions.is_empty() {
        out.push_str("\nNext actions\n");
        out.push_str("------------\n");
        for action in exp.next_actions {
            let _ = writeln!(out, "  - {}: {}", action.action, action.description);
        }
    }

    out
}

pub fn format_not_found(identifier: &str, codes: &[&'static str]) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Unknown reason code: {identifier}\n");
    out.push_str("Available codes:\n");
    for code in codes {
        let _ = writeln!(out, "  - {code}");
    }

    out
}
