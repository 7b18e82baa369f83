//! The single-decision use case: gate one query against its retrieved chunks.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use stopgate_domain::model::{AdapterSuggestion, EvidenceChunk};
use stopgate_domain::{boundary_gate, check_evidence, BoundaryFacts, Decision, DecisionDetail};
use stopgate_repo::{parse_chunks_json, parse_chunks_jsonl};
use stopgate_types::{explanation_for, GateReport, NextActionRecord, Outcome};

/// Where the chunks for a single decision come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChunkSource {
    /// A JSON array file, or JSON Lines when the name ends in `.jsonl`.
    Path(Utf8PathBuf),
    /// JSON array text already read by the caller (stdin).
    Json(String),
    Empty,
}

#[derive(Clone, Debug, Default)]
pub struct GateInput {
    pub query: String,
    pub chunks: Vec<EvidenceChunk>,
    pub is_decision_request: bool,
    pub permission_to_answer: bool,
    pub adapter_suggestion: AdapterSuggestion,
}

pub fn load_chunks(source: &ChunkSource) -> anyhow::Result<Vec<EvidenceChunk>> {
    match source {
        ChunkSource::Empty => Ok(Vec::new()),
        ChunkSource::Json(text) => parse_chunks_json(text).context("parse chunks from stdin"),
        ChunkSource::Path(path) => read_chunk_path(path),
    }
}

fn read_chunk_path(path: &Utf8Path) -> anyhow::Result<Vec<EvidenceChunk>> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read chunks {path}"))?;
    let chunks = if path.extension() == Some("jsonl") {
        parse_chunks_jsonl(&text)
    } else {
        parse_chunks_json(&text)
    };
    chunks.with_context(|| format!("parse chunks {path}"))
}

/// Decide one request.
///
/// Request-level rules run first. When they pass without comment, the evidence-only
/// check supplies the informational `ALLOW.EVIDENCE_SUFFICIENT` reason.
pub fn decide_request(input: &GateInput) -> Decision {
    let facts = BoundaryFacts {
        retrieved_docs: !input.chunks.is_empty(),
        permission_to_answer: input.permission_to_answer,
        is_decision_request: input.is_decision_request,
    };
    let decision = boundary_gate(facts, input.adapter_suggestion);
    match decision.detail() {
        DecisionDetail::Allowed {
            suggestion_overridden: false,
        } => check_evidence(&input.chunks),
        _ => decision,
    }
}

pub fn run_gate(input: &GateInput) -> GateReport {
    let decision = decide_request(input);
    let reason = decision.reason_code();
    let next_actions = reason
        .map(|code| {
            explanation_for(code)
                .next_actions
                .iter()
                .map(|a| NextActionRecord {
                    action: a.action.to_string(),
                    description: a.description.to_string(),
                })
                .collect()
        })
        .unwrap_or_default();

    tracing::debug!(
        status = %decision.outcome(),
        chunks = input.chunks.len(),
        "single decision"
    );

    GateReport {
        query: input.query.clone(),
        chunk_count: input.chunks.len(),
        status: decision.outcome(),
        reason,
        explanation: decision.explanation(),
        detail: decision.detail_json(),
        next_actions,
    }
}

/// 0 = ALLOW, 1 = STOP or REVIEW. Structural failures (2) are decided by the caller.
pub fn gate_exit_code(status: Outcome) -> i32 {
    match status {
        Outcome::Allow => 0,
        Outcome::Review | Outcome::Stop => 1,
    }
}
