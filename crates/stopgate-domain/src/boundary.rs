//! Framework-agnostic gate tiers for callers without a role policy.
//!
//! `boundary_gate` runs the request-level rules (decision request, permission, evidence
//! existence) with the same precedence the full engine uses. `check_evidence` is the
//! evidence-existence rule alone, with an informational reason on ALLOW.

use crate::decision::{Decision, DecisionDetail};
use crate::evidence::should_generate;
use crate::model::{AdapterSuggestion, EvidenceChunk};
use crate::rules;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoundaryFacts {
    pub retrieved_docs: bool,
    pub permission_to_answer: bool,
    pub is_decision_request: bool,
}

pub fn boundary_gate(facts: BoundaryFacts, suggestion: AdapterSuggestion) -> Decision {
    let hard_stop = rules::decision_request(facts.is_decision_request)
        .or_else(|| rules::permission(Some(facts.permission_to_answer), false))
        .or_else(|| rules::evidence_exists(facts.retrieved_docs));

    match hard_stop {
        Some(detail) => Decision::new(detail),
        None => Decision::new(rules::allowed(suggestion)),
    }
}

pub fn check_evidence(chunks: &[EvidenceChunk]) -> Decision {
    if should_generate(chunks) {
        Decision::new(DecisionDetail::EvidenceSufficient {
            chunk_count: chunks.len(),
        })
    } else {
        Decision::new(DecisionDetail::EvidenceMissing)
    }
}
