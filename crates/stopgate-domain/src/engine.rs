use crate::decision::{Decision, DecisionDetail};
use crate::evidence::{summarize, EvidenceSummary};
use crate::model::{Candidate, EvidenceChunk};
use crate::policy::Policy;
use crate::rules;

/// Evaluate one candidate against the policy.
///
/// Precedence (first match wins, nothing after a STOP is evaluated):
/// 1) unknown role
/// 2) decision request
/// 3) permission
/// 4) global must-links
/// 5) evidence existence
/// 6) role must_not tags
/// 7) role must tags
/// 8) should tags (REVIEW)
///
/// The adapter suggestion is read only when building the final ALLOW.
pub fn evaluate(candidate: &Candidate, evidence: &EvidenceSummary, policy: &Policy) -> Decision {
    let Some(role) = policy.role(&candidate.applied_role) else {
        return Decision::new(DecisionDetail::UnknownRole {
            role: candidate.applied_role.clone(),
        });
    };
    let request = &candidate.request;

    let hard_stop = rules::decision_request(request.is_decision_request)
        .or_else(|| {
            rules::permission(
                request.permission_to_answer,
                policy.global.require_permission,
            )
        })
        .or_else(|| rules::must_links(&candidate.evidence, &policy.global.must_links))
        .or_else(|| rules::evidence_exists(evidence.has_evidence()))
        .or_else(|| rules::must_not(role, evidence))
        .or_else(|| rules::must(role, evidence));
    if let Some(detail) = hard_stop {
        return Decision::new(detail);
    }

    if let Some(detail) = rules::should(role, evidence) {
        return Decision::new(detail);
    }

    Decision::new(rules::allowed(request.adapter_suggestion))
}

/// Convenience wrapper that aggregates the chunks first.
pub fn decide(candidate: &Candidate, chunks: &[EvidenceChunk], policy: &Policy) -> Decision {
    evaluate(candidate, &summarize(chunks), policy)
}
