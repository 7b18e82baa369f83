//! Individual gate rules. Each returns the detail of its outcome when it fires.
//!
//! The engine and the boundary gate compose these in precedence order; a rule never
//! looks at the result of another.

use crate::decision::{DecisionDetail, PRESENT_TAGS_LIMIT};
use crate::evidence::EvidenceSummary;
use crate::model::AdapterSuggestion;
use crate::policy::{RolePolicy, REVIEW_MIN_DECLARED_SHOULD, REVIEW_MIN_MISSING_SHOULD};
use serde_json::{Map, Value as JsonValue};

pub(crate) fn decision_request(is_decision_request: bool) -> Option<DecisionDetail> {
    is_decision_request.then_some(DecisionDetail::DecisionAutomationBlocked)
}

pub(crate) fn permission(
    permission_to_answer: Option<bool>,
    require_permission: bool,
) -> Option<DecisionDetail> {
    let granted = permission_to_answer.unwrap_or(!require_permission);
    (!granted).then_some(DecisionDetail::PermissionMissing)
}

pub(crate) fn must_links(
    evidence: &Map<String, JsonValue>,
    must_links: &[String],
) -> Option<DecisionDetail> {
    must_links
        .iter()
        .find(|key| !is_present(evidence.get(key.as_str())))
        .map(|key| DecisionDetail::MissingMustLink {
            missing: key.clone(),
        })
}

pub(crate) fn evidence_exists(has_evidence: bool) -> Option<DecisionDetail> {
    (!has_evidence).then_some(DecisionDetail::EvidenceMissing)
}

pub(crate) fn must_not(role: &RolePolicy, evidence: &EvidenceSummary) -> Option<DecisionDetail> {
    role.must_not
        .iter()
        .find(|tag| evidence.tags.contains(tag.as_str()))
        .map(|tag| DecisionDetail::MustNotViolation { tag: tag.clone() })
}

pub(crate) fn must(role: &RolePolicy, evidence: &EvidenceSummary) -> Option<DecisionDetail> {
    role.must
        .iter()
        .find(|tag| !evidence.tags.contains(tag.as_str()))
        .map(|tag| DecisionDetail::MissingMustTag {
            missing_tag: tag.clone(),
            present_tags: evidence.present_tags(PRESENT_TAGS_LIMIT),
        })
}

pub(crate) fn should(role: &RolePolicy, evidence: &EvidenceSummary) -> Option<DecisionDetail> {
    if role.should.len() < REVIEW_MIN_DECLARED_SHOULD {
        return None;
    }
    let missing_should: Vec<String> = role
        .should
        .iter()
        .filter(|tag| !evidence.tags.contains(tag.as_str()))
        .cloned()
        .collect();
    (missing_should.len() >= REVIEW_MIN_MISSING_SHOULD)
        .then_some(DecisionDetail::MissingShould { missing_should })
}

/// Terminal ALLOW. The suggestion is only recorded, never obeyed.
pub(crate) fn allowed(suggestion: AdapterSuggestion) -> DecisionDetail {
    DecisionDetail::Allowed {
        suggestion_overridden: suggestion == AdapterSuggestion::Stop,
    }
}

/// Null, `false`, and empty strings/arrays/objects do not satisfy a must-link.
fn is_present(value: Option<&JsonValue>) -> bool {
    match value {
        None | Some(JsonValue::Null) | Some(JsonValue::Bool(false)) => false,
        Some(JsonValue::String(s)) => !s.is_empty(),
        Some(JsonValue::Array(a)) => !a.is_empty(),
        Some(JsonValue::Object(o)) => !o.is_empty(),
        Some(JsonValue::Bool(true)) | Some(JsonValue::Number(_)) => true,
    }
}
