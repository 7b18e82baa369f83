use crate::model::AdapterSuggestion;
use serde_json::{json, Value as JsonValue};
use stopgate_types::{Outcome, ReasonCode};

/// Upper bound on `present_tags` carried by a missing-must-tag detail.
pub const PRESENT_TAGS_LIMIT: usize = 25;

/// Structured detail of a decision. Each variant belongs to exactly one reason code, so a
/// decision's outcome, code and detail cannot disagree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecisionDetail {
    UnknownRole {
        role: String,
    },
    DecisionAutomationBlocked,
    PermissionMissing,
    MissingMustLink {
        missing: String,
    },
    EvidenceMissing,
    /// Produced by the batch harness for unreadable input, never by the engine.
    EvidenceInvalid {
        file: String,
        error: String,
    },
    MustNotViolation {
        tag: String,
    },
    MissingMustTag {
        missing_tag: String,
        present_tags: Vec<String>,
    },
    MissingShould {
        missing_should: Vec<String>,
    },
    /// Informational ALLOW from the evidence-only check.
    EvidenceSufficient {
        chunk_count: usize,
    },
    Allowed {
        /// An adapter suggested STOP and was overruled.
        suggestion_overridden: bool,
    },
}

impl DecisionDetail {
    pub fn reason_code(&self) -> Option<ReasonCode> {
        let code = match self {
            DecisionDetail::UnknownRole { .. } => ReasonCode::UnknownRole,
            DecisionDetail::DecisionAutomationBlocked => ReasonCode::DecisionAutomationBlocked,
            DecisionDetail::PermissionMissing => ReasonCode::PermissionMissing,
            DecisionDetail::MissingMustLink { .. } => ReasonCode::MissingMustLinks,
            DecisionDetail::EvidenceMissing => ReasonCode::EvidenceMissing,
            DecisionDetail::EvidenceInvalid { .. } => ReasonCode::EvidenceInvalid,
            DecisionDetail::MustNotViolation { .. } => ReasonCode::PolicyViolationMustNot,
            DecisionDetail::MissingMustTag { .. } => ReasonCode::MissingMustEvidence,
            DecisionDetail::MissingShould { .. } => ReasonCode::MissingShouldEvidence,
            DecisionDetail::EvidenceSufficient { .. } => ReasonCode::EvidenceSufficient,
            DecisionDetail::Allowed { .. } => return None,
        };
        Some(code)
    }

    pub fn outcome(&self) -> Outcome {
        self.reason_code()
            .map(ReasonCode::outcome)
            .unwrap_or(Outcome::Allow)
    }

    /// The `detail` mapping written to artifacts.
    pub fn to_json(&self) -> JsonValue {
        match self {
            DecisionDetail::UnknownRole { role } => json!({ "role": role }),
            DecisionDetail::MissingMustLink { missing } => json!({ "missing": missing }),
            DecisionDetail::EvidenceInvalid { file, error } => {
                json!({ "file": file, "error": error })
            }
            DecisionDetail::MustNotViolation { tag } => json!({ "tag": tag }),
            DecisionDetail::MissingMustTag {
                missing_tag,
                present_tags,
            } => json!({ "missing_tag": missing_tag, "present_tags": present_tags }),
            DecisionDetail::MissingShould { missing_should } => {
                json!({ "missing_should": missing_should })
            }
            DecisionDetail::EvidenceSufficient { chunk_count } => {
                json!({ "chunk_count": chunk_count })
            }
            DecisionDetail::Allowed {
                suggestion_overridden: true,
            } => json!({
                "adapter_suggestion": AdapterSuggestion::Stop.as_str(),
                "suggestion_overridden": true,
                "note": "Adapter suggestion is advisory only. Policy takes precedence.",
            }),
            DecisionDetail::DecisionAutomationBlocked
            | DecisionDetail::PermissionMissing
            | DecisionDetail::EvidenceMissing
            | DecisionDetail::Allowed {
                suggestion_overridden: false,
            } => json!({}),
        }
    }

    fn explanation(&self) -> String {
        match self {
            DecisionDetail::UnknownRole { role } => {
                format!("Role '{role}' has no entry in the policy")
            }
            DecisionDetail::DecisionAutomationBlocked => {
                "This system does not automate decisions".to_string()
            }
            DecisionDetail::PermissionMissing => {
                "Retrieved documents do not include permission to generate answers".to_string()
            }
            DecisionDetail::MissingMustLink { missing } => {
                format!("Required evidence link '{missing}' is missing or false")
            }
            DecisionDetail::EvidenceMissing => "No evidence retrieved for this query".to_string(),
            DecisionDetail::EvidenceInvalid { file, error } => {
                format!("Evidence in {file} could not be read: {error}")
            }
            DecisionDetail::MustNotViolation { tag } => {
                format!("Evidence tag '{tag}' is forbidden for this role")
            }
            DecisionDetail::MissingMustTag { missing_tag, .. } => {
                format!("Required evidence tag '{missing_tag}' is missing")
            }
            DecisionDetail::MissingShould { missing_should } => format!(
                "{} recommended evidence tags are missing: {}",
                missing_should.len(),
                missing_should.join(", ")
            ),
            DecisionDetail::EvidenceSufficient { chunk_count } => {
                format!("Found {chunk_count} chunk(s). Generation allowed.")
            }
            DecisionDetail::Allowed {
                suggestion_overridden: true,
            } => "Adapter suggested STOP, but boundary conditions allow answer generation"
                .to_string(),
            DecisionDetail::Allowed {
                suggestion_overridden: false,
            } => "All boundary conditions satisfied. Answer generation permitted.".to_string(),
        }
    }
}

/// The single result of gating one candidate. Never mutated after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decision {
    detail: DecisionDetail,
}

impl Decision {
    pub fn new(detail: DecisionDetail) -> Self {
        Self { detail }
    }

    pub fn outcome(&self) -> Outcome {
        self.detail.outcome()
    }

    /// Always `Some` for STOP and REVIEW.
    pub fn reason_code(&self) -> Option<ReasonCode> {
        self.detail.reason_code()
    }

    pub fn detail(&self) -> &DecisionDetail {
        &self.detail
    }

    pub fn detail_json(&self) -> JsonValue {
        self.detail.to_json()
    }

    pub fn explanation(&self) -> String {
        self.detail.explanation()
    }

    pub fn is_allowed(&self) -> bool {
        self.outcome() == Outcome::Allow
    }

    pub fn is_review(&self) -> bool {
        self.outcome() == Outcome::Review
    }

    pub fn is_stopped(&self) -> bool {
        self.outcome() == Outcome::Stop
    }
}
