//! Stable identifiers for reason codes, artifacts, and trace events.
//!
//! A reason code is `<OUTCOME>.<discriminator>`. The discriminator casing is part of the
//! artifact format and must not be normalized.

use crate::record::Outcome;
use serde::{Deserialize, Serialize};
use std::fmt;

// Codes: hard stops
pub const STOP_UNKNOWN_ROLE: &str = "STOP.unknown_role";
pub const STOP_DECISION_AUTOMATION_BLOCKED: &str = "STOP.DECISION_AUTOMATION_BLOCKED";
pub const STOP_PERMISSION_MISSING: &str = "STOP.PERMISSION_MISSING";
pub const STOP_MISSING_MUST_LINKS: &str = "STOP.missing_must_links";
pub const STOP_EVIDENCE_MISSING: &str = "STOP.EVIDENCE_MISSING";
pub const STOP_EVIDENCE_INVALID: &str = "STOP.EVIDENCE_INVALID";
pub const STOP_POLICY_VIOLATION_MUST_NOT: &str = "STOP.policy_violation_must_not";
pub const STOP_MISSING_MUST_EVIDENCE: &str = "STOP.missing_must_evidence";

// Codes: advisory
pub const REVIEW_MISSING_SHOULD_EVIDENCE: &str = "REVIEW.missing_should_evidence";

// Codes: informational
pub const ALLOW_EVIDENCE_SUFFICIENT: &str = "ALLOW.EVIDENCE_SUFFICIENT";

// Artifacts
pub const NEGATIVE_PROOF_FILE: &str = "negative_proof.jsonl";
pub const REVIEW_QUEUE_FILE: &str = "review_queue.json";
pub const ALLOW_LIST_FILE: &str = "allow_list.json";
pub const TRACE_DIR: &str = "trace";

// Trace events
pub const EVENT_RUN_START: &str = "RUN_START";
pub const EVENT_DECISION: &str = "DECISION";
pub const EVENT_CANDIDATE_INVALID: &str = "CANDIDATE_INVALID";
pub const EVENT_RUN_END: &str = "RUN_END";

/// Closed registry of reason codes.
///
/// Declaration order follows rule precedence in the engine.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ReasonCode {
    #[serde(rename = "STOP.unknown_role")]
    UnknownRole,
    #[serde(rename = "STOP.DECISION_AUTOMATION_BLOCKED")]
    DecisionAutomationBlocked,
    #[serde(rename = "STOP.PERMISSION_MISSING")]
    PermissionMissing,
    #[serde(rename = "STOP.missing_must_links")]
    MissingMustLinks,
    #[serde(rename = "STOP.EVIDENCE_MISSING")]
    EvidenceMissing,
    #[serde(rename = "STOP.EVIDENCE_INVALID")]
    EvidenceInvalid,
    #[serde(rename = "STOP.policy_violation_must_not")]
    PolicyViolationMustNot,
    #[serde(rename = "STOP.missing_must_evidence")]
    MissingMustEvidence,
    #[serde(rename = "REVIEW.missing_should_evidence")]
    MissingShouldEvidence,
    #[serde(rename = "ALLOW.EVIDENCE_SUFFICIENT")]
    EvidenceSufficient,
}

impl ReasonCode {
    pub const ALL: [ReasonCode; 10] = [
        ReasonCode::UnknownRole,
        ReasonCode::DecisionAutomationBlocked,
        ReasonCode::PermissionMissing,
        ReasonCode::MissingMustLinks,
        ReasonCode::EvidenceMissing,
        ReasonCode::EvidenceInvalid,
        ReasonCode::PolicyViolationMustNot,
        ReasonCode::MissingMustEvidence,
        ReasonCode::MissingShouldEvidence,
        ReasonCode::EvidenceSufficient,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ReasonCode::UnknownRole => STOP_UNKNOWN_ROLE,
            ReasonCode::DecisionAutomationBlocked => STOP_DECISION_AUTOMATION_BLOCKED,
            ReasonCode::PermissionMissing => STOP_PERMISSION_MISSING,
            ReasonCode::MissingMustLinks => STOP_MISSING_MUST_LINKS,
            ReasonCode::EvidenceMissing => STOP_EVIDENCE_MISSING,
            ReasonCode::EvidenceInvalid => STOP_EVIDENCE_INVALID,
            ReasonCode::PolicyViolationMustNot => STOP_POLICY_VIOLATION_MUST_NOT,
            ReasonCode::MissingMustEvidence => STOP_MISSING_MUST_EVIDENCE,
            ReasonCode::MissingShouldEvidence => REVIEW_MISSING_SHOULD_EVIDENCE,
            ReasonCode::EvidenceSufficient => ALLOW_EVIDENCE_SUFFICIENT,
        }
    }

    /// The outcome a decision carrying this code must have.
    pub const fn outcome(self) -> Outcome {
        match self {
            ReasonCode::MissingShouldEvidence => Outcome::Review,
            ReasonCode::EvidenceSufficient => Outcome::Allow,
            _ => Outcome::Stop,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.as_str() == value)
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
