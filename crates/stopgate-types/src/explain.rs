//! Guidance registry for reason codes.
//!
//! Maps every reason code to a human-readable explanation and the next actions a
//! person can take. Nothing here is automated; the actions are suggestions for humans.

use crate::ids::ReasonCode;

/// Explanation entry for a reason code.
#[derive(Debug, Clone)]
pub struct Explanation {
    pub code: ReasonCode,
    /// Short description of the outcome.
    pub title: &'static str,
    /// Why the gate reached this outcome.
    pub description: &'static str,
    /// Suggested next steps, in order of preference.
    pub next_actions: &'static [NextAction],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextAction {
    pub action: &'static str,
    pub description: &'static str,
}

/// Look up an explanation by its namespaced code string.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    ReasonCode::parse(identifier).map(explanation_for)
}

/// Every code has an entry; this never fails.
pub fn explanation_for(code: ReasonCode) -> Explanation {
    let (title, description, next_actions): (&'static str, &'static str, &'static [NextAction]) =
        match code {
        ReasonCode::UnknownRole => (
            "Unknown Role",
            "The candidate's applied role has no entry in the policy. Without a role policy \
there is no definition of acceptable evidence, so generation is refused.",
            &[
                NextAction { action: "add_role_policy", description: "Add the role to the policy file with must/must_not/should tags" },
                NextAction { action: "fix_candidate_role", description: "Correct the applied_role on the candidate record" },
            ],
        ),
        ReasonCode::DecisionAutomationBlocked => (
            "Decision Automation Blocked",
            "The request asks for a decision rather than information. This system does not \
automate decisions; no rule or adapter suggestion can lift this stop.",
            &[
                NextAction { action: "route_to_human", description: "Route decision request to human decision-maker" },
                NextAction { action: "reframe_as_information", description: "Reframe as information request instead of decision request" },
            ],
        ),
        ReasonCode::PermissionMissing => (
            "Permission Missing",
            "Retrieved documents do not include permission to generate answers. Retrieval \
does not imply permission.",
            &[
                NextAction { action: "request_permission", description: "Request permission from document owner or administrator" },
                NextAction { action: "add_evidence", description: "Add documents that explicitly grant answer permission" },
                NextAction { action: "reframe_question", description: "Reframe question to match available permissions" },
            ],
        ),
        ReasonCode::MissingMustLinks => (
            "Required Evidence Link Missing",
            "A key listed under global.must_links is absent, empty, or false in the \
candidate's evidence mapping.",
            &[
                NextAction { action: "supply_link", description: "Provide the missing evidence link on the candidate record" },
                NextAction { action: "route_to_human", description: "Route the candidate to a reviewer who can obtain it" },
            ],
        ),
        ReasonCode::EvidenceMissing => (
            "Evidence Missing",
            "No evidence was retrieved. The gate cannot authorize an answer without evidence.",
            &[
                NextAction { action: "add_documents", description: "Add relevant documents to knowledge base" },
                NextAction { action: "reframe_question", description: "Reframe question to match available documentation" },
                NextAction { action: "acknowledge_gap", description: "Acknowledge evidence gap and defer to human expert" },
            ],
        ),
        ReasonCode::EvidenceInvalid => (
            "Evidence Invalid",
            "The candidate or its evidence could not be parsed. Unreadable input is never \
treated as acceptable evidence.",
            &[
                NextAction { action: "fix_input", description: "Repair the malformed candidate or chunk file" },
                NextAction { action: "rerun", description: "Re-run the batch after the input is corrected" },
            ],
        ),
        ReasonCode::PolicyViolationMustNot => (
            "Forbidden Evidence Present",
            "The evidence carries a tag that the role policy lists under must_not.",
            &[
                NextAction { action: "route_to_human", description: "Have a reviewer inspect the flagged evidence" },
                NextAction { action: "remove_evidence", description: "Exclude the offending evidence if it was retrieved in error" },
            ],
        ),
        ReasonCode::MissingMustEvidence => (
            "Required Evidence Missing",
            "A tag the role policy lists under must is absent from the retrieved evidence.",
            &[
                NextAction { action: "add_documents", description: "Add evidence covering the required tag" },
                NextAction { action: "acknowledge_gap", description: "Acknowledge evidence gap and defer to human expert" },
            ],
        ),
        ReasonCode::MissingShouldEvidence => (
            "Recommended Evidence Missing",
            "Two or more tags the role policy lists under should are absent. Hard rules \
passed, so a human reviews the candidate before an answer is generated.",
            &[
                NextAction { action: "route_to_human", description: "Queue the candidate for human review" },
                NextAction { action: "add_documents", description: "Add evidence covering the recommended tags" },
            ],
        ),
        ReasonCode::EvidenceSufficient => (
            "Evidence Present",
            "Evidence was retrieved and no hard rule stopped generation.",
            &[],
        ),
    };

    Explanation {
        code,
        title,
        description,
        next_actions,
    }
}

/// All known code strings, in precedence order.
pub fn all_codes() -> Vec<&'static str> {
    ReasonCode::ALL.iter().map(|code| code.as_str()).collect()
}
