use crate::error::CandidateParseError;
use camino::Utf8Path;
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};
use stopgate_domain::model::{AdapterSuggestion, Candidate, RequestFacts};

/// On-disk candidate shape. Every field is optional so a sparse file still reaches the
/// engine, which reports what is missing as a decision.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CandidateDoc {
    candidate_id: Option<String>,
    name: Option<String>,
    #[serde(alias = "role")]
    applied_role: Option<String>,
    evidence: Option<Map<String, JsonValue>>,
    is_decision_request: Option<bool>,
    permission_to_answer: Option<bool>,
    adapter_suggestion: Option<String>,
}

/// Read `<candidate_id>.json`. The file stem stands in for a missing `candidate_id`.
pub fn read_candidate(path: &Utf8Path) -> Result<Candidate, CandidateParseError> {
    let text = std::fs::read_to_string(path).map_err(|source| CandidateParseError::Read {
        path: path.to_string(),
        source,
    })?;
    parse_candidate(&text, path.file_stem().unwrap_or_default())
}

pub fn parse_candidate(text: &str, fallback_id: &str) -> Result<Candidate, CandidateParseError> {
    let doc: CandidateDoc = serde_json::from_str(text)?;

    let adapter_suggestion = match doc.adapter_suggestion.as_deref() {
        None => AdapterSuggestion::None,
        Some(raw) => AdapterSuggestion::parse(raw)
            .ok_or_else(|| CandidateParseError::InvalidSuggestion(raw.to_string()))?,
    };

    Ok(Candidate {
        candidate_id: doc
            .candidate_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| fallback_id.to_string()),
        name: doc.name.unwrap_or_default(),
        applied_role: doc.applied_role.unwrap_or_default(),
        evidence: doc.evidence.unwrap_or_default(),
        request: RequestFacts {
            is_decision_request: doc.is_decision_request.unwrap_or(false),
            permission_to_answer: doc.permission_to_answer,
            adapter_suggestion,
        },
    })
}
