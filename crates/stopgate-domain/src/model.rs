use serde_json::{Map, Value as JsonValue};

/// A candidate handed to the gate by upstream retrieval/extraction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Candidate {
    pub candidate_id: String,
    pub name: String,
    pub applied_role: String,

    /// Free-form evidence facts. `global.must_links` keys are looked up here.
    pub evidence: Map<String, JsonValue>,

    pub request: RequestFacts,
}

/// Facts about the request itself, as opposed to the evidence behind it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestFacts {
    /// The candidate asks for a decision rather than information.
    pub is_decision_request: bool,

    /// `None` when the caller does not assert permission either way.
    pub permission_to_answer: Option<bool>,

    pub adapter_suggestion: AdapterSuggestion,
}

/// Advisory hint from an upstream adapter. Never binding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AdapterSuggestion {
    #[default]
    None,
    Allow,
    Stop,
}

impl AdapterSuggestion {
    /// Accepts `allow`/`stop` in any case. `answer` is an accepted alias for `allow`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "allow" | "answer" => Some(AdapterSuggestion::Allow),
            "stop" => Some(AdapterSuggestion::Stop),
            "" | "none" => Some(AdapterSuggestion::None),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            AdapterSuggestion::None => "NONE",
            AdapterSuggestion::Allow => "ALLOW",
            AdapterSuggestion::Stop => "STOP",
        }
    }
}

/// One retrieved evidence chunk. Only `tags` matter to the gate.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EvidenceChunk {
    pub tags: Vec<String>,

    /// Everything else the retriever attached (text, source, score, ...).
    pub fields: Map<String, JsonValue>,
}

impl EvidenceChunk {
    pub fn with_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
            fields: Map::new(),
        }
    }
}
