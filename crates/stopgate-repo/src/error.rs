use thiserror::Error;

/// A candidate or chunk file that could not be turned into gate input.
///
/// Per-file: the batch records it as `STOP.EVIDENCE_INVALID` and moves on.
#[derive(Debug, Error)]
pub enum CandidateParseError {
    #[error("read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("line {line}: {source}")]
    ChunkLine {
        line: usize,
        source: serde_json::Error,
    },

    #[error("candidate_id `{0}` is not a safe file name")]
    UnsafeCandidateId(String),

    #[error("unknown adapter_suggestion `{0}` (expected ALLOW or STOP)")]
    InvalidSuggestion(String),
}
