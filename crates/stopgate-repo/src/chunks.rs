use crate::error::CandidateParseError;
use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Map, Value as JsonValue};
use stopgate_domain::model::EvidenceChunk;

/// `<chunks_dir>/<candidate_id>.jsonl`
///
/// The id comes from the candidate file, so it must stay a plain file name inside
/// `chunks_dir`.
pub fn chunk_file(chunks_dir: &Utf8Path, candidate_id: &str) -> Result<Utf8PathBuf, CandidateParseError> {
    if candidate_id.is_empty() || candidate_id.contains(['/', '\\']) || candidate_id.contains("..") {
        return Err(CandidateParseError::UnsafeCandidateId(candidate_id.to_string()));
    }
    Ok(chunks_dir.join(format!("{candidate_id}.jsonl")))
}

/// Read a JSON Lines chunk file. A file that does not exist is an empty sequence.
pub fn read_chunks(path: &Utf8Path) -> Result<Vec<EvidenceChunk>, CandidateParseError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(%path, "no chunk file");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(CandidateParseError::Read {
                path: path.to_string(),
                source,
            });
        }
    };
    parse_chunks_jsonl(&text)
}

/// One JSON value per non-blank line. Line numbers in errors are 1-based.
pub fn parse_chunks_jsonl(text: &str) -> Result<Vec<EvidenceChunk>, CandidateParseError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str::<JsonValue>(line)
                .map(to_chunk)
                .map_err(|source| CandidateParseError::ChunkLine {
                    line: idx + 1,
                    source,
                })
        })
        .collect()
}

/// A JSON array of chunks.
pub fn parse_chunks_json(text: &str) -> Result<Vec<EvidenceChunk>, CandidateParseError> {
    let items: Vec<JsonValue> = serde_json::from_str(text)?;
    Ok(items.into_iter().map(to_chunk).collect())
}

// Non-object values still count as a chunk, just one without tags.
fn to_chunk(value: JsonValue) -> EvidenceChunk {
    let JsonValue::Object(mut fields) = value else {
        return EvidenceChunk::default();
    };
    let tags = match fields.remove("tags") {
        Some(JsonValue::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                JsonValue::String(tag) => Some(tag),
                _ => None,
            })
            .collect(),
        Some(JsonValue::String(tag)) => vec![tag],
        _ => Vec::new(),
    };
    EvidenceChunk {
        tags,
        fields,
    }
}
