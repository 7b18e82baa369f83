use crate::model::EvidenceChunk;
use std::collections::BTreeSet;

/// What the engine needs to know about a candidate's chunks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvidenceSummary {
    pub chunk_count: usize,
    pub tags: BTreeSet<String>,
}

impl EvidenceSummary {
    pub fn has_evidence(&self) -> bool {
        self.chunk_count > 0
    }

    /// Sorted tags, truncated to `limit`.
    pub fn present_tags(&self, limit: usize) -> Vec<String> {
        self.tags.iter().take(limit).cloned().collect()
    }
}

/// Union of every chunk's tags.
pub fn tags_of(chunks: &[EvidenceChunk]) -> BTreeSet<String> {
    chunks
        .iter()
        .flat_map(|chunk| chunk.tags.iter().cloned())
        .collect()
}

pub fn summarize(chunks: &[EvidenceChunk]) -> EvidenceSummary {
    EvidenceSummary {
        chunk_count: chunks.len(),
        tags: tags_of(chunks),
    }
}

/// Framework-agnostic early exit: generation may proceed only if evidence exists.
///
/// ```
/// use stopgate_domain::{model::EvidenceChunk, should_generate};
///
/// assert!(!should_generate(&[]));
/// assert!(should_generate(&[EvidenceChunk::default()]));
/// ```
pub fn should_generate(chunks: &[EvidenceChunk]) -> bool {
    !chunks.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_of_unions_and_ignores_order() {
        let a = vec![
            EvidenceChunk::with_tags(["b", "a"]),
            EvidenceChunk::default(),
            EvidenceChunk::with_tags(["c", "a"]),
        ];
        let mut b = a.clone();
        b.reverse();

        let tags = tags_of(&a);
        assert_eq!(tags.into_iter().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(tags_of(&a), tags_of(&b));
    }

    #[test]
    fn chunks_without_tags_still_count_as_evidence() {
        let summary = summarize(&[EvidenceChunk::default()]);
        assert!(summary.has_evidence());
        assert!(summary.tags.is_empty());
    }

    #[test]
    fn present_tags_truncates_sorted() {
        let chunk = EvidenceChunk::with_tags((0..30).map(|i| format!("t{i:02}")));
        let summary = summarize(&[chunk]);
        let present = summary.present_tags(25);
        assert_eq!(present.len(), 25);
        assert_eq!(present.first().map(String::as_str), Some("t00"));
        assert_eq!(present.last().map(String::as_str), Some("t24"));
    }
}
