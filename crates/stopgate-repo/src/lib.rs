//! Filesystem adapters: read the policy, discover candidate files, read candidates and
//! their evidence chunks.
//!
//! This crate is allowed to do filesystem IO. It never evaluates anything; the domain
//! crate does that with what is returned here.

#![forbid(unsafe_code)]

mod candidate;
mod chunks;
mod discover;
mod error;
mod policy;

pub use candidate::{parse_candidate, read_candidate};
pub use chunks::{chunk_file, parse_chunks_json, parse_chunks_jsonl, read_chunks};
pub use discover::discover_candidates;
pub use error::CandidateParseError;
pub use policy::{load_policy, LoadedPolicy};

/// Fuzz-friendly API for testing parsing robustness without filesystem access.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    /// Parse arbitrary text as a policy document. **Never panics** on any input.
    pub fn parse_policy(text: &str) -> bool {
        stopgate_settings::parse_policy(text).is_ok()
    }

    /// Parse arbitrary text as a candidate file. **Never panics** on any input.
    pub fn parse_candidate(text: &str) -> bool {
        super::parse_candidate(text, "fuzz").is_ok()
    }

    /// Parse arbitrary text as a JSON Lines chunk file. **Never panics** on any input.
    pub fn parse_chunks(text: &str) -> usize {
        super::parse_chunks_jsonl(text).map(|c| c.len()).unwrap_or(0)
    }
}
