//! Fuzz target for candidate files and JSON Lines chunk files.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_evidence_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = stopgate_repo::fuzz::parse_candidate(text);
        let _ = stopgate_repo::fuzz::parse_chunks(text);
    }
});
