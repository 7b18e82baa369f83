//! Pure gate evaluation (no IO).
//!
//! Input: a candidate, its evidence chunks, and a resolved policy, all constructed elsewhere.
//! Output: exactly one `Decision` per candidate.

#![forbid(unsafe_code)]

pub mod boundary;
pub mod decision;
pub mod evidence;
pub mod model;
pub mod policy;

mod engine;
mod rules;

#[cfg(test)]
mod properties;
#[cfg(test)]
mod test_support;

pub use boundary::{boundary_gate, check_evidence, BoundaryFacts};
pub use decision::{Decision, DecisionDetail};
pub use engine::{decide, evaluate};
pub use evidence::{should_generate, summarize, tags_of, EvidenceSummary};
