//! Policy parsing and resolution.
//!
//! This crate is intentionally IO-free: it parses and validates policy documents provided
//! as strings. Reading the file is the repo layer's job.

#![forbid(unsafe_code)]

mod error;
mod model;
mod resolve;

pub use error::PolicyLoadError;
pub use model::{GlobalConfig, PolicyDocumentV1, RoleConfig};

use stopgate_domain::policy::Policy;

/// Parse a policy document into its typed model. YAML is tried first, then JSON.
pub fn parse_policy_document(input: &str) -> Result<PolicyDocumentV1, PolicyLoadError> {
    model::parse_document(input)
}

/// Validate a parsed document into the policy the engine evaluates against.
pub fn resolve_policy(doc: PolicyDocumentV1) -> Result<Policy, PolicyLoadError> {
    resolve::resolve_policy(doc)
}

/// Parse and resolve in one step.
pub fn parse_policy(input: &str) -> Result<Policy, PolicyLoadError> {
    resolve_policy(parse_policy_document(input)?)
}
