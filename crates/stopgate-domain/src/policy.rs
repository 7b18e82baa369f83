use std::collections::BTreeMap;

/// Missing should-tags needed before a candidate is routed to review.
pub const REVIEW_MIN_MISSING_SHOULD: usize = 2;

/// Role policies with fewer should-tags than this never reach REVIEW.
pub const REVIEW_MIN_DECLARED_SHOULD: usize = 2;

/// Resolved, validated policy. Read-only for the lifetime of a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Policy {
    pub global: GlobalPolicy,
    pub roles: BTreeMap<String, RolePolicy>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GlobalPolicy {
    /// Evidence keys every candidate must carry with a truthy value, in declared order.
    pub must_links: Vec<String>,

    /// When set, a candidate that does not assert `permission_to_answer` is treated as
    /// lacking permission.
    pub require_permission: bool,
}

/// Tag requirements for one requester role.
///
/// Lists keep declared order; rule tie-breaks depend on it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RolePolicy {
    pub must: Vec<String>,
    pub must_not: Vec<String>,
    pub should: Vec<String>,
}

impl Policy {
    pub fn role(&self, name: &str) -> Option<&RolePolicy> {
        self.roles.get(name)
    }

    pub fn role_names(&self) -> Vec<&str> {
        self.roles.keys().map(String::as_str).collect()
    }
}
