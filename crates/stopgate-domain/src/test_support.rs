use crate::model::{Candidate, EvidenceChunk};
use crate::policy::{GlobalPolicy, Policy, RolePolicy};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn candidate(id: &str, role: &str) -> Candidate {
    Candidate {
        candidate_id: id.to_string(),
        name: format!("Candidate {id}"),
        applied_role: role.to_string(),
        ..Candidate::default()
    }
}

pub fn chunks(tag_sets: &[&[&str]]) -> Vec<EvidenceChunk> {
    tag_sets
        .iter()
        .map(|tags| EvidenceChunk::with_tags(tags.iter().copied()))
        .collect()
}

pub fn role(must: &[&str], must_not: &[&str], should: &[&str]) -> RolePolicy {
    RolePolicy {
        must: strings(must),
        must_not: strings(must_not),
        should: strings(should),
    }
}

pub fn policy(must_links: &[&str], roles: Vec<(&str, RolePolicy)>) -> Policy {
    Policy {
        global: GlobalPolicy {
            must_links: strings(must_links),
            require_permission: false,
        },
        roles: roles
            .into_iter()
            .map(|(name, role)| (name.to_string(), role))
            .collect(),
    }
}
