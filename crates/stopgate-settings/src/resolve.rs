use crate::error::PolicyLoadError;
use crate::model::{PolicyDocumentV1, RoleConfig};
use std::collections::{BTreeMap, HashSet};
use stopgate_domain::policy::{GlobalPolicy, Policy, RolePolicy};

pub fn resolve_policy(doc: PolicyDocumentV1) -> Result<Policy, PolicyLoadError> {
    let roles_cfg = doc.roles.ok_or(PolicyLoadError::MissingRoles)?;
    let global_cfg = doc.global.unwrap_or_default();

    let global = GlobalPolicy {
        must_links: clean_list("global.must_links", global_cfg.must_links)?,
        require_permission: global_cfg.require_permission.unwrap_or(false),
    };

    let mut roles = BTreeMap::new();
    for (name, cfg) in roles_cfg {
        if name.trim().is_empty() {
            return Err(PolicyLoadError::InvalidEntry {
                location: "roles".to_string(),
            });
        }
        // A null or empty entry declares nothing, so the role stays unknown.
        let Some(cfg) = cfg.filter(|cfg| *cfg != RoleConfig::default()) else {
            continue;
        };
        let role = resolve_role(&name, cfg)?;
        roles.insert(name, role);
    }

    Ok(Policy { global, roles })
}

fn resolve_role(name: &str, cfg: RoleConfig) -> Result<RolePolicy, PolicyLoadError> {
    let must = clean_list(&format!("roles.{name}.must"), cfg.must)?;
    let must_not = clean_list(&format!("roles.{name}.must_not"), cfg.must_not)?;
    let should = clean_list(&format!("roles.{name}.should"), cfg.should)?;

    if let Some(tag) = must_not.iter().find(|tag| must.contains(tag)) {
        return Err(PolicyLoadError::ConflictingTag {
            role: name.to_string(),
            tag: tag.clone(),
        });
    }

    Ok(RolePolicy {
        must,
        must_not,
        should,
    })
}

/// Reject blank entries and drop repeats, keeping first occurrence so declared order
/// survives for tie-breaks.
fn clean_list(location: &str, items: Option<Vec<String>>) -> Result<Vec<String>, PolicyLoadError> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for item in items.unwrap_or_default() {
        if item.trim().is_empty() {
            return Err(PolicyLoadError::InvalidEntry {
                location: location.to_string(),
            });
        }
        if seen.insert(item.clone()) {
            out.push(item);
        }
    }
    Ok(out)
}
