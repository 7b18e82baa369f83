use camino::{Utf8Path, Utf8PathBuf};
use sha2::{Digest, Sha256};
use stopgate_domain::policy::Policy;
use stopgate_settings::PolicyLoadError;

/// A resolved policy plus what the audit trail needs to identify it.
#[derive(Clone, Debug)]
pub struct LoadedPolicy {
    pub policy: Policy,
    pub path: Utf8PathBuf,
    /// Lowercase hex SHA-256 of the raw file bytes.
    pub sha256: String,
}

pub fn load_policy(path: &Utf8Path) -> Result<LoadedPolicy, PolicyLoadError> {
    let bytes = std::fs::read(path).map_err(|source| PolicyLoadError::Read {
        path: path.to_string(),
        source,
    })?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    let sha256 = hex::encode(hasher.finalize());
    let text = String::from_utf8(bytes).map_err(|source| PolicyLoadError::NotUtf8 {
        path: path.to_string(),
        source,
    })?;
    let policy = stopgate_settings::parse_policy(&text)?;

    tracing::debug!(%path, roles = policy.roles.len(), %sha256, "loaded policy");
    Ok(LoadedPolicy {
        policy,
        path: path.to_path_buf(),
        sha256,
    })
}
