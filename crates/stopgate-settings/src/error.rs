use thiserror::Error;

/// Why a policy could not be loaded. Always fatal for a run.
#[derive(Debug, Error)]
pub enum PolicyLoadError {
    #[error("read policy {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("policy {path} is not valid UTF-8: {source}")]
    NotUtf8 {
        path: String,
        source: std::string::FromUtf8Error,
    },

    #[error("policy is neither valid YAML ({yaml}) nor valid JSON ({json})")]
    Parse { yaml: String, json: String },

    #[error("policy document must be a mapping, found {found}")]
    NotAMapping { found: &'static str },

    #[error("policy document has an invalid shape: {0}")]
    Shape(String),

    #[error("policy document has no `roles` section")]
    MissingRoles,

    #[error("{location}: entries must be non-empty strings")]
    InvalidEntry { location: String },

    #[error("role `{role}` lists tag `{tag}` under both must and must_not")]
    ConflictingTag { role: String, tag: String },
}
