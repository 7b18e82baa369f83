use crate::error::PolicyLoadError;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Policy document schema v1.
///
/// This is a *user-facing* model: every section is optional at parse time so that
/// validation can report precise errors instead of serde's.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyDocumentV1 {
    /// Optional schema string for tooling (`stopgate.policy.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global: Option<GlobalConfig>,

    /// Map of role name -> tag requirements. A null or empty role is left undeclared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<BTreeMap<String, Option<RoleConfig>>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Evidence keys every candidate must carry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub must_links: Option<Vec<String>>,

    /// Treat a candidate without `permission_to_answer` as lacking permission.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_permission: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub must: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub must_not: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should: Option<Vec<String>>,
}

pub(crate) fn parse_document(input: &str) -> Result<PolicyDocumentV1, PolicyLoadError> {
    match serde_yaml::from_str::<serde_yaml::Value>(input) {
        Ok(value) if value.is_mapping() => serde_yaml::from_value(value)
            .map_err(|err| PolicyLoadError::Shape(err.to_string())),
        Ok(value) => match serde_json::from_str::<JsonValue>(input) {
            Ok(json) if json.is_object() => from_json(json),
            _ => Err(PolicyLoadError::NotAMapping {
                found: yaml_kind(&value),
            }),
        },
        Err(yaml_err) => match serde_json::from_str::<JsonValue>(input) {
            Ok(json) if json.is_object() => from_json(json),
            Ok(json) => Err(PolicyLoadError::NotAMapping {
                found: json_kind(&json),
            }),
            Err(json_err) => Err(PolicyLoadError::Parse {
                yaml: yaml_err.to_string(),
                json: json_err.to_string(),
            }),
        },
    }
}

fn from_json(value: JsonValue) -> Result<PolicyDocumentV1, PolicyLoadError> {
    serde_json::from_value(value).map_err(|err| PolicyLoadError::Shape(err.to_string()))
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "a boolean",
        serde_yaml::Value::Number(_) => "a number",
        serde_yaml::Value::String(_) => "a string",
        serde_yaml::Value::Sequence(_) => "a sequence",
        serde_yaml::Value::Mapping(_) => "a mapping",
        serde_yaml::Value::Tagged(_) => "a tagged value",
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "a sequence",
        JsonValue::Object(_) => "a mapping",
    }
}
