//! Shared test utilities for the stopgate workspace.
//!
//! Trace records carry a fresh run id and wall-clock timestamps; these helpers replace
//! them with fixed placeholders so traces from two runs can be compared.

use serde_json::Value;

pub const RUN_ID_PLACEHOLDER: &str = "__RUN_ID__";
pub const TIMESTAMP_PLACEHOLDER: &str = "__TIMESTAMP__";

/// Normalize one trace record.
///
/// `run_id` and `ts` are replaced at the root only; payloads are left alone.
pub fn normalize_trace_record(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        if obj.contains_key("run_id") {
            obj.insert(
                "run_id".to_string(),
                Value::String(RUN_ID_PLACEHOLDER.to_string()),
            );
        }
        if obj.contains_key("ts") {
            obj.insert(
                "ts".to_string(),
                Value::String(TIMESTAMP_PLACEHOLDER.to_string()),
            );
        }
    }
    value
}

/// Parse and normalize every non-blank line of a trace file.
///
/// Panics on a line that is not JSON; this is test-only code.
pub fn normalize_trace(text: &str) -> Vec<Value> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let value: Value = serde_json::from_str(line)
                .unwrap_or_else(|err| panic!("trace line is not JSON ({err}): {line}"));
            normalize_trace_record(value)
        })
        .collect()
}

/// Event names of a trace, in order.
pub fn trace_events(text: &str) -> Vec<String> {
    normalize_trace(text)
        .iter()
        .filter_map(|record| record.get("event").and_then(Value::as_str))
        .map(str::to_string)
        .collect()
}
