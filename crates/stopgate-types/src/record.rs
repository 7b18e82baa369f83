use crate::ids::ReasonCode;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::fmt;

/// Gate outcome. STOP and REVIEW are ordinary results, not errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    Allow,
    Review,
    Stop,
}

impl Outcome {
    pub const fn as_str(self) -> &'static str {
        match self {
            Outcome::Allow => "ALLOW",
            Outcome::Review => "REVIEW",
            Outcome::Stop => "STOP",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of `negative_proof.jsonl`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NegativeProofRecord {
    pub candidate_id: String,
    pub decision: Outcome,
    pub reason: ReasonCode,
    pub detail: JsonValue,
}

/// One entry of `review_queue.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewItem {
    pub candidate_id: String,
    pub name: String,
    pub role: String,
    pub reason: ReasonCode,
    pub detail: JsonValue,
}

/// One entry of `allow_list.json`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowItem {
    pub candidate_id: String,
    pub name: String,
    pub role: String,
}

/// One physical line in a run trace.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraceRecord {
    /// Starts at 1 and increases by one per emitted record.
    pub seq: u64,
    pub run_id: String,
    /// RFC 3339, UTC.
    pub ts: String,
    pub event: String,
    pub payload: JsonValue,
}

/// Machine-readable output of the single-decision gate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GateReport {
    pub query: String,
    pub chunk_count: usize,
    pub status: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<ReasonCode>,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub detail: JsonValue,
    #[serde(default)]
    pub next_actions: Vec<NextActionRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextActionRecord {
    pub action: String,
    pub description: String,
}

/// Per-run counters.
///
/// Invariants: `total == allow + review + stop` and the reason histogram sums to
/// `review + stop`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTotals {
    #[serde(rename = "TOTAL")]
    pub total: u64,
    #[serde(rename = "ALLOW")]
    pub allow: u64,
    #[serde(rename = "REVIEW")]
    pub review: u64,
    #[serde(rename = "STOP")]
    pub stop: u64,
    pub reasons: BTreeMap<String, u64>,
}

impl RunTotals {
    /// Count one decision. The reason is only histogrammed for REVIEW and STOP.
    pub fn record(&mut self, outcome: Outcome, reason: Option<ReasonCode>) {
        self.total += 1;
        match outcome {
            Outcome::Allow => {
                self.allow += 1;
                return;
            }
            Outcome::Review => self.review += 1,
            Outcome::Stop => self.stop += 1,
        }
        if let Some(code) = reason {
            *self.reasons.entry(code.as_str().to_string()).or_insert(0) += 1;
        }
    }

    pub fn is_consistent(&self) -> bool {
        let reason_sum: u64 = self.reasons.values().sum();
        self.total == self.allow + self.review + self.stop
            && reason_sum == self.review + self.stop
    }

    /// Reasons ranked by count (descending), ties broken by code.
    pub fn ranked_reasons(&self) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> = self
            .reasons
            .iter()
            .map(|(code, count)| (code.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        ranked
    }
}
