//! Stable DTOs and IDs used across the stopgate workspace.
//!
//! This crate is intentionally boring:
//! - the reason-code registry and artifact/event names
//! - data types for the emitted artifacts and trace records
//! - guidance registry (explanation + next actions per reason code)

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod record;

pub use explain::{explanation_for, lookup_explanation, Explanation, NextAction};
pub use ids::ReasonCode;
pub use record::{
    AllowItem, GateReport, NegativeProofRecord, NextActionRecord, Outcome, ReviewItem, RunTotals,
    TraceRecord,
};
