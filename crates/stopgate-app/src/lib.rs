//! Use case orchestration for stopgate.
//!
//! This crate provides the application layer: use cases that coordinate the domain and
//! repo layers and own everything with side effects (artifacts, trace, clock, run ids).
//!
//! The CLI crate depends on this; it only handles argument parsing and process exit codes.

#![forbid(unsafe_code)]

mod batch;
mod explain;
mod gate;
mod render;
pub mod trace;

pub use batch::{run_batch, ArtifactPaths, BatchInput, BatchOptions, BatchOutput};
pub use explain::{format_explanation, format_not_found, run_explain, ExplainOutput};
pub use gate::{decide_request, gate_exit_code, load_chunks, run_gate, ChunkSource, GateInput};
pub use render::{render_batch_summary, render_gate_json, render_gate_text};
pub use trace::{TraceError, TraceLogger};
