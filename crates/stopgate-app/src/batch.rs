//! The `batch` use case: gate every candidate in a directory and write the artifacts.

use crate::trace::TraceLogger;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use rayon::prelude::*;
use serde_json::json;
use std::fs::File;
use std::io::{BufWriter, Write};
use stopgate_domain::policy::Policy;
use stopgate_domain::{decide, Decision, DecisionDetail};
use stopgate_repo::{chunk_file, discover_candidates, load_policy, read_candidate, read_chunks};
use stopgate_types::{ids, AllowItem, NegativeProofRecord, Outcome, ReviewItem, RunTotals};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchOptions {
    /// Evaluate candidates on the rayon pool.
    pub parallel: bool,
    /// Write `trace/<run_id>.jsonl`.
    pub trace: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            parallel: false,
            trace: true,
        }
    }
}

/// Input for the batch use case.
#[derive(Clone, Debug)]
pub struct BatchInput<'a> {
    pub candidates_dir: &'a Utf8Path,
    pub chunks_dir: &'a Utf8Path,
    pub policy_path: &'a Utf8Path,
    pub out_dir: &'a Utf8Path,
    pub options: BatchOptions,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub negative_proof: Utf8PathBuf,
    pub review_queue: Utf8PathBuf,
    pub allow_list: Utf8PathBuf,
}

impl ArtifactPaths {
    fn in_dir(out_dir: &Utf8Path) -> Self {
        Self {
            negative_proof: out_dir.join(ids::NEGATIVE_PROOF_FILE),
            review_queue: out_dir.join(ids::REVIEW_QUEUE_FILE),
            allow_list: out_dir.join(ids::ALLOW_LIST_FILE),
        }
    }
}

/// Output from the batch use case.
#[derive(Clone, Debug)]
pub struct BatchOutput {
    pub run_id: String,
    pub totals: RunTotals,
    pub artifacts: ArtifactPaths,
    /// `None` when tracing was disabled.
    pub trace_path: Option<Utf8PathBuf>,
}

/// One candidate file after parsing and evaluation.
#[derive(Debug)]
struct Evaluated {
    file: Utf8PathBuf,
    candidate_id: String,
    name: String,
    role: String,
    decision: Decision,
}

impl Evaluated {
    fn invalid_file(&self) -> Option<(&str, &str)> {
        match self.decision.detail() {
            DecisionDetail::EvidenceInvalid { file, error } => Some((file.as_str(), error.as_str())),
            _ => None,
        }
    }
}

/// Run the batch: load policy, evaluate every candidate, write artifacts and trace.
///
/// Candidate-level problems become `STOP.EVIDENCE_INVALID` decisions. Only structural
/// problems (policy, directories, artifact IO) are returned as errors.
pub fn run_batch(input: BatchInput<'_>) -> anyhow::Result<BatchOutput> {
    let loaded = load_policy(input.policy_path)
        .with_context(|| format!("load policy {}", input.policy_path))?;
    let files = discover_candidates(input.candidates_dir).context("discover candidates")?;
    if !input.chunks_dir.is_dir() {
        anyhow::bail!(
            "chunks directory {} does not exist or is not a directory",
            input.chunks_dir
        );
    }
    std::fs::create_dir_all(input.out_dir)
        .with_context(|| format!("create output directory {}", input.out_dir))?;

    let run_id = uuid::Uuid::new_v4().to_string();
    let mut trace = if input.options.trace {
        let dir = input.out_dir.join(ids::TRACE_DIR);
        Some(TraceLogger::create(&dir, &run_id).with_context(|| format!("create trace in {dir}"))?)
    } else {
        None
    };

    emit(
        &mut trace,
        ids::EVENT_RUN_START,
        json!({
            "policy_path": loaded.path.as_str(),
            "policy_sha256": loaded.sha256,
            "roles": loaded.policy.role_names(),
            "candidates": files.len(),
            "parallel": input.options.parallel,
        }),
    )?;

    let policy = &loaded.policy;
    let evaluated: Vec<Evaluated> = if input.options.parallel {
        files
            .par_iter()
            .map(|file| evaluate_file(file, input.chunks_dir, policy))
            .collect()
    } else {
        files
            .iter()
            .map(|file| evaluate_file(file, input.chunks_dir, policy))
            .collect()
    };

    let artifacts = ArtifactPaths::in_dir(input.out_dir);
    let mut negative = BufWriter::new(
        File::create(&artifacts.negative_proof)
            .with_context(|| format!("create {}", artifacts.negative_proof))?,
    );
    let mut review_items = Vec::new();
    let mut allow_items = Vec::new();
    let mut totals = RunTotals::default();

    for item in &evaluated {
        let outcome = item.decision.outcome();
        let reason = item.decision.reason_code();
        totals.record(outcome, reason);

        if let Some((file, error)) = item.invalid_file() {
            tracing::warn!(candidate_id = %item.candidate_id, %file, %error, "invalid candidate input");
            emit(
                &mut trace,
                ids::EVENT_CANDIDATE_INVALID,
                json!({ "candidate_id": item.candidate_id, "file": file, "error": error }),
            )?;
        }
        tracing::debug!(
            candidate_id = %item.candidate_id,
            outcome = %outcome,
            reason = reason.map(|r| r.as_str()).unwrap_or("-"),
            "decision"
        );
        emit(
            &mut trace,
            ids::EVENT_DECISION,
            json!({
                "candidate_id": item.candidate_id,
                "file": item.file.as_str(),
                "role": item.role,
                "decision": outcome,
                "reason": reason,
                "detail": item.decision.detail_json(),
            }),
        )?;

        match (outcome, reason) {
            (Outcome::Stop, Some(reason)) => {
                let record = NegativeProofRecord {
                    candidate_id: item.candidate_id.clone(),
                    decision: Outcome::Stop,
                    reason,
                    detail: item.decision.detail_json(),
                };
                serde_json::to_writer(&mut negative, &record)
                    .context("serialize negative proof record")?;
                negative
                    .write_all(b"\n")
                    .with_context(|| format!("write {}", artifacts.negative_proof))?;
            }
            (Outcome::Review, Some(reason)) => review_items.push(ReviewItem {
                candidate_id: item.candidate_id.clone(),
                name: item.name.clone(),
                role: item.role.clone(),
                reason,
                detail: item.decision.detail_json(),
            }),
            _ => allow_items.push(AllowItem {
                candidate_id: item.candidate_id.clone(),
                name: item.name.clone(),
                role: item.role.clone(),
            }),
        }
    }

    negative
        .flush()
        .with_context(|| format!("write {}", artifacts.negative_proof))?;
    write_pretty(&artifacts.review_queue, &review_items)?;
    write_pretty(&artifacts.allow_list, &allow_items)?;

    emit(&mut trace, ids::EVENT_RUN_END, json!({ "totals": totals }))?;

    tracing::info!(
        run_id = %run_id,
        total = totals.total,
        allow = totals.allow,
        review = totals.review,
        stop = totals.stop,
        "batch complete"
    );

    Ok(BatchOutput {
        run_id,
        totals,
        artifacts,
        trace_path: trace.map(|t| t.file_path().to_path_buf()),
    })
}

fn evaluate_file(file: &Utf8Path, chunks_dir: &Utf8Path, policy: &Policy) -> Evaluated {
    let candidate = match read_candidate(file) {
        Ok(candidate) => candidate,
        Err(err) => {
            return Evaluated {
                file: file.to_path_buf(),
                candidate_id: file.file_stem().unwrap_or_default().to_string(),
                name: String::new(),
                role: String::new(),
                decision: invalid(file, &err),
            };
        }
    };

    let decision = match chunk_file(chunks_dir, &candidate.candidate_id) {
        Ok(chunk_path) => match read_chunks(&chunk_path) {
            Ok(chunks) => decide(&candidate, &chunks, policy),
            Err(err) => invalid(&chunk_path, &err),
        },
        Err(err) => invalid(file, &err),
    };

    Evaluated {
        file: file.to_path_buf(),
        candidate_id: candidate.candidate_id,
        name: candidate.name,
        role: candidate.applied_role,
        decision,
    }
}

fn invalid(file: &Utf8Path, err: &dyn std::fmt::Display) -> Decision {
    Decision::new(DecisionDetail::EvidenceInvalid {
        file: file.to_string(),
        error: err.to_string(),
    })
}

fn write_pretty<T: serde::Serialize>(path: &Utf8Path, items: &[T]) -> anyhow::Result<()> {
    let mut text = serde_json::to_string_pretty(items).context("serialize artifact")?;
    text.push('\n');
    std::fs::write(path, text).with_context(|| format!("write {path}"))
}

fn emit(
    trace: &mut Option<TraceLogger>,
    event: &str,
    payload: serde_json::Value,
) -> anyhow::Result<()> {
    if let Some(logger) = trace.as_mut() {
        logger
            .emit(event, &payload)
            .with_context(|| format!("write trace event {event}"))?;
    }
    Ok(())
}
