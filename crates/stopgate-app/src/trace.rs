//! Append-only JSON Lines audit trail for a run.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use stopgate_types::TraceRecord;
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("trace io: {0}")]
    Io(#[from] std::io::Error),

    #[error("trace payload is not serializable: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("trace timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
}

/// Writes `<dir>/<run_id>.jsonl`, one flushed record per `emit`.
///
/// The logger only observes; nothing it writes feeds back into a decision.
#[derive(Debug)]
pub struct TraceLogger {
    run_id: String,
    path: Utf8PathBuf,
    file: File,
    seq: u64,
}

impl TraceLogger {
    pub fn create(dir: &Utf8Path, run_id: &str) -> Result<Self, TraceError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(format!("{run_id}.jsonl"));
        // seq restarts per logger, so a run id gets exactly one file.
        let file = OpenOptions::new().create_new(true).append(true).open(&path)?;
        Ok(Self {
            run_id: run_id.to_string(),
            path,
            file,
            seq: 0,
        })
    }

    /// Append one record and return its sequence number.
    ///
    /// The sequence number is only consumed once the line is written.
    pub fn emit<P: Serialize>(&mut self, event: &str, payload: &P) -> Result<u64, TraceError> {
        let payload = serde_json::to_value(payload)?;
        let record = TraceRecord {
            seq: self.seq + 1,
            run_id: self.run_id.clone(),
            ts: OffsetDateTime::now_utc().format(&Rfc3339)?,
            event: event.to_string(),
            payload,
        };
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');
        self.file.write_all(line.as_bytes())?;
        self.file.flush()?;

        self.seq = record.seq;
        Ok(self.seq)
    }

    pub fn file_path(&self) -> &Utf8Path {
        &self.path
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }
}
