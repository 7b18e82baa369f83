//! CLI entry point for a single stopgate decision.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `stopgate-app` crate.

mod logging;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Args, Parser, ValueEnum};
use std::io::Read;
use stopgate_app::{
    gate_exit_code, load_chunks, render_gate_json, render_gate_text, run_gate, ChunkSource,
    GateInput,
};
use stopgate_domain::model::AdapterSuggestion;

/// Exit code for argument, IO and parse failures.
const EXIT_STRUCTURAL: i32 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "stopgate",
    version,
    about = "Stop-first evidence gate: decide whether an answer may be generated",
    after_help = "Examples:\n  stopgate --query \"What is the CEO's salary?\" --chunks chunks.json\n  stopgate --query \"test query\" --chunks-empty\n  echo '[]' | stopgate --query \"test query\" --chunks-stdin"
)]
struct Cli {
    /// The user query being gated.
    #[arg(long)]
    query: String,

    #[command(flatten)]
    chunks: ChunksArgs,

    /// The query asks for a decision rather than information.
    #[arg(long)]
    decision_request: bool,

    /// The retrieved documents do not grant permission to answer.
    #[arg(long)]
    no_permission: bool,

    /// Advisory suggestion from an upstream adapter. Never binding.
    #[arg(long, value_enum)]
    adapter_suggestion: Option<SuggestionArg>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct ChunksArgs {
    /// JSON array file, or JSON Lines when the name ends in `.jsonl`.
    #[arg(long)]
    chunks: Option<Utf8PathBuf>,

    /// Read a JSON array of chunks from stdin.
    #[arg(long)]
    chunks_stdin: bool,

    /// Gate with no chunks at all.
    #[arg(long)]
    chunks_empty: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SuggestionArg {
    Allow,
    Stop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

fn main() {
    logging::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("stopgate error: {err:#}");
            std::process::exit(EXIT_STRUCTURAL);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let source = chunk_source(&cli.chunks)?;
    let chunks = load_chunks(&source)?;

    let input = GateInput {
        query: cli.query,
        chunks,
        is_decision_request: cli.decision_request,
        permission_to_answer: !cli.no_permission,
        adapter_suggestion: match cli.adapter_suggestion {
            None => AdapterSuggestion::None,
            Some(SuggestionArg::Allow) => AdapterSuggestion::Allow,
            Some(SuggestionArg::Stop) => AdapterSuggestion::Stop,
        },
    };
    let report = run_gate(&input);

    match cli.output {
        OutputFormat::Json => print!("{}", render_gate_json(&report)?),
        OutputFormat::Text => print!("{}", render_gate_text(&report)),
    }

    Ok(gate_exit_code(report.status))
}

fn chunk_source(args: &ChunksArgs) -> anyhow::Result<ChunkSource> {
    if let Some(path) = &args.chunks {
        return Ok(ChunkSource::Path(path.clone()));
    }
    if args.chunks_stdin {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("read chunks from stdin")?;
        return Ok(ChunkSource::Json(text));
    }
    Ok(ChunkSource::Empty)
}
