//! CLI entry point for stopgate batch runs.
//!
//! Gates every candidate file in a directory and writes the negative proof, review queue,
//! allow list and trace. Outcomes never affect the exit code; only structural failures do.

mod logging;

use camino::Utf8PathBuf;
use clap::Parser;
use stopgate_app::{
    format_explanation, format_not_found, render_batch_summary, run_batch, run_explain,
    BatchInput, BatchOptions, ExplainOutput,
};

#[derive(Parser, Debug)]
#[command(
    name = "stopgate-batch",
    version,
    about = "Gate a directory of candidates against a role policy"
)]
struct Cli {
    /// Directory of `<candidate_id>.json` files.
    #[arg(required_unless_present = "explain")]
    candidates_dir: Option<Utf8PathBuf>,

    /// Directory of `<candidate_id>.jsonl` chunk files.
    #[arg(required_unless_present = "explain")]
    chunks_dir: Option<Utf8PathBuf>,

    /// Policy file (YAML, or JSON).
    #[arg(required_unless_present = "explain")]
    policy_file: Option<Utf8PathBuf>,

    /// Where artifacts are written.
    #[arg(required_unless_present = "explain")]
    out_dir: Option<Utf8PathBuf>,

    /// Evaluate candidates in parallel. Artifacts are identical to a sequential run.
    #[arg(long)]
    parallel: bool,

    /// Do not write `trace/<run_id>.jsonl`.
    #[arg(long)]
    no_trace: bool,

    /// Print guidance for a reason code and exit.
    #[arg(long, value_name = "REASON_CODE")]
    explain: Option<String>,
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();

    if let Some(code) = cli.explain.as_deref() {
        return cmd_explain(code);
    }

    let (Some(candidates_dir), Some(chunks_dir), Some(policy_file), Some(out_dir)) = (
        cli.candidates_dir,
        cli.chunks_dir,
        cli.policy_file,
        cli.out_dir,
    ) else {
        anyhow::bail!("candidates_dir, chunks_dir, policy_file and out_dir are required");
    };

    let input = BatchInput {
        candidates_dir: &candidates_dir,
        chunks_dir: &chunks_dir,
        policy_path: &policy_file,
        out_dir: &out_dir,
        options: BatchOptions {
            parallel: cli.parallel,
            trace: !cli.no_trace,
        },
    };

    match run_batch(input) {
        Ok(output) => {
            print!("{}", render_batch_summary(&output));
            Ok(())
        }
        Err(err) => {
            eprintln!("stopgate error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn cmd_explain(code: &str) -> anyhow::Result<()> {
    match run_explain(code) {
        ExplainOutput::Found(exp) => {
            print!("{}", format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_codes,
        } => {
            eprint!("{}", format_not_found(&identifier, &available_codes));
            std::process::exit(1);
        }
    }
}
