use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use esci_toolkit::data::loader::load_json;
use esci_toolkit::report::{print_eval_result, print_eval_result_esci, EvalMetrics};

/// Print a one-line evaluation summary from a metrics JSON file.
#[derive(Debug, Parser)]
#[command(name = "eval_summary", version, about)]
struct Cli {
    /// JSON object with `accuracy`, `f1_macro` and optionally `per_class_accuracy`
    metrics: PathBuf,

    /// Stage label shown in brackets
    #[arg(short, long, default_value = "val")]
    stage: String,

    /// Mark the result as an improvement over the previous best
    #[arg(short, long)]
    improved: bool,

    /// Also print per-class ESCI accuracy
    #[arg(long)]
    esci: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let document = load_json(&cli.metrics)
        .with_context(|| format!("loading metrics from {}", cli.metrics.display()))?;
    let metrics = EvalMetrics::from_json(&document).context("reading metrics")?;
    log::debug!("Metrics: {metrics:?}");

    if cli.esci {
        print_eval_result_esci(&metrics, &cli.stage, cli.improved)?;
    } else {
        print_eval_result(&metrics, &cli.stage, cli.improved);
    }
    Ok(())
}
