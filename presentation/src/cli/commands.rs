//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Which classifier to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StrategyKind {
    /// Primary, backup and negative-check opinions combined by consensus
    #[default]
    Consensus,
    /// Single call, first category name found in the reply
    Baseline,
}

/// CLI arguments for triage-quorum
#[derive(Parser, Debug)]
#[command(name = "triage-quorum")]
#[command(author, version, about = "Consensus classification of service requests")]
#[command(long_about = r#"
Triage Quorum classifies free-text service requests into a closed set of
categories by asking a model three independent questions and combining the
answers:

1. Primary:  a structured (JSON) label
2. Backup:   a label asked for in a different way
3. Negative: whether the request is classifiable at all

Disagreement lowers the confidence tier and routes the request to a human.

Configuration files are loaded from (in priority order):
1. TRIAGE_* environment variables
2. --config <path>     Explicit config file
3. ./triage.toml       Project-level config
4. ~/.config/triage-quorum/config.toml   Global config

Example:
  triage-quorum evaluate --input customer-calls.json --output results.json
  triage-quorum classify "There's water coming up through the road"
  triage-quorum metrics results.json
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write diagnostic logs to this file instead of stderr
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Machine-readable JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify every record of a labeled dataset and score the results
    Evaluate(EvaluateArgs),
    /// Classify a single text
    Classify(ClassifyArgs),
    /// Recompute and print metrics for a saved report
    Metrics(MetricsArgs),
}

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Dataset JSON (`{"calls": [...]}` or a bare array)
    #[arg(long, value_name = "PATH", default_value = "customer-calls.json")]
    pub input: PathBuf,

    /// Where to write the report
    #[arg(long, value_name = "PATH", default_value = "robust-evaluation-results.json")]
    pub output: PathBuf,

    /// Evaluate only the first N records
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Model to use (overrides configuration)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Classifier to run
    #[arg(long, value_enum, default_value_t = StrategyKind::Consensus)]
    pub strategy: StrategyKind,

    /// Records in flight at once (overrides configuration)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: Option<u16>,

    /// Ask primary, backup and negative-check one after another
    #[arg(long)]
    pub sequential_strategies: bool,

    /// JSONL conversation log (overrides configuration)
    #[arg(long, value_name = "PATH")]
    pub conversation_log: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Text to classify
    pub text: String,

    /// Model to use (overrides configuration)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Classifier to run
    #[arg(long, value_enum, default_value_t = StrategyKind::Consensus)]
    pub strategy: StrategyKind,
}

#[derive(Args, Debug)]
pub struct MetricsArgs {
    /// Report JSON written by `evaluate`
    pub report: PathBuf,
}
