//! CLI entrypoint for Triage Quorum
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use triage_application::{
    BaselineClassifier, ClassifierConfig, Classify, ConsensusClassifier, ConversationLogger,
    EvaluationParams, EvaluationProgress, ModelInvoker, NoConversationLogger, RunEvaluationInput,
    RunEvaluationUseCase,
};
use triage_domain::OutputFormat;
use triage_infrastructure::{
    AnthropicGateway, AnthropicSettings, ConfigLoader, FileConfig, JsonlConversationLogger,
    load_dataset, load_report, save_report,
};
use triage_presentation::{
    ClassifyArgs, Cli, Command, ConsoleFormatter, EvaluateArgs, MetricsArgs, ProgressReporter,
    SimpleProgress, StrategyKind,
};

/// Output switches shared by every subcommand
struct Ui {
    format: OutputFormat,
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {e}"))?
    };

    for issue in config.check()? {
        warn!("{}", issue);
    }

    let ui = Ui {
        format: if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        },
        quiet: cli.quiet,
    };

    info!("Starting Triage Quorum");

    match cli.command {
        Some(Command::Evaluate(args)) => run_evaluate(&config, args, &ui).await,
        Some(Command::Classify(args)) => run_classify(&config, args, &ui).await,
        Some(Command::Metrics(args)) => run_metrics(&config, args, &ui),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

/// Log level from `-v` count unless `RUST_LOG` is set
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .with_context(|| format!("--log-file {} does not name a file", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

// ==================== Dependency Injection ====================

fn classifier_config(config: &FileConfig, model_override: Option<&str>) -> Result<ClassifierConfig> {
    let mut classifier = config.classifier.clone();
    if let Some(model) = model_override {
        classifier.model = model.to_string();
    }

    let (_, model_issues) = classifier.parse_model();
    for issue in model_issues.iter().filter(|i| !i.is_error()) {
        warn!("{}", issue);
    }

    classifier.to_classifier_config().map_err(|issues| {
        let messages: Vec<String> = issues.iter().map(ToString::to_string).collect();
        anyhow::anyhow!("Invalid classifier configuration:\n  {}", messages.join("\n  "))
    })
}

fn conversation_logger(path: Option<&PathBuf>) -> Arc<dyn ConversationLogger> {
    let Some(path) = path else {
        return Arc::new(NoConversationLogger);
    };
    match JsonlConversationLogger::create(path) {
        Ok(logger) => {
            info!("Conversation log: {}", logger.path().display());
            Arc::new(logger)
        }
        Err(e) => {
            warn!("Could not open conversation log {}: {}", path.display(), e);
            Arc::new(NoConversationLogger)
        }
    }
}

fn build_classifier(
    config: &FileConfig,
    classifier_config: &ClassifierConfig,
    params: &EvaluationParams,
    strategy: StrategyKind,
    logger: Arc<dyn ConversationLogger>,
) -> Result<Arc<dyn Classify>> {
    let settings = AnthropicSettings::from_file_config(&config.providers.anthropic)?;
    let gateway = Arc::new(AnthropicGateway::new(settings)?);

    let invoker = ModelInvoker::new(gateway, classifier_config.model.clone())
        .with_timeout(params.call_timeout)
        .with_logger(logger);

    Ok(match strategy {
        StrategyKind::Consensus => Arc::new(
            ConsensusClassifier::new(invoker, classifier_config)
                .with_parallel_strategies(params.parallel_strategies),
        ),
        StrategyKind::Baseline => Arc::new(BaselineClassifier::new(invoker, classifier_config)),
    })
}

// ==================== Subcommands ====================

async fn run_evaluate(config: &FileConfig, args: EvaluateArgs, ui: &Ui) -> Result<()> {
    let classifier_config = classifier_config(config, args.model.as_deref())?;

    let mut params = config.evaluation.to_params();
    if args.limit.is_some() {
        params = params.with_limit(args.limit);
    }
    if let Some(concurrency) = args.concurrency {
        params = params.with_concurrency(usize::from(concurrency));
    }
    if args.sequential_strategies {
        params = params.with_parallel_strategies(false);
    }

    let items = load_dataset(&args.input)?;
    if !ui.quiet && !ui.format.is_json() {
        println!("Loaded {} customer calls", items.len());
        println!("Using model: {}", classifier_config.model);
    }

    let logger = conversation_logger(
        args.conversation_log
            .as_ref()
            .or(config.logging.conversation_log.as_ref()),
    );
    let classifier = build_classifier(
        config,
        &classifier_config,
        &params,
        args.strategy,
        Arc::clone(&logger),
    )?;

    let use_case =
        RunEvaluationUseCase::new(classifier, classifier_config.categories.clone()).with_logger(logger);
    let input = RunEvaluationInput::new(items).with_params(params);

    let report = if ui.quiet {
        use_case.execute(input).await?
    } else {
        let progress: Box<dyn EvaluationProgress> = if std::io::stderr().is_terminal() {
            Box::new(ProgressReporter::new())
        } else {
            Box::new(SimpleProgress::new())
        };
        use_case.execute_with_progress(input, progress.as_ref()).await?
    };

    save_report(&report, &args.output)?;

    if ui.format.is_json() {
        println!("{}", ConsoleFormatter::format_json(&report.metrics));
    } else {
        println!("{}", ConsoleFormatter::format_evaluation(&report, Some(&args.output)));
    }

    if !report.failures.is_empty() && report.results.is_empty() {
        bail!("Every call failed; see {} for details", args.output.display());
    }
    Ok(())
}

async fn run_classify(config: &FileConfig, args: ClassifyArgs, ui: &Ui) -> Result<()> {
    let classifier_config = classifier_config(config, args.model.as_deref())?;
    let params = config.evaluation.to_params();
    let logger = conversation_logger(config.logging.conversation_log.as_ref());
    let classifier = build_classifier(config, &classifier_config, &params, args.strategy, logger)?;

    let classification = classifier.classify(&args.text).await?;

    if ui.format.is_json() {
        let value = serde_json::json!({
            "customer_input": args.text,
            "call_type": classification.verdict.label(),
            "confidence": classification.verdict.confidence(),
            "needs_human": classification.verdict.needs_human(),
            "debug": classification.debug,
        });
        println!("{}", ConsoleFormatter::format_json(&value));
    } else {
        println!("{}", ConsoleFormatter::format_classification(&args.text, &classification));
    }
    Ok(())
}

/// Slack for ratios read back from a stored report
const METRICS_TOLERANCE: f64 = 1e-9;

fn run_metrics(config: &FileConfig, args: MetricsArgs, ui: &Ui) -> Result<()> {
    let (categories, issues) = config.classifier.parse_categories();
    let Some(categories) = categories else {
        let messages: Vec<String> = issues.iter().map(ToString::to_string).collect();
        bail!("Invalid category configuration: {}", messages.join("; "));
    };

    let report = load_report(&args.report)?;
    let metrics = report.recompute_metrics(&categories);
    if !metrics.approx_eq(&report.metrics, METRICS_TOLERANCE) {
        warn!(
            "Stored metrics in {} differ from a fresh computation; showing the fresh values",
            args.report.display()
        );
    }

    if ui.format.is_json() {
        println!("{}", ConsoleFormatter::format_json(&metrics));
    } else {
        println!("{}", ConsoleFormatter::format_metrics(&metrics));
    }
    Ok(())
}
