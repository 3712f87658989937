//! Guardrail CLI
//!
//! Evaluates a batch of AI outputs against a policy document and writes one
//! decision record per valid input.

use ai_guardrail_engine::api::{load_inputs, write_records};
use ai_guardrail_engine::telemetry::{init_logging, DecisionMetrics};
use ai_guardrail_engine::{Action, Config, DecisionRecord, GuardrailEngine, PolicyDocument};

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Policy-driven AI guardrail engine
#[derive(Parser, Debug)]
#[command(name = "guardrail")]
#[command(about = "Evaluate AI outputs against guardrail policies")]
#[command(version)]
struct Args {
    /// Policy document (JSON or YAML)
    #[arg(long, env = "GUARDRAIL_POLICIES", default_value = "policies.json")]
    policies: PathBuf,

    /// Input document (JSON or YAML array)
    #[arg(long, env = "GUARDRAIL_INPUTS", default_value = "inputs.json")]
    inputs: PathBuf,

    /// Where to write the decision records
    #[arg(long, env = "GUARDRAIL_OUTPUT", default_value = "output.json")]
    output: PathBuf,

    /// Configuration file path
    #[arg(short, long, env = "GUARDRAIL_CONFIG")]
    config: Option<PathBuf>,

    /// Fallback action when no policy applies (overrides the config and the policy document)
    #[arg(long, value_parser = parse_action)]
    default_action: Option<Action>,

    /// Log level
    #[arg(long, env = "LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable JSON log format
    #[arg(long, env = "JSON_LOGS")]
    json_logs: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_action(value: &str) -> Result<Action, String> {
    value.parse::<Action>().map_err(|e| e.to_string())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::from_env().context("failed to load config from environment")?,
    };

    // Apply command line overrides
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    if args.verbose {
        config.logging.level = "debug".to_string();
    }
    if args.json_logs {
        config.logging.json = true;
    }

    init_logging(&config.logging)?;

    info!("Starting guardrail v{}", ai_guardrail_engine::VERSION);
    info!(policies = %args.policies.display(), inputs = %args.inputs.display(), output = %args.output.display(), "Paths");

    let engine = GuardrailEngine::builder().with_config(config).build()?;

    let document = PolicyDocument::from_file(&args.policies)
        .with_context(|| format!("failed to load policies from {}", args.policies.display()))?;
    let inputs = load_inputs(&args.inputs)
        .with_context(|| format!("failed to load inputs from {}", args.inputs.display()))?;

    if inputs.is_empty() {
        warn!("No inputs to process");
    }

    let records = engine.evaluate_document_with(&document, &inputs, args.default_action);

    write_records(&args.output, &records)
        .with_context(|| format!("failed to write output to {}", args.output.display()))?;
    info!(records = records.len(), "Output written to {}", args.output.display());

    print_summary(&records, &args.output);
    Ok(())
}

/// Print a summary table to stdout.
fn print_summary(records: &[DecisionRecord], output: &Path) {
    let rule = "─".repeat(65);

    println!("\n── Guardrail Summary {}", "─".repeat(45));
    println!("{:<12} {:<10} POLICIES", "ID", "DECISION");
    println!("{}", rule);
    for record in records {
        let policies = if record.applied_policies.is_empty() {
            "(default)".to_string()
        } else {
            record.applied_policies.join(", ")
        };
        println!("{:<12} {:<10} {}", record.id, record.decision.as_str(), policies);
    }
    println!("{}", rule);

    let metrics = DecisionMetrics::from_records(records);
    let totals: Vec<String> = Action::ALL
        .iter()
        .rev()
        .map(|action| format!("{}={}", action, metrics.count(*action)))
        .collect();
    println!("Total processed: {} inputs ({})", metrics.total(), totals.join(", "));
    if metrics.pending_review() > 0 {
        println!("Pending human review: {}", metrics.pending_review());
    }
    println!("Output written to: {}\n", output.display());
}
