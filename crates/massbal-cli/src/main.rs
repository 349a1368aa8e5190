//! massbal CLI - Mass-Balance Engine for Stability Studies
//!
//! Command-line interface for evaluating forced-degradation samples,
//! rendering diagnostic reports, tracking trend studies, and browsing the
//! evaluation history.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use massbal_core::{Evaluator, ReportRenderer, StressCondition};
use massbal_engine::MassBalanceEvaluator;
use massbal_report::{EvaluationRecord, JsonReporter, TextReporter, TrendTableRenderer};

mod history;
mod input;

use history::HistoryFilter;

#[derive(Parser)]
#[command(name = "massbal")]
#[command(author, version, about = "Mass-balance engine for stability studies", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a template sample file with the default test values
    Init {
        /// Output file path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Evaluate one sample and render its diagnostic report
    Evaluate {
        /// Sample file path (TOML)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Append the evaluation to this JSONL history file
        #[arg(long)]
        history: Option<PathBuf>,
    },

    /// Evaluate a trend study and render its table
    Trend {
        /// Trend study file path (TOML)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List evaluations stored in a history file
    History {
        /// History file path (JSONL)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Only records whose analyst name contains this text
        #[arg(long)]
        analyst: Option<String>,

        /// Only records with this stress condition
        #[arg(long)]
        stress: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; -v bumps the default level
    let filter = match cli.verbose {
        0 => EnvFilter::from_default_env(),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Some(Commands::Init { file }) => cmd_init(&file),
        Some(Commands::Evaluate {
            file,
            format,
            output,
            history,
        }) => cmd_evaluate(&file, &format, output.as_deref(), history.as_deref()),
        Some(Commands::Trend { file, output }) => cmd_trend(&file, output.as_deref()),
        Some(Commands::History {
            file,
            analyst,
            stress,
        }) => cmd_history(&file, analyst, stress),
        None => {
            println!("massbal - Mass-Balance Engine for Stability Studies");
            println!("Run with --help for usage information");
            Ok(())
        }
    }
}

fn cmd_init(file: &Path) -> Result<()> {
    input::write_template(file)?;
    println!("Created: {}", file.display());
    println!("Edit the values, then run: massbal evaluate {}", file.display());
    Ok(())
}

fn cmd_evaluate(
    file: &Path,
    format: &str,
    output: Option<&Path>,
    history: Option<&Path>,
) -> Result<()> {
    let sample = input::read_sample(file)?;
    tracing::info!(sample_id = %sample.sample_id, stress = %sample.stress, "evaluating sample");

    let evaluator = MassBalanceEvaluator::new();
    let result = evaluator
        .evaluate(&sample)
        .with_context(|| format!("cannot evaluate sample '{}'", sample.sample_id))?;
    tracing::debug!(
        method = %result.recommended_method,
        value = result.recommended_value,
        status = %result.status,
        "evaluation complete"
    );

    let rendered = match format {
        "text" => TextReporter::new().render(&sample, &result)?,
        "json" => JsonReporter::new().render(&sample, &result)?,
        other => bail!("unknown format '{other}' (expected text or json)"),
    };

    emit(output, &rendered)?;

    if let Some(history_path) = history {
        let record = EvaluationRecord::new(sample, result);
        history::append(history_path, &record)?;
        tracing::info!(path = %history_path.display(), "evaluation recorded");
    }

    Ok(())
}

fn cmd_trend(file: &Path, output: Option<&Path>) -> Result<()> {
    let study = input::read_study(file)?;
    tracing::info!(study = %study.name, points = study.len(), "evaluating trend study");

    let rows = MassBalanceEvaluator::new()
        .evaluate_study(&study)
        .with_context(|| format!("cannot evaluate trend study '{}'", study.name))?;

    let table = TrendTableRenderer::new().render(&study.name, &rows)?;
    emit(output, &table)
}

fn cmd_history(file: &Path, analyst: Option<String>, stress: Option<String>) -> Result<()> {
    let stress = stress
        .map(|s| {
            s.parse::<StressCondition>()
                .map_err(|e| anyhow::anyhow!("{e}"))
        })
        .transpose()?;

    let filter = HistoryFilter { analyst, stress };
    let records = history::list(file, &filter)?;

    if records.is_empty() {
        println!("No matching evaluations in {}", file.display());
        return Ok(());
    }

    println!(
        "{:<20} {:<16} {:<20} {:<11} {:>7} {:>9}  {}",
        "Evaluated", "Sample", "Analyst", "Stress", "Method", "Value", "Status"
    );
    for record in &records {
        println!(
            "{:<20} {:<16} {:<20} {:<11} {:>7} {:>9.2}  {}",
            record.evaluated_at.format("%Y-%m-%d %H:%M:%S"),
            record.sample.sample_id,
            record.sample.analyst,
            record.sample.stress,
            record.result.recommended_method,
            record.result.recommended_value,
            record.result.status,
        );
    }
    println!("{} evaluation(s)", records.len());
    Ok(())
}

/// Print to stdout or write to a file
fn emit(output: Option<&Path>, rendered: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote: {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
