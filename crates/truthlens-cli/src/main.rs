//! TruthLens CLI
//!
//! Scores one piece of news text with the classical ensemble and prints the
//! `[ordinal, confidence]` verdict on stdout. Logs go to stderr.
//!
//! Any failure to produce a real verdict prints the neutral `[3,0.5]` and
//! still exits successfully.

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use tracing::{error, info};
use truthlens_classifiers::{EnsemblePipeline, Prediction};
use truthlens_core::{ModelResult, ModelRole, Verdict};

mod config;

use config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "truthlens")]
#[command(about = "Score news text on the six-level LIAR truthfulness scale", long_about = None)]
pub struct Cli {
    /// News text to score; multiple words are joined with spaces
    text: Vec<String>,

    /// Read the text from standard input
    #[arg(long, conflicts_with = "text")]
    stdin: bool,

    /// Configuration file path
    #[arg(short, long, env = "TRUTHLENS_CONFIG", default_value = "truthlens.yaml")]
    config: PathBuf,

    /// Model directory, overriding the config and search paths
    #[arg(short, long, env = "TRUTHLENS_MODEL_DIR")]
    model_dir: Option<PathBuf>,

    /// Print per-model details as JSON on stderr
    #[arg(long)]
    explain: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

/// Details printed by `--explain`
#[derive(Debug, Serialize)]
struct Explanation {
    verdict: Verdict,
    fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scale: Option<&'static str>,
    results: Vec<ModelResult>,
    missing_roles: Vec<ModelRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl Explanation {
    fn from_prediction(prediction: &Prediction) -> Self {
        Self {
            verdict: prediction.verdict(),
            fallback: false,
            label: Some(prediction.outcome.label.to_string()),
            scale: Some(prediction.score.scale.name()),
            results: prediction.results.clone(),
            missing_roles: prediction.missing_roles.clone(),
            error: None,
        }
    }

    fn fallback(reason: impl ToString) -> Self {
        Self {
            verdict: Verdict::NEUTRAL,
            fallback: true,
            label: None,
            scale: None,
            results: Vec::new(),
            missing_roles: Vec::new(),
            error: Some(reason.to_string()),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(&cli.config, &cli);
    let logging = config
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();
    init_tracing(cli.verbose, cli.log_json || logging.json, &logging.filter);

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration from {}: {:#}", cli.config.display(), e);
            return emit(&cli, Explanation::fallback(e));
        }
    };

    let text = match read_text(&cli) {
        Ok(text) => text,
        Err(e) => {
            error!("Failed to read input text: {:#}", e);
            return emit(&cli, Explanation::fallback(e));
        }
    };

    if text.trim().is_empty() {
        info!("No input text, emitting neutral verdict");
        return emit(&cli, Explanation::fallback("input text is empty"));
    }

    let pipeline = EnsemblePipeline::from_config(config.classifiers);
    let explanation = match pipeline.evaluate(&text) {
        (_, Ok(prediction)) => Explanation::from_prediction(&prediction),
        (_, Err(e)) => Explanation::fallback(e),
    };

    emit(&cli, explanation)
}

fn read_text(cli: &Cli) -> Result<String> {
    if cli.stdin {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(cli.text.join(" "))
    }
}

/// Print the verdict on stdout, and the explanation on stderr when asked
fn emit(cli: &Cli, explanation: Explanation) -> Result<()> {
    if cli.explain {
        eprintln!("{}", serde_json::to_string_pretty(&explanation)?);
    }
    println!("{}", explanation.verdict.to_json()?);
    Ok(())
}

/// Initialize tracing/logging on stderr
fn init_tracing(verbose: bool, json: bool, default_filter: &str) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("truthlens=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
    };

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
