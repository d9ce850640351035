//! Vedabase AI Explainer — terminal entry point.
//!
//! Without a subcommand, opens the interactive explainer. `explain <VERSE>`
//! runs one request and prints the outcome.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use explainer_config::ExplainerConfig;
use vedabase_explainer::explainer::ExplainerView;
use vedabase_explainer::llm::client::GeminiClient;
use vedabase_explainer::oneshot::explain_once;

#[derive(Parser)]
#[command(name = "vedabase-explainer", version, about = "Explain Srimad Bhagavatam verses with Gemini")]
struct Cli {
    /// YAML config file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Model ID or alias (pro, flash).
    #[arg(long, global = true)]
    model: Option<String>,

    /// API host, e.g. a local mock server.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Treat a response without text as an error.
    #[arg(long, global = true)]
    strict_response: bool,

    /// Debug-level logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Explain one verse reference and exit.
    Explain {
        /// Verse reference, e.g. "SB 1.1.1".
        verse: String,
    },
}

enum LogTarget {
    Stderr,
    File(PathBuf),
}

fn init_logging(verbose: bool, target: LogTarget) -> anyhow::Result<()> {
    let default_level = match (&target, verbose) {
        (_, true) => "debug",
        (LogTarget::Stderr, false) => "warn",
        (LogTarget::File(_), false) => "info",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            builder.with_writer(Mutex::new(file)).with_ansi(false).init();
        }
    }
    Ok(())
}

fn resolve_config(cli: &Cli) -> anyhow::Result<ExplainerConfig> {
    let mut config = ExplainerConfig::load(cli.config.as_deref())?;
    if let Some(model) = &cli.model {
        config.model = model.clone();
    }
    if let Some(url) = &cli.base_url {
        config.base_url = url.clone();
    }
    if cli.strict_response {
        config.strict_response = true;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    let target = match cli.command {
        Some(Command::Explain { .. }) => LogTarget::Stderr,
        None => LogTarget::File(config.log_path()),
    };
    init_logging(cli.verbose, target)?;

    if config.api_key.is_empty() {
        warn!(
            "no API key configured (set {} or api_key in the config file)",
            explainer_config::API_KEY_VARS[0]
        );
    }

    let client = GeminiClient::from_config(&config)?;
    info!(model = %client.model(), "using Gemini model");
    let mut view = ExplainerView::from_config(Arc::new(client), &config);

    match cli.command {
        Some(Command::Explain { verse }) => {
            let ok = explain_once(
                &mut view,
                &verse,
                &mut std::io::stdout().lock(),
                &mut std::io::stderr().lock(),
            )
            .await?;
            Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        None => {
            vedabase_explainer::tui::run(view).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
