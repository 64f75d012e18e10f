//! Bosques application binary - composition root.
//!
//! 1. Parse the CLI and initialize tracing
//! 2. Load configuration from TOML
//! 3. Run the selected command: the chat relay, the terminal concierge,
//!    the prequalification questionnaire, or writing a default config file

mod cli;
mod interactive;

use std::path::Path;
use std::sync::Arc;

use bosques_api::{GrokProvider, RelayState};
use bosques_chat::ConciergeSession;
use bosques_core::config::BosquesConfig;
use bosques_core::error::BosquesError;
use bosques_leads::SimulatedSubmitter;
use clap::Parser;
use tokio::io::BufReader;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{reload, EnvFilter};

use cli::{CliArgs, Command};

/// Write the default configuration to `path`.
///
/// An existing file is only replaced when `force` is set.
fn init_config(path: &Path, force: bool) -> Result<(), BosquesError> {
    if path.exists() && !force {
        return Err(BosquesError::Config(format!(
            "{} already exists; pass --force to overwrite",
            path.display()
        )));
    }
    BosquesConfig::default().save(path)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Tracing. RUST_LOG wins, then --log-level; otherwise the filter starts
    // at "info" and is switched to the config file's level once loaded.
    // Logs go to stderr so they stay out of the interactive transcript.
    let env_filter = EnvFilter::try_from_default_env().ok();
    let pinned = env_filter.is_some() || args.log_level.is_some();
    let initial = env_filter.unwrap_or_else(|| EnvFilter::new(args.resolve_log_level("info")));
    let (filter, filter_handle) = reload::Layer::new(initial);
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Bosques v{}", env!("CARGO_PKG_VERSION"));

    let config_file = args.resolve_config_path();
    let mut config = BosquesConfig::load_or_default(&config_file);
    if !pinned {
        if let Err(e) = filter_handle.reload(EnvFilter::new(&config.general.log_level)) {
            tracing::warn!(error = %e, "Could not apply configured log level");
        }
    }

    match &args.command {
        Command::Serve { .. } => {
            config.server.port = args.resolve_port(config.server.port);
            config.server.bind = args.resolve_bind(&config.server.bind);

            let provider = GrokProvider::from_config(&config.relay)?;
            let state = RelayState::new(Arc::new(provider));
            bosques_api::start_server(&config, state).await?;
        }
        Command::Chat { .. } => {
            config.concierge.relay_url =
                args.resolve_relay_url(config.concierge.relay_url.as_deref());

            let mut session = ConciergeSession::from_config(&config.concierge)?;
            let mut input = BufReader::new(tokio::io::stdin());
            let mut output = tokio::io::stdout();
            interactive::run_chat(
                &mut session,
                &config.concierge.escalation_url,
                &mut input,
                &mut output,
            )
            .await?;
        }
        Command::Init { force } => {
            init_config(&config_file, *force)?;
            tracing::info!("Default configuration written to {}", config_file.display());
        }
        Command::Prequalify => {
            let submitter = SimulatedSubmitter::from_config(&config.leads);
            let mut input = BufReader::new(tokio::io::stdin());
            let mut output = tokio::io::stdout();
            interactive::run_prequalify(&submitter, &mut input, &mut output).await?;
        }
    }

    tracing::info!("Bosques stopped");
    Ok(())
}
