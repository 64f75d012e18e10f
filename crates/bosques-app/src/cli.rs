//! CLI argument definitions for the `bosques` binary.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Bosques California concierge: chat relay, terminal concierge and lead
/// prequalification.
#[derive(Parser, Debug)]
#[command(name = "bosques", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the chat relay HTTP service.
    Serve {
        /// Relay port.
        #[arg(short = 'p', long = "port")]
        port: Option<u16>,

        /// Interface to bind.
        #[arg(short = 'b', long = "bind")]
        bind: Option<String>,
    },
    /// Talk to the concierge from the terminal.
    Chat {
        /// Relay endpoint, e.g. http://127.0.0.1:8787/chat. Scripted answers
        /// are used when none is configured.
        #[arg(long = "relay-url")]
        relay_url: Option<String>,
    },
    /// Fill in the prequalification questionnaire.
    Prequalify,
    /// Write a default configuration file to the resolved config path.
    Init {
        /// Overwrite an existing file.
        #[arg(long = "force")]
        force: bool,
    },
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > BOSQUES_CONFIG env var > ~/.bosques/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("BOSQUES_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the relay port.
    ///
    /// Priority: --port flag > BOSQUES_PORT env var > config file value.
    pub fn resolve_port(&self, config_port: u16) -> u16 {
        if let Command::Serve { port: Some(p), .. } = self.command {
            return p;
        }
        std::env::var("BOSQUES_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(config_port)
    }

    /// Resolve the bind address. Priority: --bind flag > config file value.
    pub fn resolve_bind(&self, config_bind: &str) -> String {
        match &self.command {
            Command::Serve { bind: Some(b), .. } => b.clone(),
            _ => config_bind.to_string(),
        }
    }

    /// Resolve the concierge relay endpoint.
    ///
    /// Priority: --relay-url flag > BOSQUES_RELAY_URL env var > config file value.
    pub fn resolve_relay_url(&self, config_url: Option<&str>) -> Option<String> {
        if let Command::Chat {
            relay_url: Some(url),
        } = &self.command
        {
            return Some(url.clone());
        }
        if let Ok(url) = std::env::var("BOSQUES_RELAY_URL") {
            return Some(url);
        }
        config_url.map(str::to_string)
    }

    /// Resolve the log level. Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".bosques").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".bosques").join("config.toml");
    }
    PathBuf::from("config.toml")
}
