use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{BosquesError, Result};

/// Top-level configuration for the Bosques concierge.
///
/// Loaded from `~/.bosques/config.toml` by default. Each section corresponds
/// to one component; every section falls back to its defaults when omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BosquesConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub relay: RelayConfig,
    #[serde(default)]
    pub concierge: ConciergeConfig,
    #[serde(default)]
    pub leads: LeadsConfig,
}

impl BosquesConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: BosquesConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| BosquesError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// HTTP listener settings for the relay.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub bind: String,
    pub port: u16,
    /// Maximum accepted request body, in bytes.
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 8787,
            body_limit_bytes: 256 * 1024,
        }
    }
}

/// Upstream completion provider settings used by the relay.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Chat completions endpoint of the provider.
    pub upstream_url: String,
    /// Model identifier sent with every request.
    pub model: String,
    pub temperature: f64,
    /// Name of the environment variable holding the provider credential.
    ///
    /// The credential itself is never stored in the config file.
    pub api_key_env: String,
    /// Upstream request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            upstream_url: "https://api.x.ai/v1/chat/completions".to_string(),
            model: "grok-beta".to_string(),
            temperature: 0.7,
            api_key_env: "GROK_API_KEY".to_string(),
            timeout_secs: 30,
        }
    }
}

impl RelayConfig {
    /// Read the provider credential from the process environment.
    ///
    /// Empty values count as missing.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// Chat concierge client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConciergeConfig {
    /// Public relay endpoint. When unset the concierge runs in scripted mode.
    pub relay_url: Option<String>,
    /// Number of prior transcript entries forwarded with each message.
    pub history_limit: usize,
    /// Keywords that reveal the human-contact banner (case-insensitive).
    pub escalation_keywords: Vec<String>,
    /// External messaging handoff linked from the banner.
    pub escalation_url: String,
    /// Also run the escalation classifier over the user's own text.
    pub check_user_text: bool,
    /// Simulated thinking delay in scripted mode, in milliseconds.
    pub scripted_delay_ms: u64,
}

impl Default for ConciergeConfig {
    fn default() -> Self {
        Self {
            relay_url: None,
            history_limit: 10,
            escalation_keywords: vec![
                "asesor".to_string(),
                "humano".to_string(),
                "cita".to_string(),
                "whatsapp".to_string(),
            ],
            escalation_url: "https://wa.me/3333363636".to_string(),
            check_user_text: false,
            scripted_delay_ms: 1000,
        }
    }
}

/// Lead form settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadsConfig {
    /// Simulated submission latency in milliseconds.
    pub submit_delay_ms: u64,
}

impl Default for LeadsConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: 1500,
        }
    }
}
