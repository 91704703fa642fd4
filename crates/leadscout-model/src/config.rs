//! Generation backend configuration persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:11434/v1";
pub const DEFAULT_MODEL: &str = "gemma3:1b";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Stored model configuration (persisted to model-config.json).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Path to config file for saving.
    #[serde(skip)]
    pub config_path: PathBuf,
}

fn default_true() -> bool {
    true
}
fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}
fn default_model() -> String {
    DEFAULT_MODEL.into()
}
fn default_max_tokens() -> usize {
    1024
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: DEFAULT_BASE_URL.into(),
            model: DEFAULT_MODEL.into(),
            api_key: None,
            temperature: 0.0,
            max_tokens: default_max_tokens(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            config_path: PathBuf::new(),
        }
    }
}

impl ModelConfig {
    /// Load config from file, then apply environment overrides.
    pub fn load(config_path: &Path) -> Self {
        let mut config: ModelConfig = match std::fs::read_to_string(config_path) {
            Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
                warn!("Ignoring unreadable {}: {}", config_path.display(), e);
                ModelConfig::default()
            }),
            Err(_) => ModelConfig::default(),
        };

        config.config_path = config_path.to_path_buf();
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Apply `LEADSCOUT_MODEL_*` overrides from the given lookup.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = lookup("LEADSCOUT_MODEL_URL") {
            self.base_url = url;
        }
        if let Some(model) = lookup("LEADSCOUT_MODEL") {
            self.model = model;
        }
        if let Some(key) = lookup("LEADSCOUT_MODEL_API_KEY") {
            self.api_key = Some(key);
        }
        if let Some(secs) = lookup("LEADSCOUT_MODEL_TIMEOUT_SECS").and_then(|s| s.parse().ok()) {
            self.timeout_secs = secs;
        }
        if let Some(enabled) = lookup("LEADSCOUT_MODEL_ENABLED") {
            self.enabled = matches!(
                enabled.to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
    }

    /// Save config to disk.
    pub fn save(&self) -> Result<(), std::io::Error> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(&self.config_path, json)?;
        info!("Saved model config to {}", self.config_path.display());
        Ok(())
    }

    /// Upper bound on a single generation call.
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs.max(1))
    }
}
