//! Configuration and data directory management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_PORT: u16 = 3017;
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Paths to all LeadScout data files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    /// Root data directory (e.g., `data/`).
    pub root: PathBuf,
    /// Persisted lead collection (`data/leads.json`).
    pub leads_file: PathBuf,
    /// Generation backend configuration (`data/model-config.json`).
    pub model_config_file: PathBuf,
}

impl DataPaths {
    /// Create data paths from a root directory. Creates the directory if needed.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;
        Ok(Self {
            leads_file: root.join("leads.json"),
            model_config_file: root.join("model-config.json"),
            root,
        })
    }
}

/// Top-level LeadScout configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadScoutConfig {
    /// Interface the HTTP service binds to.
    pub host: String,
    /// HTTP service port.
    pub port: u16,
    /// Data directory paths.
    pub data_paths: DataPaths,
}

impl LeadScoutConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env(data_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let host = std::env::var("LEADSCOUT_HOST")
            .ok()
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let data_paths = DataPaths::new(data_dir)?;

        Ok(Self {
            host,
            port,
            data_paths,
        })
    }

    /// Socket address string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_paths_layout() {
        let dir = tempfile::TempDir::new().unwrap();
        let root = dir.path().join("nested").join("data");
        let paths = DataPaths::new(&root).unwrap();

        assert!(root.is_dir());
        assert_eq!(paths.leads_file, root.join("leads.json"));
        assert_eq!(paths.model_config_file, root.join("model-config.json"));
    }

    #[test]
    fn test_bind_addr() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = LeadScoutConfig {
            host: "0.0.0.0".into(),
            port: 9000,
            data_paths: DataPaths::new(dir.path()).unwrap(),
        };
        assert_eq!(config.bind_addr(), "0.0.0.0:9000");
    }
}
