//! Configuration and data directory management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default number of ad input runs retained, newest first.
pub const DEFAULT_RUN_HISTORY: usize = 120;

/// Paths to all LeadForge data files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    /// Root data directory (e.g., `data/`).
    pub root: PathBuf,
    /// LLM configuration (`data/llm-config.json`).
    pub llm_config_file: PathBuf,
    /// Generated ad input runs (`data/ad-input-runs.json`).
    pub runs_file: PathBuf,
}

impl DataPaths {
    /// Create data paths from a root directory. Creates the root if needed.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        let paths = Self {
            llm_config_file: root.join("llm-config.json"),
            runs_file: root.join("ad-input-runs.json"),
            root,
        };
        std::fs::create_dir_all(&paths.root)?;
        Ok(paths)
    }
}

/// Top-level LeadForge configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadForgeConfig {
    /// Interface to bind.
    pub host: String,
    /// HTTP server port.
    pub port: u16,
    /// Maximum ad input runs kept in history.
    pub run_history: usize,
    /// Data directory paths.
    pub data_paths: DataPaths,
}

impl LeadForgeConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env(data_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let host = std::env::var("HOST")
            .ok()
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| "127.0.0.1".to_string());

        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(9091);

        let run_history = std::env::var("LEADFORGE_RUN_HISTORY")
            .ok()
            .and_then(|n| n.parse().ok())
            .filter(|n: &usize| *n > 0)
            .unwrap_or(DEFAULT_RUN_HISTORY);

        let data_paths = DataPaths::new(data_dir)?;

        Ok(Self {
            host,
            port,
            run_history,
            data_paths,
        })
    }

    /// Socket address string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
