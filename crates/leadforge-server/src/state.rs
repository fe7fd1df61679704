//! Shared application state.

use std::collections::VecDeque;
use std::path::Path;

use leadforge_copy::AdInputRun;
use leadforge_core::LeadForgeConfig;
use leadforge_llm::LLMConfig;
use parking_lot::RwLock;
use tracing::{info, warn};

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: LeadForgeConfig,
    pub llm_config: RwLock<LLMConfig>,
    /// Generated runs, newest first, capped at `config.run_history`.
    pub runs: RwLock<VecDeque<AdInputRun>>,
}

impl AppState {
    pub fn new(config: LeadForgeConfig) -> Self {
        let llm_config = LLMConfig::load(&config.data_paths.llm_config_file);
        let runs = Self::load_runs(&config.data_paths.runs_file, config.run_history);
        info!("Loaded {} ad input runs", runs.len());

        Self {
            config,
            llm_config: RwLock::new(llm_config),
            runs: RwLock::new(runs),
        }
    }

    /// State with an explicit LLM config instead of the one on disk.
    pub fn with_llm_config(config: LeadForgeConfig, llm_config: LLMConfig) -> Self {
        let runs = Self::load_runs(&config.data_paths.runs_file, config.run_history);
        Self {
            config,
            llm_config: RwLock::new(llm_config),
            runs: RwLock::new(runs),
        }
    }

    fn load_runs(path: &Path, capacity: usize) -> VecDeque<AdInputRun> {
        let mut runs: VecDeque<AdInputRun> = match std::fs::read_to_string(path) {
            Ok(data) => serde_json::from_str(&data).unwrap_or_else(|e| {
                warn!("Ignoring unreadable run history {}: {}", path.display(), e);
                VecDeque::new()
            }),
            Err(_) => VecDeque::new(),
        };
        runs.truncate(capacity);
        runs
    }

    /// Record a run at the front of the history and persist it.
    pub fn record_run(&self, run: AdInputRun) {
        {
            let mut runs = self.runs.write();
            runs.push_front(run);
            runs.truncate(self.config.run_history);
        }
        self.save_runs();
    }

    /// Persist the history. The lock is released before touching disk.
    pub fn save_runs(&self) {
        let snapshot = self.runs_snapshot();
        if let Err(e) = write_runs(&self.config.data_paths.runs_file, &snapshot) {
            warn!("Failed to save run history: {}", e);
        }
    }

    pub fn runs_snapshot(&self) -> Vec<AdInputRun> {
        self.runs.read().iter().cloned().collect()
    }
}

fn write_runs(path: &Path, runs: &[AdInputRun]) -> std::io::Result<()> {
    let data = serde_json::to_string_pretty(runs)?;
    std::fs::write(path, data)
}
