//! LLM configuration persistence with environment fallbacks.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::types::{ApiStyle, LLMConfigResponse, LLMConfigUpdate};

pub const DEFAULT_MODEL: &str = "gpt-5-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Stored LLM configuration (persisted to llm-config.json).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Substitute rule-based options when the LLM path fails.
    #[serde(default)]
    pub allow_fallback: bool,
    #[serde(default)]
    pub api_style: ApiStyle,
    /// Path to config file for saving.
    #[serde(skip)]
    pub config_path: PathBuf,
}

fn default_model() -> String {
    DEFAULT_MODEL.into()
}
fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}
fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.into(),
            base_url: DEFAULT_BASE_URL.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            allow_fallback: false,
            api_style: ApiStyle::Responses,
            config_path: PathBuf::new(),
        }
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl LLMConfig {
    /// Load config from file, falling back to env vars and defaults.
    pub fn load(config_path: &Path) -> Self {
        let from_file: Option<LLMConfig> = std::fs::read_to_string(config_path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok());
        let has_file = from_file.is_some();

        let mut config = from_file.unwrap_or_default();
        config.config_path = config_path.to_path_buf();

        // Env vars as fallback for the key; other settings only when no file exists
        if config.api_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
            config.api_key = env_value("OPENAI_API_KEY");
        }
        if !has_file {
            config.apply_env_settings();
        }

        config
    }

    /// Build config from the environment only.
    pub fn from_env() -> Self {
        let mut config = Self {
            api_key: env_value("OPENAI_API_KEY"),
            ..Self::default()
        };
        config.apply_env_settings();
        config
    }

    fn apply_env_settings(&mut self) {
        if let Some(model) = env_value("OPENAI_MODEL") {
            self.model = model;
        }
        if let Some(url) = env_value("OPENAI_BASE_URL") {
            self.base_url = url;
        }
        if let Some(ms) = env_value("OPENAI_TIMEOUT_MS").and_then(|v| v.parse().ok()) {
            self.timeout_ms = ms;
        }
        if let Some(flag) = env_value("OPENAI_ALLOW_FALLBACK") {
            self.allow_fallback = flag == "true";
        }
        if let Some(style) = env_value("OPENAI_API_STYLE") {
            self.api_style = match style.to_lowercase().as_str() {
                "chat" => ApiStyle::Chat,
                _ => ApiStyle::Responses,
            };
        }
    }

    /// Save config to disk.
    pub fn save(&self) -> Result<(), std::io::Error> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(&self.config_path, json)?;
        info!("Saved LLM config to {}", self.config_path.display());
        Ok(())
    }

    /// Apply an update, merging with existing config.
    pub fn apply_update(&mut self, update: &LLMConfigUpdate) {
        if let Some(k) = &update.api_key {
            let k = k.trim();
            self.api_key = if k.is_empty() { None } else { Some(k.to_string()) };
        }
        if let Some(m) = &update.model {
            self.model = m.clone();
        }
        if let Some(u) = &update.base_url {
            self.base_url = u.clone();
        }
        if let Some(t) = update.timeout_ms {
            self.timeout_ms = t;
        }
        if let Some(f) = update.allow_fallback {
            self.allow_fallback = f;
        }
        if let Some(s) = update.api_style {
            self.api_style = s;
        }
    }

    /// The API key, if one is set and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }

    pub fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Base URL without a trailing slash.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    /// Build the public config response (no API key exposed).
    pub fn to_response(&self) -> LLMConfigResponse {
        LLMConfigResponse {
            api_key_configured: self.is_configured(),
            api_key_hint: self.api_key().map(mask_secret),
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            timeout_ms: self.timeout_ms,
            allow_fallback: self.allow_fallback,
            api_style: self.api_style,
        }
    }
}

/// Last four characters of a secret, the rest replaced.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_roundtrip_keeps_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("llm-config.json");

        let mut config = LLMConfig {
            config_path: path.clone(),
            ..LLMConfig::default()
        };
        config.apply_update(&LLMConfigUpdate {
            api_key: Some("sk-test-1234".into()),
            model: Some("gpt-4.1-mini".into()),
            timeout_ms: Some(5_000),
            allow_fallback: Some(true),
            api_style: Some(ApiStyle::Chat),
            ..Default::default()
        });
        config.save().unwrap();

        let loaded = LLMConfig::load(&path);
        assert_eq!(loaded.api_key(), Some("sk-test-1234"));
        assert_eq!(loaded.model, "gpt-4.1-mini");
        assert_eq!(loaded.timeout_ms, 5_000);
        assert!(loaded.allow_fallback);
        assert_eq!(loaded.api_style, ApiStyle::Chat);
        assert_eq!(loaded.config_path, path);
    }

    #[test]
    fn test_blank_key_update_clears_key() {
        let mut config = LLMConfig {
            api_key: Some("sk-live".into()),
            ..LLMConfig::default()
        };
        config.apply_update(&LLMConfigUpdate {
            api_key: Some("   ".into()),
            ..Default::default()
        });
        assert!(!config.is_configured());
    }

    #[test]
    fn test_response_masks_key() {
        let config = LLMConfig {
            api_key: Some("sk-abcdefgh9876".into()),
            ..LLMConfig::default()
        };
        let resp = config.to_response();
        assert!(resp.api_key_configured);
        assert_eq!(resp.api_key_hint.as_deref(), Some("****9876"));
        let json = serde_json::to_string(&resp).unwrap();
        assert!(!json.contains("abcdefgh"));
    }

    #[test]
    fn test_endpoint_joins_cleanly() {
        let config = LLMConfig {
            base_url: "http://127.0.0.1:9000/v1/".into(),
            ..LLMConfig::default()
        };
        assert_eq!(config.endpoint("/responses"), "http://127.0.0.1:9000/v1/responses");
    }

    #[test]
    fn test_mask_short_secret() {
        assert_eq!(mask_secret("abc"), "****");
    }
}
