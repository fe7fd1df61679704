//! LLM types matching the admin tool's API surface.

use leadforge_copy::AdOption;
use serde::{Deserialize, Serialize};

/// Request envelope the provider speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStyle {
    /// `POST {base}/responses` with an `input` message list.
    #[default]
    Responses,
    /// `POST {base}/chat/completions` with `messages` and JSON response format.
    Chat,
}

impl std::fmt::Display for ApiStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiStyle::Responses => write!(f, "responses"),
            ApiStyle::Chat => write!(f, "chat"),
        }
    }
}

/// Which path produced a set of options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationSource {
    Llm,
    Fallback,
    RuleBased,
}

impl std::fmt::Display for GenerationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationSource::Llm => write!(f, "llm"),
            GenerationSource::Fallback => write!(f, "fallback"),
            GenerationSource::RuleBased => write!(f, "rule-based"),
        }
    }
}

/// Options from one generation call and where they came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationOutcome {
    pub source: GenerationSource,
    pub options: Vec<AdOption>,
}

/// LLM config response (key masked).
#[derive(Debug, Clone, Serialize)]
pub struct LLMConfigResponse {
    #[serde(rename = "apiKeyConfigured")]
    pub api_key_configured: bool,
    #[serde(rename = "apiKeyHint")]
    pub api_key_hint: Option<String>,
    pub model: String,
    #[serde(rename = "baseUrl")]
    pub base_url: String,
    #[serde(rename = "timeoutMs")]
    pub timeout_ms: u64,
    #[serde(rename = "allowFallback")]
    pub allow_fallback: bool,
    #[serde(rename = "apiStyle")]
    pub api_style: ApiStyle,
}

/// LLM config update request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LLMConfigUpdate {
    #[serde(rename = "apiKey")]
    pub api_key: Option<String>,
    pub model: Option<String>,
    #[serde(rename = "baseUrl")]
    pub base_url: Option<String>,
    #[serde(rename = "timeoutMs")]
    pub timeout_ms: Option<u64>,
    #[serde(rename = "allowFallback")]
    pub allow_fallback: Option<bool>,
    #[serde(rename = "apiStyle")]
    pub api_style: Option<ApiStyle>,
}
