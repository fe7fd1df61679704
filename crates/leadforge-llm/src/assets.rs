//! Home-service asset packs from the model, with the template pack as the
//! no-AI path.

use leadforge_copy::asset_pack::PROMPT_TEMPLATE_VERSION;
use leadforge_copy::{generate_asset_pack, AssetPack, AssetPackInput, AssetPackResult};
use leadforge_core::{Error, Result};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::config::LLMConfig;
use crate::generator::MISSING_KEY_MESSAGE;
use crate::providers::{build_client, complete};
use crate::response::{extract_response_text, parse_json_from_model_text};
use crate::types::ApiStyle;

pub const ASSET_SYSTEM_PROMPT: &str =
    "You generate high-converting local home service ad assets. Return only JSON.";

/// Model attempts per request before giving up on the LLM path.
pub const ASSET_ATTEMPTS: usize = 2;

pub fn asset_prompt(input: &AssetPackInput) -> String {
    format!(
        "Template {}. Return strict JSON with keys: headlines, primaryText, descriptions, \
         keywordThemes, negativeKeywords, landingPageBlocks[{{title,body}}], ctaVariants. \
         Context: {}",
        PROMPT_TEMPLATE_VERSION,
        json!(input)
    )
}

fn usage_tokens(payload: &Value, key: &str) -> u64 {
    payload
        .pointer(&format!("/usage/{}", key))
        .and_then(Value::as_u64)
        .unwrap_or(0)
}

/// Asset pack generator. Always speaks Chat Completions with a JSON
/// response format, whatever style the ad copy generator uses.
pub struct AssetPackGenerator {
    client: Client,
    config: LLMConfig,
}

impl AssetPackGenerator {
    pub fn new(config: LLMConfig) -> Result<Self> {
        let config = LLMConfig {
            api_style: ApiStyle::Chat,
            ..config
        };
        let client = build_client(&config)?;
        Ok(Self { client, config })
    }

    /// Whether `input` goes to the model rather than the templates.
    pub fn uses_llm(&self, input: &AssetPackInput) -> bool {
        !input.no_ai_mode && self.config.is_configured()
    }

    /// One model round trip. The parsed pack must pass [`AssetPack::validate`].
    pub async fn attempt(&self, input: &AssetPackInput) -> Result<AssetPackResult> {
        let api_key = self
            .config
            .api_key()
            .ok_or_else(|| Error::Config(MISSING_KEY_MESSAGE.into()))?;

        let payload = complete(
            &self.client,
            &self.config,
            api_key,
            ASSET_SYSTEM_PROMPT,
            &asset_prompt(input),
        )
        .await?;

        let parsed = parse_json_from_model_text(&extract_response_text(&payload))?;
        let output: AssetPack = serde_json::from_value(parsed)
            .map_err(|e| Error::Parse(format!("OpenAI returned a malformed asset pack: {}", e)))?;
        output
            .validate()
            .map_err(|e| Error::Parse(format!("OpenAI returned an incomplete asset pack: {}", e)))?;

        Ok(AssetPackResult {
            output,
            model: self.config.model.clone(),
            prompt_version: PROMPT_TEMPLATE_VERSION.to_string(),
            prompt_tokens: usage_tokens(&payload, "prompt_tokens"),
            completion_tokens: usage_tokens(&payload, "completion_tokens"),
        })
    }

    /// Validate the input, then build the pack.
    ///
    /// The model gets one retry. After that the template pack is used when
    /// the config allows fallback; otherwise the last error is returned.
    pub async fn generate(&self, input: &AssetPackInput) -> Result<AssetPackResult> {
        let input = input.validated()?;
        if !self.uses_llm(&input) {
            return generate_asset_pack(&input);
        }

        let mut last_err = None;
        for attempt in 1..=ASSET_ATTEMPTS {
            match self.attempt(&input).await {
                Ok(result) => {
                    info!("Asset pack generated by {} for {}", result.model, input.business_name);
                    return Ok(result);
                }
                Err(e) => {
                    warn!("Asset pack attempt {} failed: {}", attempt, e);
                    last_err = Some(e);
                }
            }
        }

        match last_err {
            Some(e) if self.config.allow_fallback && e.is_generation_failure() => {
                warn!("Using template asset pack after model failure");
                generate_asset_pack(&input)
            }
            Some(e) => Err(e),
            None => generate_asset_pack(&input),
        }
    }
}
