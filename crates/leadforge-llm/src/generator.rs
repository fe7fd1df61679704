//! LLM-backed ad option generator with explicit rule-based fallback.

use leadforge_copy::{build_context, generate_rule_based, AdOption, GenerationRequest};
use leadforge_core::{Error, Result};
use reqwest::Client;
use tracing::{info, warn};

use crate::config::LLMConfig;
use crate::normalize::{normalize_ai_options, option_id};
use crate::prompt::{user_prompt, SYSTEM_PROMPT};
use crate::providers::{build_client, complete};
use crate::response::{extract_response_text, parse_json_from_model_text};
use crate::types::{GenerationOutcome, GenerationSource};

pub const MISSING_KEY_MESSAGE: &str =
    "OpenAI API key is missing. Set OPENAI_API_KEY in your environment to generate campaigns.";

pub const FALLBACK_MARKER: &str = "(Fallback mode)";

pub struct LlmAdGenerator {
    client: Client,
    config: LLMConfig,
}

impl LlmAdGenerator {
    pub fn new(config: LLMConfig) -> Result<Self> {
        let client = build_client(&config)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &LLMConfig {
        &self.config
    }

    /// One LLM round trip: prompt, parse, sanitize. No fallback.
    pub async fn attempt(&self, request: &GenerationRequest) -> Result<Vec<AdOption>> {
        let api_key = self
            .config
            .api_key()
            .ok_or_else(|| Error::Config(MISSING_KEY_MESSAGE.into()))?;

        let context = build_context(request);
        let payload = complete(
            &self.client,
            &self.config,
            api_key,
            SYSTEM_PROMPT,
            &user_prompt(&context, &request.channels),
        )
        .await?;

        let text = extract_response_text(&payload);
        let parsed = parse_json_from_model_text(&text)?;
        let options = normalize_ai_options(parsed.get("options"), &request.channels, &context)?;
        info!(
            "LLM generation: {} options for {}",
            options.len(),
            context.customer_name
        );
        Ok(options)
    }

    /// Attempt the LLM path, substituting rule-based options on failure
    /// when the config allows it.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutcome> {
        let result = self.attempt(request).await;
        with_fallback(result, self.config.allow_fallback, request)
    }
}

/// Resolve an LLM attempt into an outcome.
///
/// With `allow` set, a generation failure is replaced by the rule-based
/// options, re-identified and marked in their rationale. Otherwise the
/// error is returned unchanged.
pub fn with_fallback(
    attempt: Result<Vec<AdOption>>,
    allow: bool,
    request: &GenerationRequest,
) -> Result<GenerationOutcome> {
    match attempt {
        Ok(options) => Ok(GenerationOutcome {
            source: GenerationSource::Llm,
            options,
        }),
        Err(err) if allow && err.is_generation_failure() => {
            warn!("LLM generation failed, using rule-based fallback: {}", err);
            let options = generate_rule_based(request)
                .into_iter()
                .map(|mut option| {
                    option.id = option_id();
                    option.rationale = format!("{} {}", option.rationale, FALLBACK_MARKER);
                    option
                })
                .collect();
            Ok(GenerationOutcome {
                source: GenerationSource::Fallback,
                options,
            })
        }
        Err(err) => Err(err),
    }
}

/// Outcome for callers that skip the LLM entirely.
pub fn rule_based_outcome(request: &GenerationRequest) -> GenerationOutcome {
    GenerationOutcome {
        source: GenerationSource::RuleBased,
        options: generate_rule_based(request),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadforge_copy::Channel;

    fn request() -> GenerationRequest {
        GenerationRequest {
            channels: vec![Channel::Facebook, Channel::Google],
            customer_name: "Acme HVAC".into(),
            artifact_text: "Free furnace inspection with every repair. Call today.".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_success_passes_through() {
        let options = generate_rule_based(&request());
        let outcome = with_fallback(Ok(options.clone()), false, &request()).unwrap();
        assert_eq!(outcome.source, GenerationSource::Llm);
        assert_eq!(outcome.options, options);
    }

    #[test]
    fn test_failure_without_fallback_propagates() {
        let err = with_fallback(Err(Error::Config(MISSING_KEY_MESSAGE.into())), false, &request())
            .unwrap_err();
        assert_eq!(err.to_string(), MISSING_KEY_MESSAGE);
    }

    #[test]
    fn test_fallback_marks_every_option() {
        let outcome = with_fallback(
            Err(Error::Parse("OpenAI returned no options.".into())),
            true,
            &request(),
        )
        .unwrap();
        assert_eq!(outcome.source, GenerationSource::Fallback);
        assert_eq!(outcome.options.len(), 3);
        for option in &outcome.options {
            assert!(option.rationale.ends_with("(Fallback mode)"));
            assert!(option.id.starts_with("adopt-"));
            assert!(option.facebook.is_some() && option.google.is_some());
        }
    }

    #[test]
    fn test_non_generation_errors_skip_fallback() {
        let err = with_fallback(Err(Error::Internal("boom".into())), true, &request()).unwrap_err();
        assert!(matches!(err, Error::Internal(_)));
    }

    #[tokio::test]
    async fn test_missing_key_is_config_error() {
        let generator = LlmAdGenerator::new(LLMConfig::default()).unwrap();
        let err = generator.attempt(&request()).await.unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(err.to_string(), MISSING_KEY_MESSAGE);
    }

    #[tokio::test]
    async fn test_missing_key_with_fallback_uses_rule_based() {
        let config = LLMConfig {
            allow_fallback: true,
            ..LLMConfig::default()
        };
        let generator = LlmAdGenerator::new(config).unwrap();
        let outcome = generator.generate(&request()).await.unwrap();
        assert_eq!(outcome.source, GenerationSource::Fallback);
    }

    #[test]
    fn test_rule_based_outcome_is_deterministic() {
        let a = rule_based_outcome(&request());
        let b = rule_based_outcome(&request());
        assert_eq!(a, b);
        assert_eq!(a.source, GenerationSource::RuleBased);
    }
}
