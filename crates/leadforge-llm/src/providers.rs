//! OpenAI-compatible provider calls.
//!
//! Two envelopes are supported: the Responses API (`/responses`, `input`
//! list) and Chat Completions (`/chat/completions`, `messages` with a JSON
//! response format). Both use bearer auth and return the raw payload.

use leadforge_copy::truncate;
use leadforge_core::{Error, Result};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, error};

use crate::config::LLMConfig;
use crate::types::ApiStyle;

/// Longest slice of an upstream error body kept in the error message.
pub const UPSTREAM_BODY_MAX: usize = 220;

pub const CHAT_TEMPERATURE: f64 = 0.3;

/// Build a client bounded by the configured timeout.
pub fn build_client(config: &LLMConfig) -> Result<Client> {
    Client::builder()
        .timeout(config.timeout())
        .build()
        .map_err(|e| Error::Http(format!("Failed to build HTTP client: {}", e)))
}

fn request_body(config: &LLMConfig, system: &str, user: &str) -> (String, Value) {
    let messages = json!([
        {"role": "system", "content": system},
        {"role": "user", "content": user},
    ]);
    match config.api_style {
        ApiStyle::Responses => (
            config.endpoint("responses"),
            json!({
                "model": config.model,
                "input": messages,
            }),
        ),
        ApiStyle::Chat => (
            config.endpoint("chat/completions"),
            json!({
                "model": config.model,
                "messages": messages,
                "temperature": CHAT_TEMPERATURE,
                "response_format": {"type": "json_object"},
            }),
        ),
    }
}

fn transport_error(config: &LLMConfig, e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Http(format!("OpenAI request timed out after {}ms", config.timeout_ms))
    } else {
        Error::Http(format!("Request failed: {}", e))
    }
}

/// Send one system/user exchange and return the decoded response payload.
pub async fn complete(
    client: &Client,
    config: &LLMConfig,
    api_key: &str,
    system: &str,
    user: &str,
) -> Result<Value> {
    let (url, body) = request_body(config, system, user);
    debug!("Requesting {} with model {}", url, config.model);

    let response = client
        .post(&url)
        .header("Authorization", format!("Bearer {}", api_key))
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await
        .map_err(|e| transport_error(config, e))?;

    let status = response.status();
    if !status.is_success() {
        let detail = response.text().await.unwrap_or_default();
        error!("LLM provider returned {}", status);
        return Err(Error::Upstream {
            status: status.as_u16(),
            body: truncate(&detail, UPSTREAM_BODY_MAX),
        });
    }

    let text = response
        .text()
        .await
        .map_err(|e| transport_error(config, e))?;
    serde_json::from_str(&text)
        .map_err(|e| Error::Parse(format!("OpenAI returned a non-JSON response: {}", e)))
}

/// Check a key by listing models.
pub async fn test_api_key(config: &LLMConfig) -> Result<()> {
    let api_key = config
        .api_key()
        .ok_or_else(|| Error::Config("No API key configured.".into()))?;
    let client = build_client(config)?;

    let resp = client
        .get(config.endpoint("models"))
        .header("Authorization", format!("Bearer {}", api_key))
        .send()
        .await
        .map_err(|e| transport_error(config, e))?;

    if resp.status().is_success() {
        Ok(())
    } else {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        Err(Error::Upstream {
            status,
            body: truncate(&body, UPSTREAM_BODY_MAX),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_responses_body() {
        let config = LLMConfig {
            base_url: "http://localhost:1/v1".into(),
            ..LLMConfig::default()
        };
        let (url, body) = request_body(&config, "sys", "usr");
        assert_eq!(url, "http://localhost:1/v1/responses");
        assert_eq!(body["model"], "gpt-5-mini");
        assert_eq!(body["input"][0]["role"], "system");
        assert_eq!(body["input"][1]["content"], "usr");
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn test_chat_body() {
        let config = LLMConfig {
            api_style: ApiStyle::Chat,
            ..LLMConfig::default()
        };
        let (url, body) = request_body(&config, "sys", "usr");
        assert_eq!(url, "https://api.openai.com/v1/chat/completions");
        assert_eq!(body["messages"][0]["content"], "sys");
        assert_eq!(body["temperature"], 0.3);
        assert_eq!(body["response_format"]["type"], "json_object");
    }
}
