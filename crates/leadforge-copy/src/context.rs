//! Canonical generation context built from raw request fields.

use serde::Serialize;
use serde_json::Value;

use crate::keywords::{extract_keywords, DEFAULT_MAX_KEYWORDS};
use crate::text::{normalize_text, truncate};
use crate::types::GenerationRequest;

pub const DEFAULT_OBJECTIVE: &str = "Leads";
pub const DEFAULT_CTA: &str = "Learn More";
pub const DEFAULT_CUSTOMER_NAME: &str = "Customer";
pub const DEFAULT_ARTIFACT_NAME: &str = "Collateral Pack";
pub const DEFAULT_OFFER: &str = "qualified leads at predictable CPA";
pub const DEFAULT_LANDING_URL: &str = "https://clientdomain.com/offer";
pub const FALLBACK_KEYWORDS: [&str; 3] = ["conversion", "pipeline", "growth"];

/// Longest inferred offer, in characters.
pub const INFERRED_OFFER_MAX: usize = 90;

/// Normalised inputs for one generation call. Pure function of the request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationContext {
    pub objective: String,
    pub cta: String,
    pub customer_name: String,
    pub customer_industry: String,
    pub customer_tier: String,
    pub customer_location: String,
    pub customer_notes: String,
    pub artifact_name: String,
    pub offer: String,
    pub landing_url: String,
    pub audience: String,
    pub strategy_notes: String,
    pub custom_inputs_raw: String,
    pub custom_inputs_parsed: Option<Value>,
    pub keyword_one: String,
    pub keyword_two: String,
    pub keyword_three: String,
    pub artifact_text: String,
}

/// Result of opportunistically parsing the custom-inputs field.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomInputs {
    pub raw_text: String,
    pub parsed: Option<Value>,
}

/// Parse free-form custom inputs as JSON when possible.
///
/// Only JSON objects and arrays count as parsed; scalars and invalid JSON
/// leave `parsed` empty. The trimmed raw text is always kept.
pub fn parse_custom_inputs(value: &str) -> CustomInputs {
    let raw_text = value.trim().to_string();
    if raw_text.is_empty() {
        return CustomInputs {
            raw_text,
            parsed: None,
        };
    }

    let parsed = serde_json::from_str::<Value>(&raw_text)
        .ok()
        .filter(|v| v.is_object() || v.is_array());

    CustomInputs { raw_text, parsed }
}

/// Resolve the offer: explicit value, else the first sentence of the
/// artifact text, else a generic fallback.
pub fn infer_offer(offer: &str, artifact_text: &str) -> String {
    let direct = normalize_text(offer);
    if !direct.is_empty() {
        return direct;
    }

    let text = normalize_text(artifact_text);
    if text.is_empty() {
        return DEFAULT_OFFER.to_string();
    }

    let sentence = first_sentence(&text);
    let sentence = if sentence.is_empty() { text.as_str() } else { sentence };
    truncate(sentence, INFERRED_OFFER_MAX).to_lowercase()
}

/// Text before the first `.`, `!` or `?` that is followed by whitespace.
fn first_sentence(text: &str) -> &str {
    let mut chars = text.char_indices().peekable();
    while let Some((idx, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            if let Some(&(_, next)) = chars.peek() {
                if next.is_whitespace() {
                    return text[..idx].trim_end();
                }
            }
        }
    }
    text
}

/// Normalised `value`, or `default` when it normalises to nothing.
pub fn or_default(value: &str, default: &str) -> String {
    let text = normalize_text(value);
    if text.is_empty() {
        default.to_string()
    } else {
        text
    }
}

/// Build the canonical context for a generation request.
pub fn build_context(request: &GenerationRequest) -> GenerationContext {
    let artifact_text = normalize_text(&request.artifact_text);
    let keywords = extract_keywords(
        &format!("{} {} {}", request.artifact_name, request.offer, artifact_text),
        DEFAULT_MAX_KEYWORDS,
    );
    let keyword = |i: usize| {
        keywords
            .get(i)
            .cloned()
            .unwrap_or_else(|| FALLBACK_KEYWORDS[i].to_string())
    };
    let custom = parse_custom_inputs(&request.custom_inputs);

    GenerationContext {
        objective: or_default(&request.objective, DEFAULT_OBJECTIVE),
        cta: or_default(&request.cta, DEFAULT_CTA),
        customer_name: or_default(&request.customer_name, DEFAULT_CUSTOMER_NAME),
        customer_industry: normalize_text(&request.customer_industry),
        customer_tier: normalize_text(&request.customer_tier),
        customer_location: normalize_text(&request.customer_location),
        customer_notes: normalize_text(&request.customer_notes),
        artifact_name: or_default(&request.artifact_name, DEFAULT_ARTIFACT_NAME),
        offer: infer_offer(&request.offer, &request.artifact_text),
        landing_url: or_default(&request.landing_url, DEFAULT_LANDING_URL),
        audience: normalize_text(&request.audience),
        strategy_notes: normalize_text(&request.strategy_notes),
        custom_inputs_raw: custom.raw_text,
        custom_inputs_parsed: custom.parsed,
        keyword_one: keyword(0),
        keyword_two: keyword(1),
        keyword_three: keyword(2),
        artifact_text,
    }
}
