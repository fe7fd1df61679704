//! Prompt construction for ad option generation.

use leadforge_copy::{Channel, GenerationContext};
use serde_json::{json, Value};

pub const SYSTEM_PROMPT: &str = "You are an ad operations planner. Output JSON only. \
Create 2-3 campaign options for Facebook and/or Google based on provided inputs. \
Use every non-empty input field exactly where relevant. \
Keep copy concise and practical for direct use in Ads Manager and Google Ads.";

const OUTPUT_SCHEMA: &str = r#"{"options":[{"label":"...","rationale":"...","facebook":{"campaignName":"...","objective":"...","adSetAudience":"...","placements":"...","primaryText":"...","headline":"...","description":"...","cta":"...","destinationUrl":"..."},"google":{"campaignName":"...","campaignType":"Search","finalUrl":"...","path1":"...","path2":"...","headlines":["..."],"descriptions":["..."],"keywords":["..."],"audienceSignal":"..."}}]}"#;

/// The context fields the model sees, shaped for the prompt.
pub fn user_payload(context: &GenerationContext, channels: &[Channel]) -> Value {
    let custom_inputs = match &context.custom_inputs_parsed {
        Some(parsed) => parsed.clone(),
        None => Value::String(context.custom_inputs_raw.clone()),
    };

    json!({
        "customerName": context.customer_name,
        "customerProfile": {
            "industry": context.customer_industry,
            "tier": context.customer_tier,
            "location": context.customer_location,
            "notes": context.customer_notes,
        },
        "objective": context.objective,
        "cta": context.cta,
        "channels": channels,
        "artifactName": context.artifact_name,
        "offer": context.offer,
        "landingUrl": context.landing_url,
        "audience": context.audience,
        "strategyNotes": context.strategy_notes,
        "customInputs": custom_inputs,
        "artifactText": context.artifact_text,
    })
}

/// User message: output schema, platform constraints and the input payload.
pub fn user_prompt(context: &GenerationContext, channels: &[Channel]) -> String {
    format!(
        "Return strict JSON: {}. \
Include facebook object only if Facebook is in channels. \
Include google object only if Google is in channels. \
Respect platform constraints: Facebook headline <= 40 chars, Facebook description <= 100 chars, \
Google headlines <= 30 chars, Google descriptions <= 90 chars, path fields <= 15 chars. \
Input: {}",
        OUTPUT_SCHEMA,
        user_payload(context, channels)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadforge_copy::{build_context, GenerationRequest};

    #[test]
    fn test_payload_embeds_context() {
        let req = GenerationRequest {
            channels: vec![Channel::Google],
            customer_name: "Acme HVAC".into(),
            customer_industry: "Home services".into(),
            custom_inputs: r#"{"tone":"calm"}"#.into(),
            ..Default::default()
        };
        let ctx = build_context(&req);
        let payload = user_payload(&ctx, &req.channels);
        assert_eq!(payload["customerName"], "Acme HVAC");
        assert_eq!(payload["customerProfile"]["industry"], "Home services");
        assert_eq!(payload["channels"], json!(["Google"]));
        assert_eq!(payload["customInputs"]["tone"], "calm");
    }

    #[test]
    fn test_unparsed_custom_inputs_stay_text() {
        let req = GenerationRequest {
            custom_inputs: "lead with warranty".into(),
            ..Default::default()
        };
        let ctx = build_context(&req);
        assert_eq!(user_payload(&ctx, &[])["customInputs"], "lead with warranty");
    }

    #[test]
    fn test_user_prompt_mentions_constraints() {
        let ctx = build_context(&GenerationRequest::default());
        let prompt = user_prompt(&ctx, &[Channel::Facebook]);
        assert!(prompt.starts_with("Return strict JSON: {\"options\""));
        assert!(prompt.contains("Facebook headline <= 40 chars"));
        assert!(prompt.contains("\"channels\":[\"Facebook\"]"));
    }
}
