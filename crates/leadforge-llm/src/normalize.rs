//! Coerce untyped model output into sanitized [`AdOption`]s.

use leadforge_copy::packs::limits::{FB_DESCRIPTION, FB_HEADLINE};
use leadforge_copy::text::{non_empty_text, truncate};
use leadforge_copy::{
    sanitize_facebook_pack, sanitize_google_pack, AdOption, AngleCopy, Channel, GenerationContext,
    MAX_OPTIONS,
};
use leadforge_core::{Error, Result};
use serde_json::Value;

pub const LABEL_MAX: usize = 60;
pub const RATIONALE_MAX: usize = 220;
pub const HOOK_MAX: usize = 160;
pub const SHORT_HOOK_MAX: usize = 60;
pub const DEFAULT_RATIONALE: &str = "Generated from provided campaign and artifact inputs.";

/// Fresh id for an option produced outside the rule-based path.
pub fn option_id() -> String {
    format!("adopt-{}", uuid::Uuid::new_v4().simple())
}

/// Turn the model's `options` value into at most three sanitized options.
///
/// Non-object entries are treated as empty objects, so every field comes
/// from the fallback angle for that label.
pub fn normalize_ai_options(
    raw_options: Option<&Value>,
    channels: &[Channel],
    context: &GenerationContext,
) -> Result<Vec<AdOption>> {
    let source: Vec<&Value> = raw_options
        .and_then(Value::as_array)
        .map(|items| items.iter().take(MAX_OPTIONS).collect())
        .unwrap_or_default();
    if source.is_empty() {
        return Err(Error::Parse("OpenAI returned no options.".into()));
    }

    let empty = Value::Null;
    let options = source
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let entry = if entry.is_object() { entry } else { &empty };
            let text = |key: &str| non_empty_text(entry.get(key));

            let label = truncate(
                &text("label").unwrap_or_else(|| format!("Option {}", index + 1)),
                LABEL_MAX,
            );
            let rationale = truncate(
                &text("rationale").unwrap_or_else(|| DEFAULT_RATIONALE.to_string()),
                RATIONALE_MAX,
            );
            let angle = AngleCopy::fallback(&label, context);
            let capped = |key: &str, fallback: String, max: usize| {
                truncate(&text(key).unwrap_or(fallback), max)
            };

            AdOption {
                id: option_id(),
                hook: capped("hook", angle.hook, HOOK_MAX),
                short_hook: capped("shortHook", angle.short_hook, SHORT_HOOK_MAX),
                headline: capped("headline", angle.headline, FB_HEADLINE),
                description: capped("description", angle.description, FB_DESCRIPTION),
                proof_line: angle.proof_line,
                cta_line: angle.cta_line,
                facebook: channels
                    .contains(&Channel::Facebook)
                    .then(|| sanitize_facebook_pack(entry.get("facebook"), context, &label)),
                google: channels
                    .contains(&Channel::Google)
                    .then(|| sanitize_google_pack(entry.get("google"), context, &label)),
                label,
                rationale,
            }
        })
        .collect();

    Ok(options)
}
