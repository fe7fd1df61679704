//! Platform pack builders and sanitizers.
//!
//! Builders render an angle into a Facebook or Google field set. The
//! sanitizers accept untyped (usually model-supplied) JSON and coerce it
//! into the same shapes, backfilling missing fields from a builder-made
//! fallback. Either way every field ends up within its platform limit.

use serde_json::Value;

use crate::context::GenerationContext;
use crate::text::{non_empty_text, normalize_text, sanitize_string_list, slug_segment, truncate};
use crate::types::{AdOption, FacebookPack, GooglePack};

/// Character limits accepted by the ad platforms' import tooling.
pub mod limits {
    pub const FB_CAMPAIGN_NAME: usize = 80;
    pub const FB_OBJECTIVE: usize = 30;
    pub const FB_AD_SET_AUDIENCE: usize = 170;
    pub const FB_PLACEMENTS: usize = 120;
    pub const FB_PRIMARY_TEXT: usize = 350;
    pub const FB_HEADLINE: usize = 40;
    pub const FB_DESCRIPTION: usize = 100;
    pub const FB_CTA: usize = 30;

    pub const GOOGLE_CAMPAIGN_NAME: usize = 80;
    pub const GOOGLE_CAMPAIGN_TYPE: usize = 20;
    pub const GOOGLE_PATH: usize = 15;
    pub const GOOGLE_HEADLINE: usize = 30;
    pub const GOOGLE_MAX_HEADLINES: usize = 8;
    pub const GOOGLE_DESCRIPTION: usize = 90;
    pub const GOOGLE_MAX_DESCRIPTIONS: usize = 4;
    pub const GOOGLE_KEYWORD: usize = 40;
    pub const GOOGLE_MAX_KEYWORDS: usize = 8;
    pub const GOOGLE_AUDIENCE_SIGNAL: usize = 120;
}

pub const FACEBOOK_PLACEMENTS: &str = "Advantage+ placements (Feeds, Reels, Stories)";
pub const GOOGLE_CAMPAIGN_TYPE: &str = "Search";

/// Copy fields of an angle that the pack builders read.
///
/// Convertible from [`AdOption`] so finished options can be re-rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AngleCopy {
    pub label: String,
    pub hook: String,
    pub short_hook: String,
    pub headline: String,
    pub description: String,
    pub proof_line: String,
    pub cta_line: String,
}

impl AngleCopy {
    /// Generic copy used to backfill fields an external source omitted.
    pub fn fallback(label: &str, context: &GenerationContext) -> Self {
        Self {
            label: label.to_string(),
            hook: format!("Get {}", context.offer),
            short_hook: format!("Get {}", context.offer),
            headline: format!("{} {}", label, context.offer),
            description: "Generated from provided campaign inputs.".to_string(),
            proof_line: proof_line(context),
            cta_line: cta_line(context),
        }
    }
}

impl From<&AdOption> for AngleCopy {
    fn from(option: &AdOption) -> Self {
        Self {
            label: option.label.clone(),
            hook: option.hook.clone(),
            short_hook: option.short_hook.clone(),
            headline: option.headline.clone(),
            description: option.description.clone(),
            proof_line: option.proof_line.clone(),
            cta_line: option.cta_line.clone(),
        }
    }
}

pub fn proof_line(context: &GenerationContext) -> String {
    format!("Message built from {}.", context.artifact_name)
}

pub fn cta_line(context: &GenerationContext) -> String {
    format!("CTA: {}.", context.cta)
}

/// Render an angle as a Facebook Ads Manager field set.
pub fn build_facebook_pack(angle: &AngleCopy, context: &GenerationContext) -> FacebookPack {
    let geo = if context.customer_location.is_empty() {
        "US"
    } else {
        context.customer_location.as_str()
    };
    let audience = if context.audience.is_empty() {
        format!(
            "{} 25-54, interests in {} and {}, plus lookalikes from customer leads",
            geo, context.keyword_one, context.keyword_two
        )
    } else {
        context.audience.clone()
    };

    FacebookPack {
        campaign_name: truncate(
            &format!("{} | {} | FB", context.customer_name, angle.label),
            limits::FB_CAMPAIGN_NAME,
        ),
        objective: truncate(&context.objective, limits::FB_OBJECTIVE),
        ad_set_audience: truncate(&audience, limits::FB_AD_SET_AUDIENCE),
        placements: truncate(FACEBOOK_PLACEMENTS, limits::FB_PLACEMENTS),
        primary_text: truncate(
            &format!(
                "{} {}. Built from customer artifact: {}. {} {}",
                angle.hook, context.offer, context.artifact_name, angle.proof_line, angle.cta_line
            ),
            limits::FB_PRIMARY_TEXT,
        ),
        headline: truncate(&angle.headline, limits::FB_HEADLINE),
        description: truncate(&angle.description, limits::FB_DESCRIPTION),
        cta: truncate(&context.cta, limits::FB_CTA),
        destination_url: normalize_text(&context.landing_url),
    }
}

/// Render an angle as a Google Ads search field set.
///
/// Always six headlines, three descriptions and three keywords.
pub fn build_google_pack(angle: &AngleCopy, context: &GenerationContext) -> GooglePack {
    let headline = |text: String| truncate(&text, limits::GOOGLE_HEADLINE);
    let description = |text: String| truncate(&text, limits::GOOGLE_DESCRIPTION);
    let keyword = |text: String| truncate(&text, limits::GOOGLE_KEYWORD);

    let audience = if context.audience.is_empty() {
        format!(
            "High-intent prospects searching for {} and {}.",
            context.keyword_one, context.keyword_two
        )
    } else {
        context.audience.clone()
    };

    GooglePack {
        campaign_name: truncate(
            &format!("{} | {} | Google", context.customer_name, angle.label),
            limits::GOOGLE_CAMPAIGN_NAME,
        ),
        campaign_type: GOOGLE_CAMPAIGN_TYPE.to_string(),
        final_url: normalize_text(&context.landing_url),
        path1: slug_segment(&context.keyword_one, limits::GOOGLE_PATH),
        path2: slug_segment(&context.keyword_two, limits::GOOGLE_PATH),
        headlines: vec![
            headline(angle.headline.clone()),
            headline(format!("Get {} faster", context.keyword_one)),
            headline(format!("{} {}", context.customer_name, context.objective)),
            headline(format!("Reduce CPA with {}", context.keyword_two)),
            headline(angle.short_hook.clone()),
            headline(context.cta.clone()),
        ],
        descriptions: vec![
            description(format!(
                "{} {}. Built from your team artifact for faster launch.",
                angle.hook, context.offer
            )),
            description(format!(
                "Use {} + {} messaging to qualify better leads.",
                context.keyword_one, context.keyword_two
            )),
            description(format!(
                "{} Start with this draft and publish in Google Ads.",
                angle.proof_line
            )),
        ],
        keywords: vec![
            keyword(format!("{} service", context.keyword_one)),
            keyword(format!("{} offer", context.keyword_two)),
            keyword(format!("{} {}", context.customer_name, context.objective).to_lowercase()),
        ],
        audience_signal: truncate(&audience, limits::GOOGLE_AUDIENCE_SIGNAL),
    }
}

fn field(source: &Value, key: &str) -> Option<String> {
    non_empty_text(source.get(key))
}

/// Coerce an untyped Facebook object into a valid pack.
///
/// Missing or blank fields fall back to a pack built from
/// [`AngleCopy::fallback`] for `label`.
pub fn sanitize_facebook_pack(raw: Option<&Value>, context: &GenerationContext, label: &str) -> FacebookPack {
    let empty = Value::Null;
    let source = raw.filter(|v| v.is_object()).unwrap_or(&empty);
    let fallback = build_facebook_pack(&AngleCopy::fallback(label, context), context);
    let pick = |key: &str, fallback: &str| field(source, key).unwrap_or_else(|| fallback.to_string());

    FacebookPack {
        campaign_name: truncate(&pick("campaignName", &fallback.campaign_name), limits::FB_CAMPAIGN_NAME),
        objective: truncate(&pick("objective", &context.objective), limits::FB_OBJECTIVE),
        ad_set_audience: truncate(&pick("adSetAudience", &fallback.ad_set_audience), limits::FB_AD_SET_AUDIENCE),
        placements: truncate(&pick("placements", &fallback.placements), limits::FB_PLACEMENTS),
        primary_text: truncate(&pick("primaryText", &fallback.primary_text), limits::FB_PRIMARY_TEXT),
        headline: truncate(&pick("headline", &fallback.headline), limits::FB_HEADLINE),
        description: truncate(&pick("description", &fallback.description), limits::FB_DESCRIPTION),
        cta: truncate(&pick("cta", &context.cta), limits::FB_CTA),
        destination_url: pick("destinationUrl", &fallback.destination_url),
    }
}

/// Coerce an untyped Google object into a valid pack.
pub fn sanitize_google_pack(raw: Option<&Value>, context: &GenerationContext, label: &str) -> GooglePack {
    let empty = Value::Null;
    let source = raw.filter(|v| v.is_object()).unwrap_or(&empty);
    let fallback = build_google_pack(&AngleCopy::fallback(label, context), context);
    let pick = |key: &str, fallback: &str| field(source, key).unwrap_or_else(|| fallback.to_string());

    let headlines = non_empty_list(
        sanitize_string_list(
            source.get("headlines"),
            limits::GOOGLE_HEADLINE,
            limits::GOOGLE_MAX_HEADLINES,
            &fallback.headlines,
        ),
        &fallback.headlines,
    );
    let descriptions = non_empty_list(
        sanitize_string_list(
            source.get("descriptions"),
            limits::GOOGLE_DESCRIPTION,
            limits::GOOGLE_MAX_DESCRIPTIONS,
            &fallback.descriptions,
        ),
        &fallback.descriptions,
    );
    let keywords = non_empty_list(
        sanitize_string_list(
            source.get("keywords"),
            limits::GOOGLE_KEYWORD,
            limits::GOOGLE_MAX_KEYWORDS,
            &fallback.keywords,
        ),
        &fallback.keywords,
    );

    GooglePack {
        campaign_name: truncate(&pick("campaignName", &fallback.campaign_name), limits::GOOGLE_CAMPAIGN_NAME),
        campaign_type: truncate(&pick("campaignType", &fallback.campaign_type), limits::GOOGLE_CAMPAIGN_TYPE),
        final_url: pick("finalUrl", &fallback.final_url),
        path1: slug_segment(&pick("path1", &fallback.path1), limits::GOOGLE_PATH),
        path2: slug_segment(&pick("path2", &fallback.path2), limits::GOOGLE_PATH),
        headlines,
        descriptions,
        keywords,
        audience_signal: truncate(&pick("audienceSignal", &fallback.audience_signal), limits::GOOGLE_AUDIENCE_SIGNAL),
    }
}

/// An array that sanitized down to nothing (e.g. `["", ""]`) is replaced
/// by the fallback so every list keeps at least one element.
fn non_empty_list(values: Vec<String>, fallback: &[String]) -> Vec<String> {
    if values.is_empty() {
        fallback.to_vec()
    } else {
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::build_context;
    use crate::types::GenerationRequest;
    use serde_json::json;

    fn context() -> GenerationContext {
        build_context(&GenerationRequest {
            customer_name: "Acme HVAC".into(),
            customer_location: "Phoenix".into(),
            artifact_name: "Spring flyer".into(),
            artifact_text: "Furnace repair special for Phoenix homeowners. Furnace checks included.".into(),
            ..Default::default()
        })
    }

    fn angle(ctx: &GenerationContext) -> AngleCopy {
        AngleCopy {
            label: "Outcome Angle".into(),
            hook: format!("Get {} without long setup cycles", ctx.offer),
            short_hook: format!("Get {}", ctx.offer),
            headline: format!("Get {}", ctx.offer),
            description: "Outcome-focused angle for prospects ready to act.".into(),
            proof_line: proof_line(ctx),
            cta_line: cta_line(ctx),
        }
    }

    fn assert_google_within_limits(pack: &GooglePack) {
        assert!(pack.campaign_name.chars().count() <= limits::GOOGLE_CAMPAIGN_NAME);
        assert!(pack.campaign_type.chars().count() <= limits::GOOGLE_CAMPAIGN_TYPE);
        assert!(pack.path1.chars().count() <= limits::GOOGLE_PATH);
        assert!(pack.path2.chars().count() <= limits::GOOGLE_PATH);
        assert!((1..=limits::GOOGLE_MAX_HEADLINES).contains(&pack.headlines.len()));
        assert!((1..=limits::GOOGLE_MAX_DESCRIPTIONS).contains(&pack.descriptions.len()));
        assert!((1..=limits::GOOGLE_MAX_KEYWORDS).contains(&pack.keywords.len()));
        assert!(pack.headlines.iter().all(|h| h.chars().count() <= limits::GOOGLE_HEADLINE));
        assert!(pack.descriptions.iter().all(|d| d.chars().count() <= limits::GOOGLE_DESCRIPTION));
        assert!(pack.keywords.iter().all(|k| k.chars().count() <= limits::GOOGLE_KEYWORD));
        assert!(pack.audience_signal.chars().count() <= limits::GOOGLE_AUDIENCE_SIGNAL);
    }

    #[test]
    fn test_facebook_pack_defaults() {
        let ctx = context();
        let pack = build_facebook_pack(&angle(&ctx), &ctx);
        assert_eq!(pack.campaign_name, "Acme HVAC | Outcome Angle | FB");
        assert_eq!(pack.placements, FACEBOOK_PLACEMENTS);
        assert_eq!(pack.cta, "Learn More");
        assert_eq!(
            pack.ad_set_audience,
            "Phoenix 25-54, interests in furnace and spring, plus lookalikes from customer leads"
        );
        assert!(pack.headline.chars().count() <= limits::FB_HEADLINE);
        assert!(pack.headline.ends_with('…'));
    }

    #[test]
    fn test_facebook_pack_uses_explicit_audience() {
        let mut ctx = context();
        ctx.audience = "Homeowners 35+".into();
        let pack = build_facebook_pack(&angle(&ctx), &ctx);
        assert_eq!(pack.ad_set_audience, "Homeowners 35+");
    }

    #[test]
    fn test_google_pack_shape() {
        let ctx = context();
        let pack = build_google_pack(&angle(&ctx), &ctx);
        assert_eq!(pack.headlines.len(), 6);
        assert_eq!(pack.descriptions.len(), 3);
        assert_eq!(pack.keywords.len(), 3);
        assert_eq!(pack.path1, "furnace");
        assert_eq!(pack.path2, "spring");
        assert_eq!(pack.campaign_type, "Search");
        assert_eq!(pack.keywords[2], "acme hvac leads");
        assert_google_within_limits(&pack);
    }

    #[test]
    fn test_sanitize_facebook_backfills_and_caps() {
        let ctx = context();
        let raw = json!({
            "headline": "A headline that is far too long for the Facebook headline slot",
            "description": "",
            "cta": 7,
        });
        let pack = sanitize_facebook_pack(Some(&raw), &ctx, "Bold Angle");
        assert_eq!(pack.headline.chars().count(), limits::FB_HEADLINE);
        assert_eq!(pack.description, "Generated from provided campaign inputs.");
        assert_eq!(pack.cta, "7");
        assert_eq!(pack.campaign_name, "Acme HVAC | Bold Angle | FB");
        assert_eq!(pack.destination_url, ctx.landing_url);
    }

    #[test]
    fn test_sanitize_facebook_accepts_non_object() {
        let ctx = context();
        let pack = sanitize_facebook_pack(Some(&json!("garbage")), &ctx, "X");
        let fallback = build_facebook_pack(&AngleCopy::fallback("X", &ctx), &ctx);
        assert_eq!(pack, fallback);
    }

    #[test]
    fn test_sanitize_google_adversarial_input() {
        let ctx = context();
        let huge = "word ".repeat(2_000);
        let raw = json!({
            "campaignType": "Performance Max Extended Edition",
            "path1": "Émergency Service!!",
            "path2": "",
            "headlines": vec![huge.clone(); 20],
            "descriptions": ["", "   "],
            "keywords": "not a list",
            "audienceSignal": huge,
        });
        let pack = sanitize_google_pack(Some(&raw), &ctx, "Proof Angle");
        assert_eq!(pack.headlines.len(), limits::GOOGLE_MAX_HEADLINES);
        assert_eq!(pack.descriptions.len(), 3);
        assert_eq!(pack.keywords.len(), 3);
        assert_eq!(pack.path1, "mergency-servic");
        assert_eq!(pack.path2, "spring");
        assert_google_within_limits(&pack);
    }
}
