//! Home-service asset pack: headlines, body copy, keyword themes and
//! landing page blocks for a local trade business.

use leadforge_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::text::normalize_text;

pub const PROMPT_TEMPLATE_VERSION: &str = "asset-pack-v1";
pub const NO_AI_MODEL: &str = "no-ai-stub";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPackInput {
    pub business_name: String,
    pub trade_type: String,
    pub service_areas: Vec<String>,
    pub offer: String,
    #[serde(default)]
    pub differentiators: Vec<String>,
    #[serde(default = "default_tone")]
    pub tone: String,
    #[serde(default)]
    pub no_ai_mode: bool,
}

fn default_tone() -> String {
    "direct".into()
}

impl AssetPackInput {
    /// Check minimum field lengths and return a whitespace-normalised copy.
    pub fn validated(&self) -> Result<Self> {
        let business_name = min_len("businessName", &self.business_name, 2)?;
        let trade_type = min_len("tradeType", &self.trade_type, 2)?;
        let offer = min_len("offer", &self.offer, 4)?;
        let service_areas: Vec<String> = self
            .service_areas
            .iter()
            .map(|a| normalize_text(a))
            .filter(|a| !a.is_empty())
            .collect();
        if service_areas.is_empty() {
            return Err(Error::Validation("serviceAreas must list at least one area".into()));
        }

        Ok(Self {
            business_name,
            trade_type,
            service_areas,
            offer,
            differentiators: self.differentiators.iter().map(|d| normalize_text(d)).collect(),
            tone: normalize_text(&self.tone),
            no_ai_mode: self.no_ai_mode,
        })
    }
}

fn min_len(field: &str, value: &str, min: usize) -> Result<String> {
    let text = normalize_text(value);
    if text.chars().count() < min {
        return Err(Error::Validation(format!(
            "{} must be at least {} characters",
            field, min
        )));
    }
    Ok(text)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandingPageBlock {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPack {
    pub headlines: Vec<String>,
    pub primary_text: Vec<String>,
    pub descriptions: Vec<String>,
    pub keyword_themes: Vec<String>,
    pub negative_keywords: Vec<String>,
    pub landing_page_blocks: Vec<LandingPageBlock>,
    pub cta_variants: Vec<String>,
}

impl AssetPack {
    /// Enforce the minimum list sizes a pack must carry.
    pub fn validate(&self) -> Result<()> {
        let checks: [(&str, usize, usize); 7] = [
            ("headlines", self.headlines.len(), 5),
            ("primaryText", self.primary_text.len(), 3),
            ("descriptions", self.descriptions.len(), 4),
            ("keywordThemes", self.keyword_themes.len(), 5),
            ("negativeKeywords", self.negative_keywords.len(), 5),
            ("landingPageBlocks", self.landing_page_blocks.len(), 3),
            ("ctaVariants", self.cta_variants.len(), 3),
        ];
        for (field, len, min) in checks {
            if len < min {
                return Err(Error::Validation(format!(
                    "{} needs at least {} entries, got {}",
                    field, min, len
                )));
            }
        }
        Ok(())
    }
}

/// A generated pack plus the provenance the caller records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPackResult {
    pub output: AssetPack,
    pub model: String,
    pub prompt_version: String,
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
}

/// Build a pack from templates only. Identical input yields identical output.
pub fn generate_asset_pack(input: &AssetPackInput) -> Result<AssetPackResult> {
    let input = input.validated()?;
    let trade = &input.trade_type;
    let first_area = &input.service_areas[0];
    let areas = input.service_areas.join(", ");
    let offer = &input.offer;
    let business = &input.business_name;
    let base = format!("{} {} {}", trade, first_area, offer);

    let output = AssetPack {
        headlines: vec![
            format!("Book {} Service Fast", trade),
            format!("{} Pros Near You", trade),
            format!("Trusted {} Team", trade),
            format!("Same-Day {} Help", trade),
            offer.clone(),
        ],
        primary_text: vec![
            format!(
                "Need {}? We help homeowners in {} with fast response and clear pricing.",
                trade, areas
            ),
            format!(
                "Get qualified local leads for {} offers with conversion-focused messaging.",
                trade
            ),
            format!(
                "Built for {}: practical ad copy that drives booked calls.",
                business
            ),
        ],
        descriptions: vec![
            format!("Serving {} with reliable {} service.", areas, trade),
            "Transparent pricing and quick booking.".to_string(),
            "Call now for faster scheduling.".to_string(),
            format!("Start with {}.", offer),
        ],
        keyword_themes: vec![
            format!("{} near me", trade),
            format!("{} repair", trade),
            format!("{} installation", trade),
            format!("{} service {}", trade, first_area),
            offer.clone(),
        ],
        negative_keywords: ["jobs", "career", "free", "diy", "wholesale"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        landing_page_blocks: vec![
            LandingPageBlock {
                title: "Hero".into(),
                body: format!("{} with quick scheduling and trusted local technicians.", base),
            },
            LandingPageBlock {
                title: "Proof".into(),
                body: format!(
                    "Homeowners choose {} for fast response and reliable work.",
                    business
                ),
            },
            LandingPageBlock {
                title: "CTA".into(),
                body: format!("Call now or request service online to claim {}.", offer),
            },
        ],
        cta_variants: vec!["Call Now".into(), "Book Service".into(), "Get Quote".into()],
    };
    output.validate()?;

    Ok(AssetPackResult {
        output,
        model: NO_AI_MODEL.to_string(),
        prompt_version: PROMPT_TEMPLATE_VERSION.to_string(),
        prompt_tokens: 0,
        completion_tokens: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> AssetPackInput {
        AssetPackInput {
            business_name: "Acme HVAC".into(),
            trade_type: "HVAC".into(),
            service_areas: vec!["Phoenix".into()],
            offer: "Free estimate".into(),
            differentiators: vec!["Fast response".into()],
            tone: "direct".into(),
            no_ai_mode: true,
        }
    }

    #[test]
    fn test_deterministic_generation() {
        let a = generate_asset_pack(&input()).unwrap();
        let b = generate_asset_pack(&input()).unwrap();
        assert_eq!(a.output, b.output);
        assert_eq!(a.model, NO_AI_MODEL);
        assert_eq!(a.prompt_version, PROMPT_TEMPLATE_VERSION);
    }

    #[test]
    fn test_pack_content() {
        let pack = generate_asset_pack(&input()).unwrap().output;
        assert_eq!(pack.headlines[0], "Book HVAC Service Fast");
        assert_eq!(pack.keyword_themes[3], "HVAC service Phoenix");
        assert_eq!(
            pack.landing_page_blocks[0].body,
            "HVAC Phoenix Free estimate with quick scheduling and trusted local technicians."
        );
    }

    #[test]
    fn test_rejects_short_fields() {
        let mut bad = input();
        bad.offer = "Hi".into();
        assert!(matches!(generate_asset_pack(&bad), Err(Error::Validation(_))));

        let mut bad = input();
        bad.service_areas = vec!["  ".into()];
        assert!(matches!(generate_asset_pack(&bad), Err(Error::Validation(_))));
    }

    #[test]
    fn test_validate_catches_thin_pack() {
        let mut pack = generate_asset_pack(&input()).unwrap().output;
        pack.cta_variants.truncate(1);
        let err = pack.validate().unwrap_err();
        assert!(err.to_string().contains("ctaVariants"));
    }

    #[test]
    fn test_input_defaults_from_json() {
        let parsed: AssetPackInput = serde_json::from_value(serde_json::json!({
            "businessName": "Acme HVAC",
            "tradeType": "HVAC",
            "serviceAreas": ["Phoenix"],
            "offer": "Free estimate",
        }))
        .unwrap();
        assert_eq!(parsed.tone, "direct");
        assert!(!parsed.no_ai_mode);
        assert!(parsed.differentiators.is_empty());
    }
}
