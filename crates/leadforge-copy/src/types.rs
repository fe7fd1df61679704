//! Ad option types matching the admin tool's JSON surface.

use serde::{Deserialize, Deserializer, Serialize};

/// Ad platform a generation run can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Facebook,
    Google,
}

impl Channel {
    /// Parse the exact platform label used on the wire.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Facebook" => Some(Channel::Facebook),
            "Google" => Some(Channel::Google),
            _ => None,
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::Facebook => write!(f, "Facebook"),
            Channel::Google => write!(f, "Google"),
        }
    }
}

/// Raw generation request. Every text field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationRequest {
    pub channels: Vec<Channel>,
    pub objective: String,
    pub cta: String,
    pub customer_name: String,
    pub customer_industry: String,
    pub customer_tier: String,
    pub customer_location: String,
    pub customer_notes: String,
    pub artifact_name: String,
    pub artifact_text: String,
    pub offer: String,
    pub landing_url: String,
    pub audience: String,
    pub strategy_notes: String,
    /// Free-form text, usually JSON. Objects sent inline are kept as their
    /// serialized text.
    #[serde(deserialize_with = "string_or_json")]
    pub custom_inputs: String,
}

impl GenerationRequest {
    pub fn wants(&self, channel: Channel) -> bool {
        self.channels.contains(&channel)
    }
}

fn string_or_json<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Facebook Ads Manager field set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacebookPack {
    pub campaign_name: String,
    pub objective: String,
    pub ad_set_audience: String,
    pub placements: String,
    pub primary_text: String,
    pub headline: String,
    pub description: String,
    pub cta: String,
    pub destination_url: String,
}

/// Google Ads search campaign field set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GooglePack {
    pub campaign_name: String,
    pub campaign_type: String,
    pub final_url: String,
    pub path1: String,
    pub path2: String,
    pub headlines: Vec<String>,
    pub descriptions: Vec<String>,
    pub keywords: Vec<String>,
    pub audience_signal: String,
}

/// One creative angle rendered for the requested platforms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdOption {
    pub id: String,
    pub label: String,
    pub rationale: String,
    pub hook: String,
    pub short_hook: String,
    pub headline: String,
    pub description: String,
    pub proof_line: String,
    pub cta_line: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<FacebookPack>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google: Option<GooglePack>,
}

/// One generation invocation and the options it produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdInputRun {
    pub id: String,
    #[serde(default)]
    pub customer_id: String,
    pub channels: Vec<Channel>,
    pub objective: String,
    pub cta: String,
    pub artifact_name: String,
    pub offer: String,
    pub landing_url: String,
    pub audience: String,
    pub strategy_notes: String,
    pub custom_inputs: String,
    /// RFC 3339 timestamp assigned when the run is recorded.
    pub created_at: String,
    pub options: Vec<AdOption>,
}
