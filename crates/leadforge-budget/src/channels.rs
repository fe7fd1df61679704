//! Lead-gen channel catalogue and brief field parsing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Monthly budget used when a brief carries none.
pub const DEFAULT_MONTHLY_BUDGET: u64 = 5_000;
/// Smallest monthly budget a brief may set.
pub const MIN_MONTHLY_BUDGET: u64 = 500;

/// Paid and organic lead sources with benchmark cost per lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeadChannel {
    GoogleAds,
    FacebookAds,
    LocalServicesAds,
    Seo,
}

impl LeadChannel {
    pub const ALL: [LeadChannel; 4] = [
        LeadChannel::GoogleAds,
        LeadChannel::FacebookAds,
        LeadChannel::LocalServicesAds,
        LeadChannel::Seo,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            LeadChannel::GoogleAds => "google-ads",
            LeadChannel::FacebookAds => "facebook-ads",
            LeadChannel::LocalServicesAds => "local-services-ads",
            LeadChannel::Seo => "seo",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LeadChannel::GoogleAds => "Google Ads",
            LeadChannel::FacebookAds => "Facebook Ads",
            LeadChannel::LocalServicesAds => "Local Service Ads",
            LeadChannel::Seo => "SEO",
        }
    }

    /// Benchmark cost per lead in USD.
    pub fn benchmark_cpl(&self) -> f64 {
        match self {
            LeadChannel::GoogleAds => 180.0,
            LeadChannel::FacebookAds => 135.0,
            LeadChannel::LocalServicesAds => 95.0,
            LeadChannel::Seo => 95.0,
        }
    }

    /// Case-insensitive key lookup. Retired channel keys map onto their
    /// closest supported replacement.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "google-ads" => Some(LeadChannel::GoogleAds),
            "facebook-ads" | "twitter-ads" => Some(LeadChannel::FacebookAds),
            "local-services-ads" | "tiktok-ads" => Some(LeadChannel::LocalServicesAds),
            "seo" => Some(LeadChannel::Seo),
            _ => None,
        }
    }
}

impl std::fmt::Display for LeadChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Parse a channel list from a JSON array or a comma-separated string.
///
/// Unknown keys are dropped and duplicates collapse to their first
/// position. An empty result defaults to Google Ads.
pub fn parse_channels(raw: &Value) -> Vec<LeadChannel> {
    let entries: Vec<String> = match raw {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Value::String(s) => s.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    };

    let mut channels = Vec::new();
    for channel in entries.iter().filter_map(|e| LeadChannel::from_key(e)) {
        if !channels.contains(&channel) {
            channels.push(channel);
        }
    }

    if channels.is_empty() {
        channels.push(LeadChannel::GoogleAds);
    }
    channels
}

/// Parse a monthly budget from a number or a string like `"$7,500"`.
///
/// Missing, non-numeric and non-positive values give `fallback`; anything
/// else is rounded and raised to at least [`MIN_MONTHLY_BUDGET`].
pub fn parse_budget(value: &Value, fallback: u64) -> u64 {
    let numeric = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let cleaned: String = s.chars().filter(|c| *c != '$' && *c != ',').collect();
            let cleaned = cleaned.trim();
            if cleaned.is_empty() {
                None
            } else {
                cleaned.parse::<f64>().ok()
            }
        }
        _ => None,
    };

    match numeric {
        Some(n) if n.is_finite() && n > 0.0 => (n.round() as u64).max(MIN_MONTHLY_BUDGET),
        _ => fallback,
    }
}
