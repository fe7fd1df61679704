//! Monthly lead forecast from budget and benchmark cost per lead.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::allocation::Allocation;
use crate::channels::LeadChannel;

/// Spread applied around the expected lead count.
const LOW_FACTOR: f64 = 0.8;
const HIGH_FACTOR: f64 = 1.2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadForecast {
    pub expected: u64,
    pub low: u64,
    pub high: u64,
    pub notes: String,
}

/// Forecast monthly leads for `channels`, each taking its percentage of
/// `monthly_budget` from `percents`.
///
/// Channels absent from `percents` contribute nothing. A non-empty channel
/// list always forecasts at least one lead; an empty one forecasts zero.
pub fn estimate_leads(
    monthly_budget: f64,
    channels: &[LeadChannel],
    percents: &HashMap<LeadChannel, f64>,
) -> LeadForecast {
    if channels.is_empty() {
        return LeadForecast {
            expected: 0,
            low: 0,
            high: 0,
            notes: "No channels selected.".into(),
        };
    }

    let budget = monthly_budget.max(0.0);
    let raw: f64 = channels
        .iter()
        .map(|channel| {
            let percent = percents
                .get(channel)
                .copied()
                .filter(|p| p.is_finite())
                .unwrap_or(0.0)
                .max(0.0);
            budget * percent / 100.0 / channel.benchmark_cpl()
        })
        .sum();

    let expected = (raw.round() as u64).max(1);
    let low = ((expected as f64 * LOW_FACTOR).floor() as u64).max(1);
    let high = ((expected as f64 * HIGH_FACTOR).ceil() as u64).max(1);
    debug!("Lead forecast: raw {:.2}, expected {}", raw, expected);

    let labels: Vec<&str> = channels.iter().map(LeadChannel::label).collect();
    LeadForecast {
        expected,
        low,
        high,
        notes: format!(
            "Estimated monthly leads based on benchmark CPL assumptions for {}.",
            labels.join(", ")
        ),
    }
}

/// [`estimate_leads`] over already-normalised allocations.
pub fn forecast_allocations(monthly_budget: f64, allocations: &[Allocation]) -> LeadForecast {
    let channels: Vec<LeadChannel> = allocations.iter().map(|a| a.channel).collect();
    let percents: HashMap<LeadChannel, f64> = allocations
        .iter()
        .map(|a| (a.channel, f64::from(a.percent)))
        .collect();
    estimate_leads(monthly_budget, &channels, &percents)
}
