//! LeadForge Budget — channel allocation, lead forecasting, guardrails.
//!
//! Pure arithmetic over percentages and benchmark costs; no I/O.

pub mod allocation;
pub mod channels;
pub mod forecast;
pub mod guardrails;

pub use allocation::{
    channel_mix, even_allocations, normalize_allocations_to_100, rebalance_allocations,
    Allocation, BudgetAllocation,
};
pub use channels::{parse_budget, parse_channels, LeadChannel, DEFAULT_MONTHLY_BUDGET};
pub use forecast::{estimate_leads, forecast_allocations, LeadForecast};
pub use guardrails::{
    admit_campaign, advance_stage, apply_action, enforce_guardrails, risk_level, simulate_cycle,
    Campaign, CampaignAction, CampaignMode, CycleReport, Guardrails, RiskLevel, Stage,
};
