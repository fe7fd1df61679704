//! Budget allocation and lead forecast routes.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use leadforge_budget::{
    channel_mix, forecast_allocations, normalize_allocations_to_100, parse_budget, parse_channels,
    rebalance_allocations, Allocation, LeadChannel, DEFAULT_MONTHLY_BUDGET,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{error_response, ApiResponse};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/forecast", post(forecast))
        .route("/allocations/normalize", post(normalize))
        .route("/allocations/rebalance", post(rebalance))
}

/// Percent for `channel` from an allocation object keyed by channel key.
fn seed_percent(allocations: Option<&Value>, channel: LeadChannel) -> f64 {
    allocations
        .and_then(|a| a.get(channel.key()))
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
}

/// POST /api/forecast
async fn forecast(Json(body): Json<Value>) -> Json<Value> {
    let monthly = parse_budget(
        body.get("monthlyBudgetUsd").unwrap_or(&Value::Null),
        DEFAULT_MONTHLY_BUDGET,
    );
    let channels = parse_channels(body.get("channels").unwrap_or(&Value::Null));
    let seeds: Vec<f64> = channels
        .iter()
        .map(|&c| seed_percent(body.get("allocations"), c))
        .collect();
    let allocations: Vec<Allocation> = channels
        .iter()
        .zip(normalize_allocations_to_100(&seeds))
        .map(|(&channel, percent)| Allocation { channel, percent })
        .collect();

    let budget = monthly as f64;
    Json(json!({
        "monthlyBudgetUsd": monthly,
        "channels": channels,
        "allocations": allocations,
        "channelMix": channel_mix(budget, &allocations),
        "leadForecast": forecast_allocations(budget, &allocations),
    }))
}

#[derive(Deserialize)]
struct NormalizeRequest {
    values: Vec<f64>,
}

/// POST /api/allocations/normalize
async fn normalize(Json(req): Json<NormalizeRequest>) -> ApiResponse {
    if req.values.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "values must not be empty.");
    }
    (
        StatusCode::OK,
        Json(json!({ "values": normalize_allocations_to_100(&req.values) })),
    )
}

#[derive(Deserialize)]
struct RebalanceRequest {
    allocations: Vec<Allocation>,
    changed: String,
    percent: f64,
}

/// POST /api/allocations/rebalance
async fn rebalance(Json(req): Json<RebalanceRequest>) -> ApiResponse {
    let Some(changed) = LeadChannel::from_key(&req.changed) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            format!("Unknown channel: {}", req.changed),
        );
    };
    (
        StatusCode::OK,
        Json(json!({
            "allocations": rebalance_allocations(&req.allocations, changed, req.percent),
        })),
    )
}
