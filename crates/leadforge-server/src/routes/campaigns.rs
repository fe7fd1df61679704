//! Campaign guardrail evaluation and pipeline simulation.

use std::sync::Arc;

use axum::routing::post;
use axum::{Json, Router};
use leadforge_budget::{apply_action, simulate_cycle, Campaign, CampaignAction, Guardrails, Stage};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/campaigns/evaluate", post(evaluate))
        .route("/campaigns/simulate", post(simulate))
}

#[derive(Deserialize)]
struct EvaluateRequest {
    campaign: Campaign,
    #[serde(default)]
    guardrails: Guardrails,
    #[serde(default)]
    action: CampaignAction,
}

/// POST /api/campaigns/evaluate
async fn evaluate(Json(req): Json<EvaluateRequest>) -> Json<Value> {
    let Some(campaign) = apply_action(req.campaign, req.action, &req.guardrails) else {
        return Json(json!({
            "campaign": null,
            "archived": true,
            "blocked": false,
            "message": "Campaign archived.",
        }));
    };

    let blocked = campaign.stage == Stage::Blocked;
    let message = match (req.action, blocked) {
        (CampaignAction::Check | CampaignAction::Admit, true) => "Campaign blocked by guardrails.",
        (CampaignAction::Check | CampaignAction::Admit, false) => "Campaign within guardrails.",
        _ => "Campaign updated.",
    };
    Json(json!({
        "campaign": campaign,
        "risk": campaign.risk,
        "archived": false,
        "blocked": blocked,
        "message": message,
    }))
}

#[derive(Deserialize)]
struct SimulateRequest {
    campaigns: Vec<Campaign>,
    #[serde(default)]
    guardrails: Guardrails,
}

/// POST /api/campaigns/simulate
async fn simulate(Json(req): Json<SimulateRequest>) -> Json<Value> {
    let mut campaigns = req.campaigns;
    let report = simulate_cycle(&mut campaigns, &req.guardrails);
    Json(json!({
        "campaigns": campaigns,
        "progressed": report.progressed,
        "blocked": report.blocked,
        "message": report.message(),
    }))
}
