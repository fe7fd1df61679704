//! Ad input generation and run history routes.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use leadforge_copy::context::{or_default, DEFAULT_CTA, DEFAULT_OBJECTIVE};
use leadforge_copy::{normalize_text, AdInputRun, Channel, GenerationRequest};
use leadforge_llm::{rule_based_outcome, GenerationOutcome, GenerationSource, LlmAdGenerator};
use serde_json::{json, Value};
use tracing::info;

use super::{error_response, from_error, ApiResponse};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ad-inputs/generate", post(generate))
        .route("/ad-inputs/runs", get(list_runs))
}

/// Platform labels from the body, unknown entries dropped, first
/// occurrence kept.
fn requested_channels(body: &Value) -> Vec<Channel> {
    let mut channels = Vec::new();
    let labels = body
        .get("channels")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).collect::<Vec<_>>())
        .unwrap_or_default();
    for channel in labels.into_iter().filter_map(Channel::from_label) {
        if !channels.contains(&channel) {
            channels.push(channel);
        }
    }
    channels
}

fn build_run(customer_id: String, request: &GenerationRequest, outcome: GenerationOutcome) -> AdInputRun {
    AdInputRun {
        id: format!("run-{}", uuid::Uuid::new_v4().simple()),
        customer_id,
        channels: request.channels.clone(),
        objective: or_default(&request.objective, DEFAULT_OBJECTIVE),
        cta: or_default(&request.cta, DEFAULT_CTA),
        artifact_name: normalize_text(&request.artifact_name),
        offer: normalize_text(&request.offer),
        landing_url: normalize_text(&request.landing_url),
        audience: normalize_text(&request.audience),
        strategy_notes: normalize_text(&request.strategy_notes),
        custom_inputs: request.custom_inputs.trim().to_string(),
        created_at: chrono::Utc::now().to_rfc3339(),
        options: outcome.options,
    }
}

/// POST /api/ad-inputs/generate
async fn generate(State(state): State<Arc<AppState>>, Json(body): Json<Value>) -> ApiResponse {
    let channels = requested_channels(&body);
    if channels.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Select at least one channel.");
    }

    let mut fields = body.clone();
    fields["channels"] = json!(channels);
    let request: GenerationRequest = match serde_json::from_value(fields) {
        Ok(r) => r,
        Err(e) => {
            return error_response(StatusCode::BAD_REQUEST, format!("Invalid request: {}", e))
        }
    };

    let llm_config = state.llm_config.read().clone();
    let use_llm = match body.get("mode").and_then(Value::as_str) {
        Some("rule-based") => false,
        Some("llm") => true,
        _ => llm_config.is_configured(),
    };

    let outcome = if use_llm {
        let generator = match LlmAdGenerator::new(llm_config) {
            Ok(g) => g,
            Err(e) => return from_error(&e),
        };
        match generator.generate(&request).await {
            Ok(outcome) => outcome,
            Err(e) => return from_error(&e),
        }
    } else {
        rule_based_outcome(&request)
    };

    let source = outcome.source;
    let count = outcome.options.len();
    let customer_id = body
        .get("customerId")
        .and_then(Value::as_str)
        .map(normalize_text)
        .unwrap_or_default();
    let run = build_run(customer_id, &request, outcome);
    info!("Recorded run {} ({} options, {})", run.id, count, source);
    state.record_run(run.clone());

    let message = match source {
        GenerationSource::Fallback => {
            format!("Generated {} ad input options (fallback mode).", count)
        }
        _ => format!("Generated {} ad input options.", count),
    };

    (
        StatusCode::CREATED,
        Json(json!({
            "run": run,
            "source": source,
            "message": message,
        })),
    )
}

/// GET /api/ad-inputs/runs
async fn list_runs(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({ "runs": state.runs_snapshot() }))
}
