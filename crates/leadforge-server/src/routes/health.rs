//! Health and status route.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(get_health))
}

/// GET /api/health
async fn get_health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let config = state.llm_config.read();
    Json(serde_json::json!({
        "status": "ok",
        "llmConfigured": config.is_configured(),
        "allowFallback": config.allow_fallback,
        "model": config.model,
        "runs": state.runs.read().len(),
    }))
}
