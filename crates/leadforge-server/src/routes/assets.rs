//! Home-service asset pack route.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use leadforge_copy::AssetPackInput;
use leadforge_llm::AssetPackGenerator;
use serde_json::json;

use super::{from_error, ApiResponse};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/asset-packs/generate", post(generate))
}

/// POST /api/asset-packs/generate
async fn generate(
    State(state): State<Arc<AppState>>,
    Json(input): Json<AssetPackInput>,
) -> ApiResponse {
    let config = state.llm_config.read().clone();
    let generator = match AssetPackGenerator::new(config) {
        Ok(g) => g,
        Err(e) => return from_error(&e),
    };
    match generator.generate(&input).await {
        Ok(result) => (StatusCode::CREATED, Json(json!(result))),
        Err(e) => from_error(&e),
    }
}
