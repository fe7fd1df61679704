//! HTTP route handlers, all nested under `/api`.

pub mod ad_inputs;
pub mod assets;
pub mod campaigns;
pub mod forecast;
pub mod health;
pub mod llm;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::{Json, Router};
use leadforge_core::Error;
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(health::routes())
        .merge(ad_inputs::routes())
        .merge(forecast::routes())
        .merge(assets::routes())
        .merge(campaigns::routes())
        .merge(llm::routes())
}

pub type ApiResponse = (StatusCode, Json<Value>);

pub fn error_response(status: StatusCode, message: impl Into<String>) -> ApiResponse {
    (status, Json(json!({ "error": message.into() })))
}

/// Map a domain error onto a status; the message is the error's display.
pub fn from_error(err: &Error) -> ApiResponse {
    let status = match err {
        Error::Io(_) | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    };
    error_response(status, err.to_string())
}
