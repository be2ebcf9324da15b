use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::handlers::AppState;

/// Health check endpoint
/// Returns 200 OK if the service is running
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({
        "status": "healthy",
        "service": "tile-estimator",
        "version": env!("CARGO_PKG_VERSION"),
    })))
}

/// Readiness check endpoint
/// Reports whether price edits are accepted on this deployment
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let storage = if state.prices.is_read_only() {
        "read-only"
    } else {
        "read-write"
    };

    (StatusCode::OK, Json(json!({
        "status": "ready",
        "service": "tile-estimator",
        "storage": storage,
    })))
}
