//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::scoring::schema::FEATURE_COUNT;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    oracle_backend: String,
    feature_count: usize,
    timestamp: i64,
}

/// Liveness probe. Reaching this handler implies both oracles loaded -
/// startup aborts before the listener binds otherwise.
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        oracle_backend: state.config.oracle_backend.clone(),
        feature_count: FEATURE_COUNT,
        timestamp: chrono::Utc::now().timestamp(),
    })
}
