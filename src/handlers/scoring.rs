//! Scoring handler

use std::collections::HashMap;

use axum::{extract::State, Json};
use uuid::Uuid;

use crate::models::ScoreResponse;
use crate::scoring;
use crate::{AppError, AppResult, AppState};

/// Score one client and explain the prediction.
///
/// The body is a feature name → number mapping (at least the five
/// canonical features). The oracle calls block, so the whole pipeline runs
/// on the blocking pool; the request either completes or fails as a unit.
pub async fn predict(
    State(state): State<AppState>,
    Json(payload): Json<HashMap<String, f64>>,
) -> AppResult<Json<ScoreResponse>> {
    let request_id = Uuid::new_v4();
    tracing::debug!(
        "Scoring request {} with {} payload fields",
        request_id,
        payload.len()
    );

    let oracles = state.oracles.clone();
    let outcome = tokio::task::spawn_blocking(move || scoring::score_client(&oracles, &payload))
        .await
        .map_err(|e| AppError::InternalError(format!("scoring task aborted: {}", e)))??;

    tracing::info!(
        "Request {} scored {:.4} ({} ranked features)",
        request_id,
        outcome.score,
        outcome.report.ranked.len()
    );

    Ok(Json(ScoreResponse {
        score: outcome.score,
        shap_values: outcome.report.impacts,
        explanations: outcome.report.explanations,
    }))
}
