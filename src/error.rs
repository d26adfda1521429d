//! Error handling
//!
//! HTTP surface for the scoring taxonomy. Client faults keep their message;
//! server faults answer with the failed stage only and log the detail -
//! response bodies never carry internals beyond what diagnosis needs
//! (length mismatches state both counts, they signal training/serving skew).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::scoring::ScoringError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    // Client input faults
    MissingFeature(String),

    // Oracle faults
    PredictionFault(String),
    ExplanationFault(String),

    // Integrity faults
    AttributionShape(String),
    AttributionLength { got: usize, expected: usize },

    // Generic errors
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::MissingFeature(name) => (
                StatusCode::BAD_REQUEST,
                format!("Missing feature '{}' in request payload", name),
            ),
            AppError::PredictionFault(msg) => {
                tracing::error!("Prediction oracle error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Prediction stage failed".to_string(),
                )
            }
            AppError::ExplanationFault(msg) => {
                tracing::error!("Explanation oracle error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Explanation stage failed".to_string(),
                )
            }
            AppError::AttributionShape(msg) => {
                tracing::error!("Unrecognized attribution shape: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Attribution extraction stage failed: unrecognized explainer output shape"
                        .to_string(),
                )
            }
            AppError::AttributionLength { got, expected } => {
                tracing::error!(
                    "Attribution length mismatch: extracted {} values for {} features",
                    got,
                    expected
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!(
                        "Attribution extraction stage failed: extracted {} values for {} features",
                        got, expected
                    ),
                )
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<ScoringError> for AppError {
    fn from(err: ScoringError) -> Self {
        match err {
            ScoringError::MissingFeature(name) => AppError::MissingFeature(name),
            ScoringError::PredictionFault(msg) => AppError::PredictionFault(msg),
            ScoringError::ExplanationFault(msg) => AppError::ExplanationFault(msg),
            ScoringError::UnrecognizedShape(msg) => AppError::AttributionShape(msg),
            ScoringError::LengthMismatch { got, expected } => {
                AppError::AttributionLength { got, expected }
            }
            // Artifact faults are startup-fatal; reaching here means a
            // backend misconfiguration slipped past startup
            ScoringError::InvalidArtifact(msg) => AppError::InternalError(msg),
        }
    }
}
