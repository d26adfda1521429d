//! Scoring Pipeline
//!
//! The request-scoped path from raw client attributes to a score plus a
//! ranked, rendered explanation:
//!
//! ```text
//! payload map → ClientFeatures → {prediction, explanation} oracles
//!             → RawAttribution → extractor → AttributionReport
//! ```
//!
//! The pipeline is stateless and holds no shared mutable data; the oracles
//! are loaded once at startup and read concurrently.

pub mod attribution;
pub mod extract;
pub mod oracle;
pub mod remote;
pub mod report;
pub mod schema;
pub mod vector;


use std::collections::HashMap;

use thiserror::Error;

pub use oracle::Oracles;
pub use report::AttributionReport;
pub use vector::ClientFeatures;

/// Everything that can go wrong between payload and report.
///
/// `MissingFeature` is the only client fault; the rest are server faults
/// and terminal for the request.
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("missing feature '{0}' in request payload")]
    MissingFeature(String),

    #[error("prediction oracle failed: {0}")]
    PredictionFault(String),

    #[error("explanation oracle failed: {0}")]
    ExplanationFault(String),

    #[error("unrecognized attribution shape: {0}")]
    UnrecognizedShape(String),

    #[error("attribution length mismatch: extracted {got} values for {expected} features")]
    LengthMismatch { got: usize, expected: usize },

    #[error("invalid oracle artifact: {0}")]
    InvalidArtifact(String),
}

/// Score plus its explanation, ready for the wire
#[derive(Debug)]
pub struct ScoringOutcome {
    pub score: f64,
    pub report: AttributionReport,
}

/// Run the full pipeline for one client.
///
/// Blocking (the oracle calls have no suspension points); callers on the
/// async side run this under `spawn_blocking`. Completes or fails
/// atomically - no partial outcome is ever returned.
pub fn score_client(
    oracles: &Oracles,
    payload: &HashMap<String, f64>,
) -> Result<ScoringOutcome, ScoringError> {
    let features = ClientFeatures::from_map(payload)?;
    let score = oracles.predictor.predict(&features)?;
    let raw = oracles.explainer.explain(&features)?;
    let values = extract::positive_class_attributions(&raw, schema::FEATURE_COUNT)?;
    let report = AttributionReport::build(&values, schema::FEATURE_ORDER)?;
    Ok(ScoringOutcome { score, report })
}
