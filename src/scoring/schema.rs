//! Feature Schema - Canonical Feature Order
//!
//! **CRITICAL: This file controls the serving-time feature schema**
//!
//! The model and the explainer were both fit against this exact column
//! order. Changing it without retraining both artifacts silently skews
//! every score and every attribution, so:
//! 1. Never reorder these names at runtime
//! 2. Never derive the order from an incoming payload
//! 3. Artifacts are validated against this list at load time

use super::ScoringError;

/// Feature names in the exact order the model was trained on
/// This is the SINGLE SOURCE OF TRUTH for the feature layout
pub const FEATURE_ORDER: &[&str] = &[
    "age",          // 0: client age in years
    "revenu",       // 1: declared annual income
    "anciennete",   // 2: years as a customer
    "nb_incidents", // 3: payment incident count
    "score_credit", // 4: external credit bureau score
];

/// Total number of features
/// IMPORTANT: Must match FEATURE_ORDER.len()!
pub const FEATURE_COUNT: usize = 5;

/// Validate that an artifact's recorded feature names match the canonical order.
///
/// A mismatch means the artifact was fit against a different schema than the
/// one this server normalizes requests into, which corrupts every
/// position-paired attribution downstream. Callers treat this as fatal.
pub fn validate_feature_names(names: &[String]) -> Result<(), ScoringError> {
    if names.len() != FEATURE_COUNT {
        return Err(ScoringError::InvalidArtifact(format!(
            "artifact records {} features, schema expects {}",
            names.len(),
            FEATURE_COUNT
        )));
    }
    for (recorded, expected) in names.iter().zip(FEATURE_ORDER) {
        if recorded != expected {
            return Err(ScoringError::InvalidArtifact(format!(
                "artifact feature '{}' does not match schema feature '{}'",
                recorded, expected
            )));
        }
    }
    Ok(())
}
