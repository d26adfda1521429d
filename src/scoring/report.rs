//! Attribution Reporter - Ranking and operator-facing wording
//!
//! Pairs the extracted attribution vector with the canonical feature names
//! (positionally - the pairing is what the length check protects), ranks by
//! absolute weight and renders one French sentence per feature for the
//! dashboard.

use std::collections::HashMap;

use serde::Serialize;

use super::ScoringError;

/// One ranked entry: feature name and signed weight
#[derive(Debug, Clone, Serialize)]
pub struct RankedFeature {
    pub feature: String,
    pub weight: f64,
}

/// Ranked, rendered explanation of one scored instance.
///
/// Derived data, rebuilt per request.
#[derive(Debug, Clone, Serialize)]
pub struct AttributionReport {
    /// Feature name → signed weight
    pub impacts: HashMap<String, f64>,
    /// Entries sorted by descending |weight|; ties keep canonical order
    pub ranked: Vec<RankedFeature>,
    /// One rendered sentence per ranked entry
    pub explanations: Vec<String>,
}

impl AttributionReport {
    /// Build the report from positionally paired values and names.
    ///
    /// A length difference is a schema skew between the explainer and the
    /// serving schema, reported with both counts.
    pub fn build(values: &[f64], names: &[&str]) -> Result<Self, ScoringError> {
        if values.len() != names.len() {
            return Err(ScoringError::LengthMismatch {
                got: values.len(),
                expected: names.len(),
            });
        }

        let impacts: HashMap<String, f64> = names
            .iter()
            .zip(values)
            .map(|(name, weight)| (name.to_string(), *weight))
            .collect();

        let mut ranked: Vec<RankedFeature> = names
            .iter()
            .zip(values)
            .map(|(name, weight)| RankedFeature {
                feature: name.to_string(),
                weight: *weight,
            })
            .collect();
        // Stable sort: equal magnitudes keep their canonical order
        ranked.sort_by(|a, b| b.weight.abs().total_cmp(&a.weight.abs()));

        let explanations = ranked.iter().map(render_explanation).collect();

        Ok(Self {
            impacts,
            ranked,
            explanations,
        })
    }
}

/// Render one ranked entry as the operator-facing sentence.
///
/// A weight of exactly zero reads "négativement": the wording splits on
/// `weight > 0`, and zero deliberately falls on the negative side.
fn render_explanation(entry: &RankedFeature) -> String {
    let direction = if entry.weight > 0.0 {
        "positivement"
    } else {
        "négativement"
    };
    format!(
        "La fonctionnalité '{}' impacte {} la prédiction avec un poids de {:.3}",
        entry.feature, direction, entry.weight
    )
}
