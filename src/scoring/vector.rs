//! Client Feature Vector - Normalized model input
//!
//! Turns the loosely-keyed request payload into a fixed-order vector.
//! The payload is a name → value mapping; the vector follows
//! `schema::FEATURE_ORDER` regardless of the mapping's key order.

use std::collections::HashMap;

use super::schema::{FEATURE_COUNT, FEATURE_ORDER};
use super::ScoringError;

/// Ordered client features, one slot per canonical feature.
///
/// Request-scoped: built per scoring request, handed to both oracles,
/// dropped with the response. Never use a raw `Vec<f64>` for model input;
/// this type is what guarantees the canonical ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientFeatures {
    values: [f64; FEATURE_COUNT],
}

impl ClientFeatures {
    /// Normalize a name → value mapping into the canonical order.
    ///
    /// Fails with `MissingFeature` naming the first absent canonical key.
    /// Keys outside the canonical set are ignored.
    pub fn from_map(input: &HashMap<String, f64>) -> Result<Self, ScoringError> {
        let mut values = [0.0f64; FEATURE_COUNT];
        for (i, name) in FEATURE_ORDER.iter().enumerate() {
            values[i] = *input
                .get(*name)
                .ok_or_else(|| ScoringError::MissingFeature((*name).to_string()))?;
        }
        Ok(Self { values })
    }

    /// Build from already-ordered values
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    /// Values as a slice, in canonical order
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Values as an array reference
    pub fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    /// Get a value by canonical feature name
    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        FEATURE_ORDER
            .iter()
            .position(|n| *n == name)
            .map(|i| self.values[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_map() -> HashMap<String, f64> {
        HashMap::from([
            ("age".to_string(), 40.0),
            ("revenu".to_string(), 50000.0),
            ("anciennete".to_string(), 5.0),
            ("nb_incidents".to_string(), 0.0),
            ("score_credit".to_string(), 700.0),
        ])
    }

    #[test]
    fn test_normalizes_into_canonical_order() {
        let features = ClientFeatures::from_map(&sample_map()).unwrap();
        assert_eq!(features.as_slice(), &[40.0, 50000.0, 5.0, 0.0, 700.0]);
    }

    #[test]
    fn test_order_independent_of_key_insertion() {
        // HashMap iteration order is arbitrary; build the map backwards to
        // make the point explicit anyway.
        let mut input = HashMap::new();
        input.insert("score_credit".to_string(), 700.0);
        input.insert("nb_incidents".to_string(), 0.0);
        input.insert("anciennete".to_string(), 5.0);
        input.insert("revenu".to_string(), 50000.0);
        input.insert("age".to_string(), 40.0);

        let features = ClientFeatures::from_map(&input).unwrap();
        assert_eq!(features.as_slice(), &[40.0, 50000.0, 5.0, 0.0, 700.0]);
    }

    #[test]
    fn test_missing_feature_is_named() {
        let mut input = sample_map();
        input.remove("nb_incidents");

        let err = ClientFeatures::from_map(&input).unwrap_err();
        match err {
            ScoringError::MissingFeature(name) => assert_eq!(name, "nb_incidents"),
            other => panic!("expected MissingFeature, got {:?}", other),
        }
    }

    #[test]
    fn test_extra_keys_are_ignored() {
        let mut input = sample_map();
        input.insert("segment_marketing".to_string(), 3.0);

        let features = ClientFeatures::from_map(&input).unwrap();
        assert_eq!(features.as_slice().len(), FEATURE_COUNT);
        assert_eq!(features.get_by_name("segment_marketing"), None);
    }

    #[test]
    fn test_get_by_name() {
        let features = ClientFeatures::from_map(&sample_map()).unwrap();
        assert_eq!(features.get_by_name("revenu"), Some(50000.0));
        assert_eq!(features.get_by_name("inconnu"), None);
    }
}
