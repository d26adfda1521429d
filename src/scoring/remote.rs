//! Remote Oracle - Model sidecar over HTTP
//!
//! Delegates both oracle calls to an external model server, for deployments
//! where the model and explainer live in their own process. Calls are
//! blocking with no retry; resilience belongs to the caller's boundary,
//! not here.
//!
//! Sidecar contract:
//! - `POST {base}/predict`  {"features": [..]} → {"probability": p}
//! - `POST {base}/explain`  {"features": [..]} → {"shap_values": envelope}
//!   where the envelope is the tagged form `RawAttribution::from_json`
//!   accepts.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use super::attribution::RawAttribution;
use super::oracle::{ExplanationOracle, PredictionOracle};
use super::vector::ClientFeatures;
use super::ScoringError;

pub struct RemoteOracle {
    // Built on first use: the blocking client must not be constructed on
    // the async runtime, and oracle calls only ever run on the blocking pool
    client: OnceLock<reqwest::blocking::Client>,
    base_url: String,
}

#[derive(Serialize)]
struct VectorPayload<'a> {
    features: &'a [f64],
}

#[derive(Deserialize)]
struct PredictPayload {
    probability: f64,
}

#[derive(Deserialize)]
struct ExplainPayload {
    shap_values: serde_json::Value,
}

impl RemoteOracle {
    pub fn new(base_url: String) -> Self {
        Self {
            client: OnceLock::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn post<T: for<'de> Deserialize<'de>>(
        &self,
        route: &str,
        features: &ClientFeatures,
    ) -> Result<T, String> {
        let client = self.client.get_or_init(reqwest::blocking::Client::new);
        let url = format!("{}/{}", self.base_url, route);
        let response = client
            .post(&url)
            .json(&VectorPayload {
                features: features.as_slice(),
            })
            .send()
            .map_err(|e| format!("{}: {}", url, e))?
            .error_for_status()
            .map_err(|e| format!("{}: {}", url, e))?;
        response.json().map_err(|e| format!("{}: {}", url, e))
    }
}

impl PredictionOracle for RemoteOracle {
    fn predict(&self, features: &ClientFeatures) -> Result<f64, ScoringError> {
        let payload: PredictPayload = self
            .post("predict", features)
            .map_err(ScoringError::PredictionFault)?;
        if !(0.0..=1.0).contains(&payload.probability) {
            return Err(ScoringError::PredictionFault(format!(
                "sidecar probability {} outside [0, 1]",
                payload.probability
            )));
        }
        Ok(payload.probability)
    }
}

impl ExplanationOracle for RemoteOracle {
    fn explain(&self, features: &ClientFeatures) -> Result<RawAttribution, ScoringError> {
        let payload: ExplainPayload = self
            .post("explain", features)
            .map_err(ScoringError::ExplanationFault)?;
        RawAttribution::from_json(&payload.shap_values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let oracle = RemoteOracle::new("http://localhost:9000/".to_string());
        assert_eq!(oracle.base_url, "http://localhost:9000");
    }

    #[test]
    fn test_unreachable_sidecar_is_prediction_fault() {
        // Nothing speaks HTTP on the discard port
        let oracle = RemoteOracle::new("http://127.0.0.1:9".to_string());
        let features = ClientFeatures::from_values([40.0, 50000.0, 5.0, 0.0, 700.0]);
        let err = oracle.predict(&features).unwrap_err();
        assert!(matches!(err, ScoringError::PredictionFault(_)));
    }
}
