//! Prediction & Explanation Oracles
//!
//! The trained classifier and its explainer are external collaborators:
//! the pipeline only ever sees them through these two traits. Both are
//! loaded once at startup into an immutable [`Oracles`] service object and
//! shared read-only across requests - no process-wide globals.
//!
//! The builtin backend reads JSON artifacts exported at training time
//! (logistic-regression coefficients, plus the background mean the
//! explainer was built against). The remote backend delegates both calls
//! to a model sidecar over HTTP.

use std::fs;

use ndarray::Array2;
use serde::Deserialize;

use crate::config::Config;

use super::attribution::{ClassArray, RawAttribution};
use super::schema::{self, FEATURE_COUNT};
use super::vector::ClientFeatures;
use super::ScoringError;

/// Positive-class probability for one feature vector
pub trait PredictionOracle: Send + Sync {
    fn predict(&self, features: &ClientFeatures) -> Result<f64, ScoringError>;
}

/// Raw, shape-variable attribution output for one feature vector
pub trait ExplanationOracle: Send + Sync {
    fn explain(&self, features: &ClientFeatures) -> Result<RawAttribution, ScoringError>;
}

/// Both oracles, loaded once and injected into the request pipeline
pub struct Oracles {
    pub predictor: Box<dyn PredictionOracle>,
    pub explainer: Box<dyn ExplanationOracle>,
}

/// Build the oracle pair selected by configuration.
///
/// Any artifact fault here must abort startup: a server that cannot
/// predict or explain must never accept requests.
pub fn load(config: &Config) -> Result<Oracles, ScoringError> {
    match config.oracle_backend.as_str() {
        "builtin" => {
            let predictor = LinearScorer::from_file(&config.model_path)?;
            let explainer = LinearExplainer::from_file(&config.explainer_path)?;
            tracing::info!(
                "Loaded model from {} and explainer from {}",
                config.model_path,
                config.explainer_path
            );
            Ok(Oracles {
                predictor: Box::new(predictor),
                explainer: Box::new(explainer),
            })
        }
        "remote" => {
            tracing::info!("Using remote oracle sidecar at {}", config.remote_oracle_url);
            let url = &config.remote_oracle_url;
            Ok(Oracles {
                predictor: Box::new(super::remote::RemoteOracle::new(url.clone())),
                explainer: Box::new(super::remote::RemoteOracle::new(url.clone())),
            })
        }
        other => Err(ScoringError::InvalidArtifact(format!(
            "unknown oracle backend '{}' (expected 'builtin' or 'remote')",
            other
        ))),
    }
}

// ============================================================================
// BUILTIN BACKEND - LINEAR MODEL ARTIFACTS
// ============================================================================

#[derive(Debug, Deserialize)]
struct ModelArtifact {
    feature_names: Vec<String>,
    coefficients: Vec<f64>,
    intercept: f64,
}

#[derive(Debug, Deserialize)]
struct ExplainerArtifact {
    feature_names: Vec<String>,
    coefficients: Vec<f64>,
    background_mean: Vec<f64>,
}

fn read_artifact<T: for<'de> Deserialize<'de>>(path: &str) -> Result<T, ScoringError> {
    let raw = fs::read_to_string(path).map_err(|e| {
        ScoringError::InvalidArtifact(format!("cannot read artifact {}: {}", path, e))
    })?;
    serde_json::from_str(&raw).map_err(|e| {
        ScoringError::InvalidArtifact(format!("cannot parse artifact {}: {}", path, e))
    })
}

fn coefficients_array(values: Vec<f64>, what: &str) -> Result<[f64; FEATURE_COUNT], ScoringError> {
    <[f64; FEATURE_COUNT]>::try_from(values).map_err(|v: Vec<f64>| {
        ScoringError::InvalidArtifact(format!(
            "{} holds {} values, schema expects {}",
            what,
            v.len(),
            FEATURE_COUNT
        ))
    })
}

/// Logistic-regression scorer over the canonical feature vector
#[derive(Debug)]
pub struct LinearScorer {
    coefficients: [f64; FEATURE_COUNT],
    intercept: f64,
}

impl LinearScorer {
    pub fn new(coefficients: [f64; FEATURE_COUNT], intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    pub fn from_file(path: &str) -> Result<Self, ScoringError> {
        let artifact: ModelArtifact = read_artifact(path)?;
        schema::validate_feature_names(&artifact.feature_names)?;
        Ok(Self::new(
            coefficients_array(artifact.coefficients, "model coefficients")?,
            artifact.intercept,
        ))
    }

    fn margin(&self, features: &ClientFeatures) -> f64 {
        self.coefficients
            .iter()
            .zip(features.as_slice())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept
    }
}

impl PredictionOracle for LinearScorer {
    fn predict(&self, features: &ClientFeatures) -> Result<f64, ScoringError> {
        let margin = self.margin(features);
        Ok(1.0 / (1.0 + (-margin).exp()))
    }
}

/// Exact linear attributions against the recorded background mean.
///
/// For a linear model the attribution of feature i for instance x is
/// `w_i * (x_i - background_mean_i)` in margin space. Emits the two-entry
/// class list a binary classifier's explainer produces: class 0 is the
/// negated class-1 lane.
pub struct LinearExplainer {
    coefficients: [f64; FEATURE_COUNT],
    background_mean: [f64; FEATURE_COUNT],
}

impl LinearExplainer {
    pub fn new(
        coefficients: [f64; FEATURE_COUNT],
        background_mean: [f64; FEATURE_COUNT],
    ) -> Self {
        Self {
            coefficients,
            background_mean,
        }
    }

    pub fn from_file(path: &str) -> Result<Self, ScoringError> {
        let artifact: ExplainerArtifact = read_artifact(path)?;
        schema::validate_feature_names(&artifact.feature_names)?;
        Ok(Self::new(
            coefficients_array(artifact.coefficients, "explainer coefficients")?,
            coefficients_array(artifact.background_mean, "background mean")?,
        ))
    }
}

impl ExplanationOracle for LinearExplainer {
    fn explain(&self, features: &ClientFeatures) -> Result<RawAttribution, ScoringError> {
        let positive: Vec<f64> = self
            .coefficients
            .iter()
            .zip(features.as_slice())
            .zip(&self.background_mean)
            .map(|((w, x), mu)| w * (x - mu))
            .collect();
        let negative: Vec<f64> = positive.iter().map(|v| -v).collect();

        let lane = |values: Vec<f64>| {
            Array2::from_shape_vec((1, FEATURE_COUNT), values)
                .map_err(|e| ScoringError::ExplanationFault(format!("attribution lane: {}", e)))
        };
        Ok(RawAttribution::ClassList(vec![
            ClassArray::Rank2(lane(negative)?),
            ClassArray::Rank2(lane(positive)?),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::extract::positive_class_attributions;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn scorer() -> LinearScorer {
        LinearScorer {
            coefficients: [0.02, 0.00004, 0.08, -0.9, 0.01],
            intercept: -9.5,
        }
    }

    fn explainer() -> LinearExplainer {
        LinearExplainer {
            coefficients: [0.02, 0.00004, 0.08, -0.9, 0.01],
            background_mean: [45.0, 42000.0, 7.0, 1.2, 650.0],
        }
    }

    fn sample_features() -> ClientFeatures {
        ClientFeatures::from_values([40.0, 50000.0, 5.0, 0.0, 700.0])
    }

    #[test]
    fn test_predict_is_sigmoid_of_margin() {
        let score = scorer().predict(&sample_features()).unwrap();
        // margin = 0.8 + 2.0 + 0.4 + 0.0 + 7.0 - 9.5 = 0.7
        let expected = 1.0 / (1.0 + (-0.7f64).exp());
        assert!((score - expected).abs() < 1e-9);
        assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn test_explain_emits_two_class_list() {
        let raw = explainer().explain(&sample_features()).unwrap();
        let values = positive_class_attributions(&raw, FEATURE_COUNT).unwrap();

        // w_i * (x_i - mu_i), per feature
        let expected = [
            0.02 * (40.0 - 45.0),
            0.00004 * (50000.0 - 42000.0),
            0.08 * (5.0 - 7.0),
            -0.9 * (0.0 - 1.2),
            0.01 * (700.0 - 650.0),
        ];
        for (got, want) in values.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12, "got {}, want {}", got, want);
        }

        // class 0 is the negated lane
        match raw {
            RawAttribution::ClassList(classes) => {
                assert_eq!(classes.len(), 2);
                match (&classes[0], &classes[1]) {
                    (ClassArray::Rank2(neg), ClassArray::Rank2(pos)) => {
                        for (n, p) in neg.iter().zip(pos.iter()) {
                            assert!((n + p).abs() < 1e-12);
                        }
                    }
                    other => panic!("expected two rank-2 lanes, got {:?}", other),
                }
            }
            other => panic!("expected ClassList, got {:?}", other),
        }
    }

    #[test]
    fn test_scorer_loads_from_artifact_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"feature_names": ["age", "revenu", "anciennete", "nb_incidents", "score_credit"],
                "coefficients": [0.02, 0.00004, 0.08, -0.9, 0.01],
                "intercept": -9.5}}"#
        )
        .unwrap();

        let scorer = LinearScorer::from_file(file.path().to_str().unwrap()).unwrap();
        assert!((scorer.intercept - -9.5).abs() < 1e-12);
    }

    #[test]
    fn test_missing_artifact_is_fault() {
        let err = LinearScorer::from_file("does/not/exist.json").unwrap_err();
        assert!(matches!(err, ScoringError::InvalidArtifact(_)));
    }

    #[test]
    fn test_reordered_artifact_names_are_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"feature_names": ["revenu", "age", "anciennete", "nb_incidents", "score_credit"],
                "coefficients": [0.0, 0.0, 0.0, 0.0, 0.0],
                "intercept": 0.0}}"#
        )
        .unwrap();

        let err = LinearScorer::from_file(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ScoringError::InvalidArtifact(_)));
    }

    #[test]
    fn test_wrong_coefficient_count_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"feature_names": ["age", "revenu", "anciennete", "nb_incidents", "score_credit"],
                "coefficients": [0.1, 0.2],
                "intercept": 0.0}}"#
        )
        .unwrap();

        let err = LinearScorer::from_file(file.path().to_str().unwrap()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains('2') && msg.contains('5'), "message was: {}", msg);
    }
}
