//! Scoring wire types

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Documented request shape: the five client attributes the model was
/// trained on. The handler itself accepts any name → number mapping so a
/// missing attribute surfaces as a named 400 rather than a framework
/// deserialization error; this struct is the typed view used by the
/// dashboard and by tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientRecord {
    pub age: i64,
    pub revenu: f64,
    pub anciennete: i64,
    pub nb_incidents: i64,
    pub score_credit: f64,
}

impl ClientRecord {
    /// Flatten into the name → value mapping the pipeline consumes
    pub fn to_feature_map(&self) -> HashMap<String, f64> {
        HashMap::from([
            ("age".to_string(), self.age as f64),
            ("revenu".to_string(), self.revenu),
            ("anciennete".to_string(), self.anciennete as f64),
            ("nb_incidents".to_string(), self.nb_incidents as f64),
            ("score_credit".to_string(), self.score_credit),
        ])
    }
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    /// Positive-class probability in [0, 1]
    pub score: f64,
    /// Feature name → signed attribution weight
    pub shap_values: HashMap<String, f64>,
    /// One rendered sentence per feature, strongest first
    pub explanations: Vec<String>,
}
