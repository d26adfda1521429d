//! Configuration module

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Oracle backend: "builtin" (JSON artifacts) or "remote" (sidecar)
    pub oracle_backend: String,

    /// Path to the model artifact (builtin backend)
    pub model_path: String,

    /// Path to the explainer artifact (builtin backend)
    pub explainer_path: String,

    /// Base URL of the model sidecar (remote backend)
    pub remote_oracle_url: String,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),

            oracle_backend: env::var("ORACLE_BACKEND")
                .unwrap_or_else(|_| "builtin".to_string()),

            model_path: env::var("MODEL_PATH")
                .unwrap_or_else(|_| "app/model.json".to_string()),

            explainer_path: env::var("EXPLAINER_PATH")
                .unwrap_or_else(|_| "app/explainer.json".to_string()),

            remote_oracle_url: env::var("REMOTE_ORACLE_URL")
                .unwrap_or_else(|_| "http://localhost:9000".to_string()),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
