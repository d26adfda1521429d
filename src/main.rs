//! Néo-Banque Scoring Server
//!
//! Loan eligibility scoring with per-feature explanations for the advisor
//! dashboard.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                   NÉO-BANQUE SCORING API                     │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌──────────────────┐  ┌───────────────────┐  │
//! │  │ Dashboard │  │  Scoring         │  │  Oracles          │  │
//! │  │ (GET /)   │  │  Pipeline        │  │  (model +         │  │
//! │  │           │  │  (POST /predict) │  │   explainer)      │  │
//! │  └─────┬─────┘  └────────┬─────────┘  └─────────┬─────────┘  │
//! │        └─────────────────┼──────────────────────┘            │
//! │                          ▼                                   │
//! │        normalize → predict → explain → extract → report      │
//! └──────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod models;
mod scoring;

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};
use scoring::Oracles;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "neobanque_scoring=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("Néo-Banque scoring server starting...");
    tracing::info!("Oracle backend: {}", config.oracle_backend);

    // Load both oracles up front: a server that cannot predict or explain
    // must never start accepting requests
    let oracles = scoring::oracle::load(&config)
        .expect("Failed to load prediction/explanation oracles");

    // Build application state
    let state = AppState {
        config: config.clone(),
        oracles: Arc::new(oracles),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub oracles: Arc<Oracles>,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard::index))
        .route("/health", get(handlers::health::check))
        .route("/predict", post(handlers::scoring::predict))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
