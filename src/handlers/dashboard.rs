//! Operator dashboard handler

use axum::response::Html;

use crate::models::ClientRecord;

const DASHBOARD_HTML: &str = include_str!("../../assets/dashboard.html");

/// Serve the dashboard with a sample client pre-filled in the form
pub async fn index() -> Html<String> {
    let sample = ClientRecord {
        age: 40,
        revenu: 50000.0,
        anciennete: 5,
        nb_incidents: 0,
        score_credit: 700.0,
    };
    let sample_json =
        serde_json::to_string(&sample).unwrap_or_else(|_| "{}".to_string());
    Html(DASHBOARD_HTML.replace("__SAMPLE_CLIENT__", &sample_json))
}
