//! Health check endpoint.

use axum::{Json, Router, extract::State, routing::get};
use crm_core::dashboard::ViewStatus;
use serde::Serialize;

use crate::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status. The server stays healthy while the dashboard is in error.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Status of the dashboard view.
    pub dashboard: ViewStatus,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        dashboard: state.dashboard.status().await,
    })
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
