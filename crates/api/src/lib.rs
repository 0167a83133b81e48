//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - Dashboard routes (page model, refresh, alert and task actions, notifications)
//! - Health check route
//! - The JSON error envelope shared by all routes

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::extract::OriginalUri;
use crm_core::dashboard::DashboardView;
use crm_shared::AppError;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The dashboard view this server presents.
    pub dashboard: Arc<DashboardView>,
}

impl AppState {
    /// Wraps a dashboard view.
    #[must_use]
    pub fn new(dashboard: DashboardView) -> Self {
        Self {
            dashboard: Arc::new(dashboard),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

async fn not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    AppError::NotFound(uri.path().to_string()).into()
}
