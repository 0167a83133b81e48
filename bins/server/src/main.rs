//! CRM Dashboard Server
//!
//! Main entry point for the dashboard service.

use std::sync::Arc;

use chrono::Utc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crm_api::{AppState, create_router};
use crm_client::HttpCrmClient;
use crm_core::crm::{CrmData, CrmServices, InMemoryCrm};
use crm_core::dashboard::{DashboardLoader, DashboardView};
use crm_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crm=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    // Pick the collaborator backend
    let services = match HttpCrmClient::from_config(&config.upstream)? {
        Some(client) => {
            info!(base_url = %client.base_url(), "Using upstream CRM services");
            CrmServices::from_backend(Arc::new(client))
        }
        None => {
            warn!("No upstream base URL configured, serving demo data");
            CrmServices::from_backend(Arc::new(InMemoryCrm::new(CrmData::demo(Utc::now()))))
        }
    };

    // Create the dashboard view and run the initial load
    let loader =
        DashboardLoader::with_activity_limit(services, config.dashboard.recent_activity_limit);
    let view =
        DashboardView::with_notification_capacity(loader, config.dashboard.notification_capacity);
    let status = view.load().await;
    info!(?status, "Initial dashboard load finished");

    // Create router
    let app = create_router(AppState::new(view));

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
