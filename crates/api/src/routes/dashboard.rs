//! Dashboard routes.
//!
//! The dashboard view is server-side state; these routes render it, reload
//! it, and run the two user actions. Action failures are not HTTP errors:
//! they come back as an error notification alongside the unchanged page.

use std::str::FromStr;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use chrono::Utc;
use crm_core::dashboard::{DashboardPage, Notification};
use crm_shared::AppError;
use crm_shared::types::{AlertId, TaskId};
use serde::Serialize;
use tracing::{info, warn};

use crate::{AppState, error::ApiError};

/// Creates the dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/refresh", post(refresh_dashboard))
        .route("/dashboard/alerts/{alert_id}", delete(dismiss_alert))
        .route("/dashboard/tasks/{task_id}/complete", post(complete_task))
        .route("/dashboard/notifications", get(take_notifications))
}

// ============================================================================
// Response Types
// ============================================================================

/// Response for a user action.
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    /// Outcome of the action.
    pub notification: Notification,
    /// Page after the action.
    pub page: DashboardPage,
}

/// Response for draining notifications.
#[derive(Debug, Serialize)]
pub struct NotificationsResponse {
    /// Pending notifications, oldest first.
    pub notifications: Vec<Notification>,
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Parses a typed ID from a path segment.
fn parse_id<T: FromStr>(raw: &str, what: &str) -> Result<T, ApiError> {
    raw.parse::<T>().map_err(|_| {
        warn!(%raw, what, "Rejected malformed id");
        AppError::Validation(format!("invalid {what} id: {raw}")).into()
    })
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /dashboard
async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardPage> {
    Json(state.dashboard.page(Utc::now()).await)
}

/// POST /dashboard/refresh
///
/// Runs the full load. Also the retry affordance of the error state.
async fn refresh_dashboard(State(state): State<AppState>) -> Json<DashboardPage> {
    let status = state.dashboard.load().await;
    info!(?status, "Dashboard refreshed");
    Json(state.dashboard.page(Utc::now()).await)
}

/// DELETE /dashboard/alerts/{alert_id}
async fn dismiss_alert(State(state): State<AppState>, Path(alert_id): Path<String>) -> Response {
    let alert_id: AlertId = match parse_id(&alert_id, "alert") {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    let notification = state.dashboard.dismiss_alert(alert_id).await;
    let page = state.dashboard.page(Utc::now()).await;

    (StatusCode::OK, Json(ActionResponse { notification, page })).into_response()
}

/// POST /dashboard/tasks/{task_id}/complete
async fn complete_task(State(state): State<AppState>, Path(task_id): Path<String>) -> Response {
    let task_id: TaskId = match parse_id(&task_id, "task") {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    let notification = state.dashboard.complete_task(task_id).await;
    let page = state.dashboard.page(Utc::now()).await;

    (StatusCode::OK, Json(ActionResponse { notification, page })).into_response()
}

/// GET /dashboard/notifications
async fn take_notifications(State(state): State<AppState>) -> Json<NotificationsResponse> {
    Json(NotificationsResponse {
        notifications: state.dashboard.take_notifications().await,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        Router,
        body::Body,
        http::{Method, Request, StatusCode},
    };
    use chrono::Utc;
    use crm_core::crm::{CrmData, CrmServices, DataSource, InMemoryCrm};
    use crm_core::dashboard::{DashboardLoader, DashboardView, LOAD_ERROR_MESSAGE};
    use http_body_util::BodyExt;
    use rstest::rstest;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::{AppState, create_router};

    /// Router over the demo data set, plus a handle on the backing CRM.
    fn app() -> (Router, Arc<InMemoryCrm>) {
        let crm = Arc::new(InMemoryCrm::new(CrmData::demo(Utc::now())));
        let view = DashboardView::new(DashboardLoader::new(CrmServices::from_backend(
            crm.clone(),
        )));
        (create_router(AppState::new(view)), crm)
    }

    async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn card<'a>(page: &'a Value, key: &str) -> &'a str {
        page["stat_cards"]
            .as_array()
            .unwrap()
            .iter()
            .find(|c| c["key"] == key)
            .unwrap()["value"]
            .as_str()
            .unwrap()
    }

    fn alert_ids(page: &Value) -> Vec<String> {
        page["alerts"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["id"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_health_reports_dashboard_status() {
        let (app, _) = app();

        let (status, body) = send(&app, Method::GET, "/api/v1/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["dashboard"], "loading");
    }

    #[tokio::test]
    async fn test_unknown_route_gets_json_not_found() {
        let (app, _) = app();

        let (status, body) = send(&app, Method::GET, "/api/v1/pipeline").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NOT_FOUND");
        assert_eq!(body["message"], "Not found: /api/v1/pipeline");
    }

    #[tokio::test]
    async fn test_dashboard_is_loading_before_first_refresh() {
        let (app, _) = app();

        let (status, page) = send(&app, Method::GET, "/api/v1/dashboard").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["status"], "loading");
        assert!(page["stat_cards"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_renders_demo_stats() {
        let (app, _) = app();

        let (status, page) = send(&app, Method::POST, "/api/v1/dashboard/refresh").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["status"], "ready");
        assert_eq!(card(&page, "total_contacts"), "4");
        assert_eq!(card(&page, "active_deals"), "3");
        assert_eq!(card(&page, "pipeline_value"), "$66,700");
        assert_eq!(card(&page, "completed_tasks"), "1 / 4");
        assert_eq!(page["alerts"].as_array().unwrap().len(), 3);
        assert_eq!(page["recent_activity"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_dismiss_alert_removes_only_that_alert() {
        let (app, _) = app();
        let (_, page) = send(&app, Method::POST, "/api/v1/dashboard/refresh").await;
        let ids = alert_ids(&page);

        let (status, body) = send(
            &app,
            Method::DELETE,
            &format!("/api/v1/dashboard/alerts/{}", ids[1]),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["notification"]["level"], "success");
        assert_eq!(body["notification"]["message"], "Alert dismissed");
        assert_eq!(alert_ids(&body["page"]), [ids[0].clone(), ids[2].clone()]);
    }

    #[tokio::test]
    async fn test_dismiss_unknown_alert_keeps_state() {
        let (app, _) = app();
        send(&app, Method::POST, "/api/v1/dashboard/refresh").await;

        let (status, body) = send(
            &app,
            Method::DELETE,
            &format!("/api/v1/dashboard/alerts/{}", uuid::Uuid::new_v4()),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["notification"]["level"], "error");
        assert_eq!(body["notification"]["message"], "Failed to dismiss alert");
        assert_eq!(body["page"]["alerts"].as_array().unwrap().len(), 3);
    }

    #[rstest]
    #[case("/api/v1/dashboard/alerts/not-a-uuid", Method::DELETE)]
    #[case("/api/v1/dashboard/tasks/42/complete", Method::POST)]
    #[tokio::test]
    async fn test_malformed_ids_are_rejected(#[case] uri: &str, #[case] method: Method) {
        let (app, _) = app();

        let (status, body) = send(&app, method, uri).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_complete_task_reloads_stats() {
        let (app, crm) = app();
        let (_, page) = send(&app, Method::POST, "/api/v1/dashboard/refresh").await;
        let task_id = page["alerts"][0]["task_id"].as_str().unwrap().to_string();
        let reads_before = crm.read_count();

        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/api/v1/dashboard/tasks/{task_id}/complete"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["notification"]["message"], "Task marked as complete");
        assert_eq!(crm.read_count() - reads_before, DataSource::ALL.len());
        assert_eq!(card(&body["page"], "completed_tasks"), "2 / 4");
        assert!(
            body["page"]["alerts"]
                .as_array()
                .unwrap()
                .iter()
                .all(|a| a["task_id"] != task_id.as_str())
        );
    }

    #[tokio::test]
    async fn test_failed_refresh_shows_error_then_retry_recovers() {
        let (app, crm) = app();
        crm.fail_reads(DataSource::Activities).await;

        let (_, page) = send(&app, Method::POST, "/api/v1/dashboard/refresh").await;
        assert_eq!(page["status"], "error");
        assert_eq!(page["error"]["message"], LOAD_ERROR_MESSAGE);
        assert!(page["stat_cards"].as_array().unwrap().is_empty());

        crm.recover().await;
        let (_, page) = send(&app, Method::POST, "/api/v1/dashboard/refresh").await;
        assert_eq!(page["status"], "ready");
        assert!(page["error"].is_null());
    }

    #[tokio::test]
    async fn test_notifications_are_drained() {
        let (app, crm) = app();
        send(&app, Method::POST, "/api/v1/dashboard/refresh").await;
        crm.fail_writes(true).await;
        send(
            &app,
            Method::POST,
            &format!("/api/v1/dashboard/tasks/{}/complete", uuid::Uuid::new_v4()),
        )
        .await;

        let (_, body) = send(&app, Method::GET, "/api/v1/dashboard/notifications").await;
        let notifications = body["notifications"].as_array().unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0]["message"], "Failed to complete task");

        let (_, body) = send(&app, Method::GET, "/api/v1/dashboard/notifications").await;
        assert!(body["notifications"].as_array().unwrap().is_empty());
    }
}
