//! Stateful dashboard view.
//!
//! Owns the view state and performs the load and the two user actions.
//! Actions never return errors; failures surface as notifications.

use chrono::{DateTime, Utc};
use crm_shared::types::{AlertId, TaskId};
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use super::loader::DashboardLoader;
use super::page::DashboardPage;
use super::types::{DashboardState, Notification, NotificationLevel, ViewStatus};

/// Message shown whenever a load fails, whatever the cause.
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load dashboard data. Please try again.";

/// Default notification queue capacity.
pub const DEFAULT_NOTIFICATION_CAPACITY: usize = 20;

/// The dashboard view: loader, view state, and user actions.
///
/// Loads may overlap (an action-triggered reload can start while another load
/// is in flight). Each load takes a generation ticket and only the most
/// recently started load applies its result.
#[derive(Debug)]
pub struct DashboardView {
    loader: DashboardLoader,
    state: Mutex<DashboardState>,
    notification_capacity: usize,
}

impl DashboardView {
    /// Creates a view that has not loaded yet.
    #[must_use]
    pub fn new(loader: DashboardLoader) -> Self {
        Self::with_notification_capacity(loader, DEFAULT_NOTIFICATION_CAPACITY)
    }

    /// Creates a view keeping at most `capacity` pending notifications.
    #[must_use]
    pub fn with_notification_capacity(loader: DashboardLoader, capacity: usize) -> Self {
        Self {
            loader,
            state: Mutex::new(DashboardState::default()),
            notification_capacity: capacity,
        }
    }

    /// Runs the full load and applies its result atomically.
    ///
    /// On failure the view enters the error state with [`LOAD_ERROR_MESSAGE`];
    /// the previous snapshot is left untouched and nothing is partially applied.
    pub async fn load(&self) -> ViewStatus {
        let ticket = {
            let mut state = self.state.lock().await;
            state.generation += 1;
            state.loading = true;
            state.error = None;
            state.generation
        };

        let result = self.loader.load().await;

        let mut state = self.state.lock().await;
        if state.generation != ticket {
            debug!(
                ticket,
                latest = state.generation,
                "Discarding result of superseded dashboard load"
            );
            return state.status();
        }

        state.loading = false;
        match result {
            Ok(snapshot) => {
                info!(
                    active_deals = snapshot.stats.active_deals,
                    alerts = snapshot.alerts.len(),
                    "Dashboard loaded"
                );
                state.snapshot = Some(snapshot);
            }
            Err(e) => {
                error!(source = ?e.data_source(), error = %e, "Failed to load dashboard data");
                state.error = Some(LOAD_ERROR_MESSAGE.to_string());
            }
        }
        state.status()
    }

    /// Retry affordance of the error state; re-issues all five reads.
    pub async fn retry(&self) -> ViewStatus {
        self.load().await
    }

    /// Dismisses an alert.
    ///
    /// On success exactly the alert with `alert_id` is removed from view state.
    /// On failure state is unchanged. Either way a notification is queued and returned.
    pub async fn dismiss_alert(&self, alert_id: AlertId) -> Notification {
        let result = self.loader.services().alerts.dismiss_alert(alert_id).await;

        let mut state = self.state.lock().await;
        let notification = match result {
            Ok(()) => {
                if let Some(snapshot) = state.snapshot.as_mut() {
                    snapshot.alerts.retain(|a| a.id != alert_id);
                }
                info!(%alert_id, "Alert dismissed");
                Notification::success("Alert dismissed")
            }
            Err(e) => {
                error!(%alert_id, error = %e, "Failed to dismiss alert");
                Notification::error("Failed to dismiss alert")
            }
        };
        state.notify(notification.clone(), self.notification_capacity);
        notification
    }

    /// Completes a task.
    ///
    /// On success every alert linked to `task_id` is removed and one full
    /// reload runs so the stats reflect the change. On failure state is
    /// unchanged and no reload happens.
    pub async fn complete_task(&self, task_id: TaskId) -> Notification {
        let result = self.loader.services().alerts.complete_task(task_id).await;

        let notification = {
            let mut state = self.state.lock().await;
            let notification = match result {
                Ok(()) => {
                    if let Some(snapshot) = state.snapshot.as_mut() {
                        snapshot.alerts.retain(|a| a.task_id != Some(task_id));
                    }
                    info!(%task_id, "Task completed");
                    Notification::success("Task marked as complete")
                }
                Err(e) => {
                    error!(%task_id, error = %e, "Failed to complete task");
                    Notification::error("Failed to complete task")
                }
            };
            state.notify(notification.clone(), self.notification_capacity);
            notification
        };

        if notification.level == NotificationLevel::Success {
            self.load().await;
        }
        notification
    }

    /// A copy of the current state.
    pub async fn state(&self) -> DashboardState {
        self.state.lock().await.clone()
    }

    /// Current coarse status.
    pub async fn status(&self) -> ViewStatus {
        self.state.lock().await.status()
    }

    /// Drains pending notifications, oldest first.
    pub async fn take_notifications(&self) -> Vec<Notification> {
        self.state.lock().await.notifications.drain(..).collect()
    }

    /// Renders the current state as a page model.
    pub async fn page(&self, now: DateTime<Utc>) -> DashboardPage {
        DashboardPage::render(&*self.state.lock().await, now)
    }
}
