//! Dashboard view-model types.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::LoadError;
use super::stats::{DashboardStats, recent_activities};
use crate::crm::{Activity, Alert, Contact, Deal, Task};

/// Everything a successful load produces, applied to the view in one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Aggregate stats.
    pub stats: DashboardStats,
    /// Most recent activities, newest first.
    pub recent_activities: Vec<Activity>,
    /// Alerts, mirrored locally so actions can remove them without a reload.
    pub alerts: Vec<Alert>,
    /// When the snapshot was computed.
    pub loaded_at: DateTime<Utc>,
}

impl DashboardSnapshot {
    /// Reduces the five collections into a snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::PipelineOverflow`] if the pipeline sum overflows.
    pub fn compute(
        contacts: &[Contact],
        deals: &[Deal],
        tasks: &[Task],
        activities: Vec<Activity>,
        alerts: Vec<Alert>,
        activity_limit: usize,
        loaded_at: DateTime<Utc>,
    ) -> Result<Self, LoadError> {
        Ok(Self {
            stats: DashboardStats::compute(contacts, deals, tasks)?,
            recent_activities: recent_activities(activities, activity_limit),
            alerts,
            loaded_at,
        })
    }
}

/// Coarse state of the dashboard view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewStatus {
    /// A load is in flight, or nothing has loaded yet.
    Loading,
    /// The latest load succeeded.
    Ready,
    /// The latest load failed.
    Error,
}

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    /// The action succeeded.
    Success,
    /// The action failed.
    Error,
}

/// A transient toast shown after a user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Severity.
    pub level: NotificationLevel,
    /// Message.
    pub message: String,
    /// When it was raised.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// A success notification.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    /// An error notification.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}

/// Mutable state behind the dashboard view.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    /// Set while a load is in flight.
    pub loading: bool,
    /// Last successfully loaded snapshot, patched by user actions.
    pub snapshot: Option<DashboardSnapshot>,
    /// Generic error message of the latest failed load.
    pub error: Option<String>,
    /// Pending notifications, oldest first.
    pub notifications: VecDeque<Notification>,
    /// Ticket of the most recently started load.
    pub(crate) generation: u64,
}

impl DashboardState {
    /// Derives the coarse view status.
    #[must_use]
    pub fn status(&self) -> ViewStatus {
        if self.loading {
            ViewStatus::Loading
        } else if self.error.is_some() {
            ViewStatus::Error
        } else if self.snapshot.is_some() {
            ViewStatus::Ready
        } else {
            ViewStatus::Loading
        }
    }

    /// Queues a notification, dropping the oldest beyond `capacity`.
    pub(crate) fn notify(&mut self, notification: Notification, capacity: usize) {
        self.notifications.push_back(notification);
        while self.notifications.len() > capacity.max(1) {
            self.notifications.pop_front();
        }
    }

    /// Alerts currently shown, empty before the first load.
    #[must_use]
    pub fn alerts(&self) -> &[Alert] {
        self.snapshot.as_ref().map_or(&[], |s| s.alerts.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        let mut state = DashboardState::default();
        assert_eq!(state.status(), ViewStatus::Loading);

        state.error = Some("failed".into());
        assert_eq!(state.status(), ViewStatus::Error);

        state.loading = true;
        assert_eq!(state.status(), ViewStatus::Loading);
    }

    #[test]
    fn test_notify_drops_oldest_beyond_capacity() {
        let mut state = DashboardState::default();
        for i in 0..5 {
            state.notify(Notification::success(format!("n{i}")), 3);
        }

        let messages: Vec<_> = state.notifications.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, ["n2", "n3", "n4"]);
    }
}
