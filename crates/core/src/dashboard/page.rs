//! Display-ready page model.
//!
//! Turns view state into stat cards, an alert banner, an activity list, and
//! the loading/empty/error placeholders. Icon names are plain identifiers
//! resolved by whatever front end draws the page.

use chrono::{DateTime, Utc};
use crm_shared::types::{ActivityId, AlertId, TaskId};
use serde::Serialize;

use super::stats::DashboardStats;
use super::types::{DashboardState, ViewStatus};
use crate::crm::{Activity, ActivityKind, Alert, AlertType};

/// Shown under the activity heading when there is nothing to list.
pub const EMPTY_ACTIVITY_MESSAGE: &str = "No recent activity";

/// Label of the retry button in the error panel.
pub const RETRY_LABEL: &str = "Try again";

/// The rendered dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardPage {
    /// Coarse status; decides which placeholder is shown.
    pub status: ViewStatus,
    /// Headline stat cards.
    pub stat_cards: Vec<StatCard>,
    /// Alert banner entries.
    pub alerts: Vec<AlertBanner>,
    /// Recent activity list.
    pub recent_activity: Vec<ActivityItem>,
    /// Set when ready with no activity to show.
    pub empty_activity_message: Option<String>,
    /// Set in the error state.
    pub error: Option<ErrorPanel>,
    /// When the shown data was loaded.
    pub loaded_at: Option<DateTime<Utc>>,
}

/// One headline number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCard {
    /// Stable key for the front end.
    pub key: &'static str,
    /// Label.
    pub label: &'static str,
    /// Formatted value.
    pub value: String,
    /// Icon name.
    pub icon: &'static str,
}

/// One alert in the banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertBanner {
    /// Alert ID, for the dismiss action.
    pub id: AlertId,
    /// Title derived from the alert type.
    pub title: &'static str,
    /// Message from the alert service, or a default for the type.
    pub message: String,
    /// Icon name.
    pub icon: &'static str,
    /// Linked task, for the complete action.
    pub task_id: Option<TaskId>,
    /// Whether the complete-task action is offered.
    pub can_complete_task: bool,
}

/// One entry in the recent activity list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityItem {
    /// Activity ID.
    pub id: ActivityId,
    /// Icon name.
    pub icon: &'static str,
    /// Description.
    pub description: String,
    /// RFC 3339 timestamp.
    pub timestamp: String,
    /// Relative time label, e.g. `3h ago`.
    pub relative_time: String,
}

/// Error placeholder with a retry affordance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPanel {
    /// Generic error message.
    pub message: String,
    /// Retry button label.
    pub retry_label: &'static str,
}

impl DashboardPage {
    /// Renders `state` as seen at `now`.
    #[must_use]
    pub fn render(state: &DashboardState, now: DateTime<Utc>) -> Self {
        let status = state.status();
        let mut page = Self {
            status,
            stat_cards: Vec::new(),
            alerts: Vec::new(),
            recent_activity: Vec::new(),
            empty_activity_message: None,
            error: None,
            loaded_at: None,
        };

        match status {
            ViewStatus::Error => {
                page.error = Some(ErrorPanel {
                    message: state.error.clone().unwrap_or_default(),
                    retry_label: RETRY_LABEL,
                });
            }
            // A reload keeps the last snapshot on screen; the first load has none.
            ViewStatus::Loading | ViewStatus::Ready => {
                if let Some(snapshot) = &state.snapshot {
                    page.stat_cards = stat_cards(&snapshot.stats);
                    page.alerts = snapshot.alerts.iter().map(alert_banner).collect();
                    page.recent_activity = snapshot
                        .recent_activities
                        .iter()
                        .map(|a| activity_item(a, now))
                        .collect();
                    if page.recent_activity.is_empty() {
                        page.empty_activity_message = Some(EMPTY_ACTIVITY_MESSAGE.to_string());
                    }
                    page.loaded_at = Some(snapshot.loaded_at);
                }
            }
        }
        page
    }
}

fn stat_cards(stats: &DashboardStats) -> Vec<StatCard> {
    vec![
        StatCard {
            key: "total_contacts",
            label: "Total Contacts",
            value: stats.total_contacts.to_string(),
            icon: "users",
        },
        StatCard {
            key: "active_deals",
            label: "Active Deals",
            value: stats.active_deals.to_string(),
            icon: "briefcase",
        },
        StatCard {
            key: "pipeline_value",
            label: "Pipeline Value",
            value: stats.pipeline_value.format_whole(),
            icon: "dollar-sign",
        },
        StatCard {
            key: "completed_tasks",
            label: "Completed Tasks",
            value: format!("{} / {}", stats.completed_tasks, stats.total_tasks),
            icon: "check-circle",
        },
    ]
}

fn alert_banner(alert: &Alert) -> AlertBanner {
    let (title, icon, fallback) = match alert.alert_type {
        AlertType::OverdueTask => ("Overdue task", "alert-triangle", "A task is overdue"),
        AlertType::FollowUpDue => ("Follow-up due", "phone", "A follow-up is due"),
        AlertType::DueToday => ("Due today", "clock", "A task is due today"),
        AlertType::Other => ("Reminder", "bell", "You have a reminder"),
    };
    AlertBanner {
        id: alert.id,
        title,
        message: alert
            .message
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string()),
        icon,
        task_id: alert.task_id,
        can_complete_task: alert.task_id.is_some(),
    }
}

fn activity_item(activity: &Activity, now: DateTime<Utc>) -> ActivityItem {
    let icon = match activity.kind {
        ActivityKind::Call => "phone",
        ActivityKind::Email => "mail",
        ActivityKind::Meeting => "calendar",
        ActivityKind::Note => "file-text",
        ActivityKind::Other => "activity",
    };
    ActivityItem {
        id: activity.id,
        icon,
        description: activity.description.clone(),
        timestamp: activity.timestamp.to_rfc3339(),
        relative_time: relative_time(activity.timestamp, now),
    }
}

/// Coarse "time ago" label. Future timestamps read as `just now`.
#[must_use]
pub fn relative_time(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - at).num_seconds();
    match seconds {
        ..60 => "just now".to_string(),
        60..3_600 => format!("{}m ago", seconds / 60),
        3_600..86_400 => format!("{}h ago", seconds / 3_600),
        _ => format!("{}d ago", seconds / 86_400),
    }
}
