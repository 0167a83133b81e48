//! CRM entity types as served by the collaborator services.
//!
//! Field names follow the services' camelCase JSON.

use chrono::{DateTime, NaiveDate, Utc};
use crm_shared::types::{ActivityId, AlertId, ContactId, DealId, TaskId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A person or company the sales team tracks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Contact ID.
    pub id: ContactId,
    /// Display name.
    pub name: String,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Company name.
    #[serde(default)]
    pub company: Option<String>,
}

/// Pipeline stage of a deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DealStage {
    /// Unqualified lead.
    Lead,
    /// Open opportunity.
    Open,
    /// Qualified opportunity.
    Qualified,
    /// Proposal sent.
    Proposal,
    /// In negotiation.
    Negotiation,
    /// Closed and won.
    Won,
    /// Closed and lost.
    Lost,
    /// A stage this dashboard does not know about.
    #[serde(other)]
    Other,
}

impl DealStage {
    /// Returns true for the closed stages, `Won` and `Lost`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// A sales opportunity with a monetary value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    /// Deal ID.
    pub id: DealId,
    /// Deal title.
    #[serde(default)]
    pub title: String,
    /// Deal value in USD.
    pub value: Decimal,
    /// Pipeline stage.
    pub stage: DealStage,
    /// Primary contact.
    #[serde(default)]
    pub contact_id: Option<ContactId>,
}

impl Deal {
    /// Returns true if the deal is still in the pipeline.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.stage.is_terminal()
    }
}

/// A to-do item, usually tied to a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Task ID.
    pub id: TaskId,
    /// Task title.
    #[serde(default)]
    pub title: String,
    /// Whether the task is done.
    pub completed: bool,
    /// Due date.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Related contact.
    #[serde(default)]
    pub contact_id: Option<ContactId>,
}

/// Kind of a logged activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// Phone call.
    Call,
    /// Email.
    Email,
    /// Meeting.
    Meeting,
    /// Free-form note.
    Note,
    /// Unrecognized kind.
    #[serde(other)]
    Other,
}

/// An entry in the activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Activity ID.
    pub id: ActivityId,
    /// Activity kind.
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// When the activity happened.
    pub timestamp: DateTime<Utc>,
    /// Related contact.
    #[serde(default)]
    pub contact_id: Option<ContactId>,
}

/// Reason an alert was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    /// A task is past its due date.
    #[serde(alias = "overdue-task")]
    OverdueTask,
    /// A contact follow-up is due.
    #[serde(alias = "follow-up-due")]
    FollowUpDue,
    /// A task is due today.
    #[serde(alias = "due-today")]
    DueToday,
    /// Unrecognized alert type.
    #[serde(other)]
    Other,
}

/// A system-generated reminder tied to a task or a contact follow-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    /// Alert ID.
    #[serde(alias = "Id")]
    pub id: AlertId,
    /// Alert type.
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    /// Human-readable message.
    #[serde(default)]
    pub message: Option<String>,
    /// Task this alert is about, if any.
    #[serde(default)]
    pub task_id: Option<TaskId>,
    /// Contact this alert is about, if any.
    #[serde(default)]
    pub contact_id: Option<ContactId>,
    /// Due date the alert refers to.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}
