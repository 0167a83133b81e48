//! Collaborator service contracts.
//!
//! Each trait is object-safe so the dashboard can hold `Arc<dyn ...>` handles
//! and swap the HTTP client for in-memory or mock implementations.

use std::sync::Arc;

use async_trait::async_trait;
use crm_shared::types::{AlertId, TaskId};
use serde::{Deserialize, Serialize};

#[cfg(test)]
use mockall::automock;

use super::error::ServiceError;
use super::types::{Activity, Alert, Contact, Deal, Task};

/// Reads contacts.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ContactService: Send + Sync {
    /// Returns every contact.
    async fn get_all(&self) -> Result<Vec<Contact>, ServiceError>;
}

/// Reads deals.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DealService: Send + Sync {
    /// Returns every deal, in any stage.
    async fn get_all(&self) -> Result<Vec<Deal>, ServiceError>;
}

/// Reads tasks.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TaskService: Send + Sync {
    /// Returns every task, completed or not.
    async fn get_all(&self) -> Result<Vec<Task>, ServiceError>;
}

/// Reads the activity log.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ActivityService: Send + Sync {
    /// Returns every activity, in no particular order.
    async fn get_all(&self) -> Result<Vec<Activity>, ServiceError>;
}

/// Reads and resolves alerts. Also owns completion of task-linked alerts.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AlertService: Send + Sync {
    /// Returns every active alert.
    async fn get_all(&self) -> Result<Vec<Alert>, ServiceError>;

    /// Deletes an alert.
    ///
    /// Fails with [`ServiceError::NotFound`] if the alert does not exist.
    async fn dismiss_alert(&self, alert_id: AlertId) -> Result<(), ServiceError>;

    /// Marks a task as completed and resolves the alerts linked to it.
    ///
    /// Fails with [`ServiceError::NotFound`] if the task does not exist.
    async fn complete_task(&self, task_id: TaskId) -> Result<(), ServiceError>;
}

/// The collection a dashboard read targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Contact service.
    Contacts,
    /// Deal service.
    Deals,
    /// Task service.
    Tasks,
    /// Activity service.
    Activities,
    /// Alert service.
    Alerts,
}

impl DataSource {
    /// All sources, in fan-out order.
    pub const ALL: [Self; 5] = [
        Self::Contacts,
        Self::Deals,
        Self::Tasks,
        Self::Activities,
        Self::Alerts,
    ];

    /// Collection name as used in upstream paths and log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Contacts => "contacts",
            Self::Deals => "deals",
            Self::Tasks => "tasks",
            Self::Activities => "activities",
            Self::Alerts => "alerts",
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handles to the five collaborators the dashboard reads from.
#[derive(Clone)]
pub struct CrmServices {
    /// Contact service.
    pub contacts: Arc<dyn ContactService>,
    /// Deal service.
    pub deals: Arc<dyn DealService>,
    /// Task service.
    pub tasks: Arc<dyn TaskService>,
    /// Activity service.
    pub activities: Arc<dyn ActivityService>,
    /// Alert service.
    pub alerts: Arc<dyn AlertService>,
}

impl CrmServices {
    /// Uses one backend for all five collaborators.
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: ContactService + DealService + TaskService + ActivityService + AlertService + 'static,
    {
        Self {
            contacts: backend.clone(),
            deals: backend.clone(),
            tasks: backend.clone(),
            activities: backend.clone(),
            alerts: backend,
        }
    }
}

impl std::fmt::Debug for CrmServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrmServices").finish_non_exhaustive()
    }
}
