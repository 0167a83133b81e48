//! Five-way fan-out loader.
//!
//! All five reads are issued concurrently and every one runs to completion.
//! The result is all-or-nothing: the first failure in fan-out order is
//! reported and nothing is computed.

use std::future::Future;

use chrono::Utc;
use tracing::debug;

use super::error::LoadError;
use super::types::DashboardSnapshot;
use crate::crm::{CrmServices, DataSource, ServiceError};

/// Default size of the recent activity list.
pub const DEFAULT_RECENT_ACTIVITY_LIMIT: usize = 10;

/// Reads the five collaborator collections and reduces them into a snapshot.
#[derive(Debug, Clone)]
pub struct DashboardLoader {
    services: CrmServices,
    recent_activity_limit: usize,
}

impl DashboardLoader {
    /// Creates a loader showing the default number of recent activities.
    #[must_use]
    pub fn new(services: CrmServices) -> Self {
        Self::with_activity_limit(services, DEFAULT_RECENT_ACTIVITY_LIMIT)
    }

    /// Creates a loader showing `limit` recent activities.
    #[must_use]
    pub fn with_activity_limit(services: CrmServices, limit: usize) -> Self {
        Self {
            services,
            recent_activity_limit: limit,
        }
    }

    /// The collaborators this loader reads from.
    #[must_use]
    pub fn services(&self) -> &CrmServices {
        &self.services
    }

    /// Fetches all five collections concurrently and computes a snapshot.
    ///
    /// # Errors
    ///
    /// Returns the first read failure in fan-out order, tagged with the
    /// collection it came from, or [`LoadError::PipelineOverflow`].
    pub async fn load(&self) -> Result<DashboardSnapshot, LoadError> {
        let (contacts, deals, tasks, activities, alerts) = tokio::join!(
            tagged(DataSource::Contacts, self.services.contacts.get_all()),
            tagged(DataSource::Deals, self.services.deals.get_all()),
            tagged(DataSource::Tasks, self.services.tasks.get_all()),
            tagged(DataSource::Activities, self.services.activities.get_all()),
            tagged(DataSource::Alerts, self.services.alerts.get_all()),
        );
        let (contacts, deals, tasks, activities, alerts) =
            (contacts?, deals?, tasks?, activities?, alerts?);

        debug!(
            contacts = contacts.len(),
            deals = deals.len(),
            tasks = tasks.len(),
            activities = activities.len(),
            alerts = alerts.len(),
            "Dashboard collections fetched"
        );

        DashboardSnapshot::compute(
            &contacts,
            &deals,
            &tasks,
            activities,
            alerts,
            self.recent_activity_limit,
            Utc::now(),
        )
    }
}

async fn tagged<T>(
    source: DataSource,
    read: impl Future<Output = Result<T, ServiceError>>,
) -> Result<T, LoadError> {
    read.await.map_err(|error| LoadError::read(source, error))
}
