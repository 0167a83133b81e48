//! In-process CRM backend.
//!
//! Implements every collaborator trait over plain collections. The server uses
//! it with [`CrmData::demo`] when no upstream is configured; tests use it with
//! failure injection to exercise the dashboard's error paths.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use crm_shared::types::{ActivityId, AlertId, ContactId, DealId, TaskId};
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tracing::debug;

use super::error::ServiceError;
use super::service::{
    ActivityService, AlertService, ContactService, DataSource, DealService, TaskService,
};
use super::types::{
    Activity, ActivityKind, Alert, AlertType, Contact, Deal, DealStage, Task,
};

/// The collections an [`InMemoryCrm`] serves.
#[derive(Debug, Clone, Default)]
pub struct CrmData {
    /// Contacts.
    pub contacts: Vec<Contact>,
    /// Deals.
    pub deals: Vec<Deal>,
    /// Tasks.
    pub tasks: Vec<Task>,
    /// Activity log.
    pub activities: Vec<Activity>,
    /// Active alerts.
    pub alerts: Vec<Alert>,
}

impl CrmData {
    /// A small, self-consistent data set anchored at `now`.
    #[must_use]
    pub fn demo(now: DateTime<Utc>) -> Self {
        let contact = |name: &str, company: &str| Contact {
            id: ContactId::new(),
            name: name.to_string(),
            email: Some(format!(
                "{}@{}.example",
                name.split_whitespace().next().unwrap_or(name).to_lowercase(),
                company.to_lowercase().replace(' ', "")
            )),
            company: Some(company.to_string()),
        };
        let contacts = vec![
            contact("Ada Moreno", "Northwind"),
            contact("Kenji Sato", "Globex"),
            contact("Priya Nair", "Initech"),
            contact("Lukas Berg", "Umbrella Freight"),
        ];

        let deal = |title: &str, value: i64, stage: DealStage, owner: &Contact| Deal {
            id: DealId::new(),
            title: title.to_string(),
            value: Decimal::from(value),
            stage,
            contact_id: Some(owner.id),
        };
        let deals = vec![
            deal("Northwind expansion", 48_000, DealStage::Negotiation, &contacts[0]),
            deal("Globex pilot", 12_500, DealStage::Proposal, &contacts[1]),
            deal("Initech renewal", 30_000, DealStage::Won, &contacts[2]),
            deal("Umbrella fleet", 75_000, DealStage::Lost, &contacts[3]),
            deal("Globex add-on seats", 6_200, DealStage::Open, &contacts[1]),
        ];

        let today = now.date_naive();
        let task = |title: &str, days: i64, completed: bool, owner: &Contact| Task {
            id: TaskId::new(),
            title: title.to_string(),
            completed,
            due_date: Some(today + Duration::days(days)),
            contact_id: Some(owner.id),
        };
        let tasks = vec![
            task("Send revised quote", -2, false, &contacts[0]),
            task("Book onboarding call", 0, false, &contacts[1]),
            task("Collect signed renewal", -10, true, &contacts[2]),
            task("Prepare QBR deck", 5, false, &contacts[2]),
        ];

        let activity = |kind: ActivityKind, description: &str, minutes_ago: i64, who: &Contact| {
            Activity {
                id: ActivityId::new(),
                kind,
                description: description.to_string(),
                timestamp: now - Duration::minutes(minutes_ago),
                contact_id: Some(who.id),
            }
        };
        let activities = vec![
            activity(ActivityKind::Call, "Discovery call with Kenji", 35, &contacts[1]),
            activity(ActivityKind::Email, "Sent proposal to Globex", 180, &contacts[1]),
            activity(ActivityKind::Meeting, "Negotiation with Northwind", 1_500, &contacts[0]),
            activity(ActivityKind::Note, "Initech signed renewal", 4_400, &contacts[2]),
            activity(ActivityKind::Email, "Umbrella declined offer", 9_000, &contacts[3]),
        ];

        let alerts = vec![
            Alert {
                id: AlertId::new(),
                alert_type: AlertType::OverdueTask,
                message: Some(format!("\"{}\" is overdue", tasks[0].title)),
                task_id: Some(tasks[0].id),
                contact_id: tasks[0].contact_id,
                due_date: tasks[0].due_date,
            },
            Alert {
                id: AlertId::new(),
                alert_type: AlertType::DueToday,
                message: Some(format!("\"{}\" is due today", tasks[1].title)),
                task_id: Some(tasks[1].id),
                contact_id: tasks[1].contact_id,
                due_date: tasks[1].due_date,
            },
            Alert {
                id: AlertId::new(),
                alert_type: AlertType::FollowUpDue,
                message: Some(format!("Follow up with {}", contacts[3].name)),
                task_id: None,
                contact_id: Some(contacts[3].id),
                due_date: Some(today),
            },
        ];

        Self {
            contacts,
            deals,
            tasks,
            activities,
            alerts,
        }
    }
}

/// Collaborator backend holding CRM data in memory.
#[derive(Debug, Default)]
pub struct InMemoryCrm {
    data: RwLock<CrmData>,
    failing_reads: RwLock<HashSet<DataSource>>,
    failing_writes: RwLock<bool>,
    reads: AtomicUsize,
}

impl InMemoryCrm {
    /// Creates a backend serving `data`.
    #[must_use]
    pub fn new(data: CrmData) -> Self {
        Self {
            data: RwLock::new(data),
            ..Self::default()
        }
    }

    /// Makes reads of `source` fail until [`InMemoryCrm::recover`] is called.
    pub async fn fail_reads(&self, source: DataSource) {
        self.failing_reads.write().await.insert(source);
    }

    /// Makes `dismiss_alert` and `complete_task` fail, or succeed again.
    pub async fn fail_writes(&self, failing: bool) {
        *self.failing_writes.write().await = failing;
    }

    /// Clears all injected failures.
    pub async fn recover(&self) {
        self.failing_reads.write().await.clear();
        *self.failing_writes.write().await = false;
    }

    /// Number of collection reads served or refused so far.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Snapshot of the current data.
    pub async fn data(&self) -> CrmData {
        self.data.read().await.clone()
    }

    async fn read<T: Clone>(
        &self,
        source: DataSource,
        select: impl FnOnce(&CrmData) -> &Vec<T>,
    ) -> Result<Vec<T>, ServiceError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.failing_reads.read().await.contains(&source) {
            return Err(ServiceError::Transport(format!("{source} unavailable")));
        }
        Ok(select(&*self.data.read().await).clone())
    }

    async fn check_writes(&self) -> Result<(), ServiceError> {
        if *self.failing_writes.read().await {
            return Err(ServiceError::Transport("alert service unavailable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ContactService for InMemoryCrm {
    async fn get_all(&self) -> Result<Vec<Contact>, ServiceError> {
        self.read(DataSource::Contacts, |d| &d.contacts).await
    }
}

#[async_trait]
impl DealService for InMemoryCrm {
    async fn get_all(&self) -> Result<Vec<Deal>, ServiceError> {
        self.read(DataSource::Deals, |d| &d.deals).await
    }
}

#[async_trait]
impl TaskService for InMemoryCrm {
    async fn get_all(&self) -> Result<Vec<Task>, ServiceError> {
        self.read(DataSource::Tasks, |d| &d.tasks).await
    }
}

#[async_trait]
impl ActivityService for InMemoryCrm {
    async fn get_all(&self) -> Result<Vec<Activity>, ServiceError> {
        self.read(DataSource::Activities, |d| &d.activities).await
    }
}

#[async_trait]
impl AlertService for InMemoryCrm {
    async fn get_all(&self) -> Result<Vec<Alert>, ServiceError> {
        self.read(DataSource::Alerts, |d| &d.alerts).await
    }

    async fn dismiss_alert(&self, alert_id: AlertId) -> Result<(), ServiceError> {
        self.check_writes().await?;
        let mut data = self.data.write().await;
        let before = data.alerts.len();
        data.alerts.retain(|a| a.id != alert_id);
        if data.alerts.len() == before {
            return Err(ServiceError::NotFound(format!("alert {alert_id}")));
        }
        debug!(%alert_id, "Alert dismissed");
        Ok(())
    }

    async fn complete_task(&self, task_id: TaskId) -> Result<(), ServiceError> {
        self.check_writes().await?;
        let mut data = self.data.write().await;
        let task = data
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| ServiceError::NotFound(format!("task {task_id}")))?;
        task.completed = true;
        let description = format!("Completed task: {}", task.title);
        let contact_id = task.contact_id;

        data.alerts.retain(|a| a.task_id != Some(task_id));
        data.activities.push(Activity {
            id: ActivityId::new(),
            kind: ActivityKind::Note,
            description,
            timestamp: Utc::now(),
            contact_id,
        });
        debug!(%task_id, "Task completed");
        Ok(())
    }
}
