//! Aggregate statistics derived from the collaborator collections.

use crm_shared::types::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::LoadError;
use crate::crm::{Activity, Contact, Deal, Task};

/// Headline numbers shown on the dashboard's stat cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Number of contacts.
    pub total_contacts: usize,
    /// Number of deals not in `Won` or `Lost`.
    pub active_deals: usize,
    /// Sum of the values of active deals.
    pub pipeline_value: Money,
    /// Number of completed tasks.
    pub completed_tasks: usize,
    /// Number of tasks.
    pub total_tasks: usize,
}

impl DashboardStats {
    /// Computes the stats from full collections.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::PipelineOverflow`] if the active deal values
    /// do not fit in a `Decimal`.
    pub fn compute(
        contacts: &[Contact],
        deals: &[Deal],
        tasks: &[Task],
    ) -> Result<Self, LoadError> {
        let pipeline = pipeline_value(deals).ok_or(LoadError::PipelineOverflow)?;
        Ok(Self {
            total_contacts: contacts.len(),
            active_deals: deals.iter().filter(|d| d.is_active()).count(),
            pipeline_value: Money::usd(pipeline),
            completed_tasks: completed_task_count(tasks),
            total_tasks: tasks.len(),
        })
    }
}

/// Sum of the values of deals still in the pipeline, `None` on overflow.
#[must_use]
pub fn pipeline_value(deals: &[Deal]) -> Option<Decimal> {
    deals
        .iter()
        .filter(|d| d.is_active())
        .try_fold(Decimal::ZERO, |total, d| total.checked_add(d.value))
}

/// Number of tasks with `completed` set.
#[must_use]
pub fn completed_task_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| t.completed).count()
}

/// The `limit` most recent activities, newest first.
///
/// The sort is stable, so activities sharing a timestamp keep their service order.
#[must_use]
pub fn recent_activities(mut activities: Vec<Activity>, limit: usize) -> Vec<Activity> {
    activities.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    activities.truncate(limit);
    activities
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crm::{ActivityKind, DealStage};
    use chrono::{Duration, TimeZone, Utc};
    use crm_shared::types::{ActivityId, ContactId, DealId, TaskId};
    use rust_decimal_macros::dec;

    fn deal(value: Decimal, stage: DealStage) -> Deal {
        Deal {
            id: DealId::new(),
            title: String::new(),
            value,
            stage,
            contact_id: None,
        }
    }

    fn task(completed: bool) -> Task {
        Task {
            id: TaskId::new(),
            title: String::new(),
            completed,
            due_date: None,
            contact_id: None,
        }
    }

    fn activity(description: &str, minutes: i64) -> Activity {
        Activity {
            id: ActivityId::new(),
            kind: ActivityKind::Call,
            description: description.to_string(),
            timestamp: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
                + Duration::minutes(minutes),
            contact_id: None,
        }
    }

    #[test]
    fn test_pipeline_excludes_won_and_lost() {
        let deals = vec![
            deal(dec!(100), DealStage::Open),
            deal(dec!(50), DealStage::Won),
            deal(dec!(30), DealStage::Negotiation),
        ];

        let stats = DashboardStats::compute(&[], &deals, &[]).unwrap();

        assert_eq!(stats.active_deals, 2);
        assert_eq!(stats.pipeline_value, Money::usd(dec!(130)));
    }

    #[test]
    fn test_pipeline_with_every_closed_stage() {
        let deals = vec![
            deal(dec!(10), DealStage::Won),
            deal(dec!(20), DealStage::Lost),
            deal(dec!(40.25), DealStage::Open),
            deal(dec!(80.50), DealStage::Negotiation),
        ];

        assert_eq!(pipeline_value(&deals), Some(dec!(120.75)));
        assert_eq!(
            DashboardStats::compute(&[], &deals, &[]).unwrap().active_deals,
            2
        );
    }

    #[test]
    fn test_empty_collections() {
        let stats = DashboardStats::compute(&[], &[], &[]).unwrap();
        assert_eq!(stats.active_deals, 0);
        assert_eq!(stats.pipeline_value, Money::usd(Decimal::ZERO));
        assert_eq!(stats.completed_tasks, 0);
        assert_eq!(stats.total_tasks, 0);
    }

    #[test]
    fn test_completed_task_count() {
        let tasks = vec![task(true), task(false), task(true)];
        assert_eq!(completed_task_count(&tasks), 2);

        let stats = DashboardStats::compute(&[], &[], &tasks).unwrap();
        assert_eq!(stats.completed_tasks, 2);
        assert_eq!(stats.total_tasks, 3);
    }

    #[test]
    fn test_total_contacts() {
        let contacts = vec![
            Contact {
                id: ContactId::new(),
                name: "Ada".into(),
                email: None,
                company: None,
            };
            3
        ];
        assert_eq!(DashboardStats::compute(&contacts, &[], &[]).unwrap().total_contacts, 3);
    }

    #[test]
    fn test_pipeline_overflow_is_an_error() {
        let deals = vec![
            deal(Decimal::MAX, DealStage::Open),
            deal(Decimal::MAX, DealStage::Negotiation),
        ];

        assert_eq!(pipeline_value(&deals), None);
        assert_eq!(
            DashboardStats::compute(&[], &deals, &[]),
            Err(LoadError::PipelineOverflow)
        );
    }

    #[test]
    fn test_closed_deals_do_not_overflow_pipeline() {
        let deals = vec![
            deal(Decimal::MAX, DealStage::Won),
            deal(Decimal::MAX, DealStage::Open),
        ];

        assert_eq!(pipeline_value(&deals), Some(Decimal::MAX));
    }

    #[test]
    fn test_recent_activities_newest_first_and_capped() {
        let activities: Vec<_> = (0..15).map(|i| activity(&format!("a{i}"), i)).collect();

        let recent = recent_activities(activities, 10);

        let names: Vec<_> = recent.iter().map(|a| a.description.as_str()).collect();
        assert_eq!(
            names,
            ["a14", "a13", "a12", "a11", "a10", "a9", "a8", "a7", "a6", "a5"]
        );
    }

    #[test]
    fn test_recent_activities_fewer_than_limit() {
        let activities = vec![activity("old", 1), activity("new", 5), activity("mid", 3)];

        let recent = recent_activities(activities, 10);

        let names: Vec<_> = recent.iter().map(|a| a.description.as_str()).collect();
        assert_eq!(names, ["new", "mid", "old"]);
    }

    #[test]
    fn test_recent_activities_ties_keep_service_order() {
        let activities = vec![activity("first", 1), activity("second", 1), activity("newest", 2)];

        let recent = recent_activities(activities, 10);

        let names: Vec<_> = recent.iter().map(|a| a.description.as_str()).collect();
        assert_eq!(names, ["newest", "first", "second"]);
    }
}
