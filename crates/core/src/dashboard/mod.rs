//! Dashboard read-model and view state.
//!
//! This module provides:
//! - Aggregate statistics over contacts, deals, and tasks
//! - The five-way fan-out loader
//! - The stateful dashboard view with its two user actions
//! - The display-ready page model

pub mod error;
pub mod loader;
pub mod page;
pub mod stats;
pub mod types;
pub mod view;


pub use error::LoadError;
pub use loader::DashboardLoader;
pub use page::{ActivityItem, AlertBanner, DashboardPage, ErrorPanel, StatCard};
pub use stats::{DashboardStats, completed_task_count, pipeline_value, recent_activities};
pub use types::{
    DashboardSnapshot, DashboardState, Notification, NotificationLevel, ViewStatus,
};
pub use view::{DashboardView, LOAD_ERROR_MESSAGE};
