//! CRM entities and collaborator service contracts.
//!
//! The dashboard owns none of these entities. They are read from the contact,
//! deal, task, activity and alert services, and all mutation goes through
//! [`AlertService`].

pub mod error;
pub mod memory;
pub mod service;
pub mod types;

pub use error::ServiceError;
pub use memory::{CrmData, InMemoryCrm};
pub use service::{
    ActivityService, AlertService, ContactService, CrmServices, DataSource, DealService,
    TaskService,
};
pub use types::{Activity, ActivityKind, Alert, AlertType, Contact, Deal, DealStage, Task};
