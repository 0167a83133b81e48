//! HTTP adapter for the CRM collaborator services.
//!
//! This crate provides [`HttpCrmClient`], which implements every collaborator
//! trait from `crm-core` against a JSON REST upstream:
//!
//! | Operation      | Request                                      |
//! |----------------|----------------------------------------------|
//! | contacts       | `GET {base}/contacts`                        |
//! | deals          | `GET {base}/deals`                           |
//! | tasks          | `GET {base}/tasks`                           |
//! | activities     | `GET {base}/activities`                      |
//! | alerts         | `GET {base}/alerts`                          |
//! | dismiss alert  | `DELETE {base}/alerts/{alert_id}`            |
//! | complete task  | `POST {base}/alerts/tasks/{task_id}/complete`|

pub mod client;
pub mod error;

pub use client::HttpCrmClient;
pub use error::ClientError;
