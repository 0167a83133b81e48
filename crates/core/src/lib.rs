//! Core dashboard logic for the CRM.
//!
//! This crate contains the dashboard read-model with ZERO web or HTTP dependencies.
//! Collaborator services are consumed through traits; transports live elsewhere.
//!
//! # Modules
//!
//! - `crm` - CRM entities and the collaborator service contracts
//! - `dashboard` - Statistics, the fan-out loader, view state, and the page model

pub mod crm;
pub mod dashboard;
