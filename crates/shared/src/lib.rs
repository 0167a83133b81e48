//! Shared types, errors, and configuration for the CRM dashboard.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for CRM entities (contacts, deals, tasks, activities, alerts)
//! - Money type with decimal precision and display formatting
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::AppError;
