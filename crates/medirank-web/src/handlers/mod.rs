//! HTTP handlers for all web routes.

pub mod api;
pub mod diagnose;
pub mod health;
pub mod layout;
pub mod report;
