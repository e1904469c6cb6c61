//! Features layer - one module per API surface
//!
//! Each feature owns its routes, handlers, DTOs, models and services.

pub mod admin;
pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod reports;
pub mod users;
