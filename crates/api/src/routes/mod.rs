//! HTTP route handlers.

pub mod health;
pub mod memberships;
pub mod reports;
pub mod schedules;
