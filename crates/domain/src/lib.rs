//! Domain layer for the GymDesk backend.
//!
//! This crate contains:
//! - Domain models (Membership, ScheduleEntry, MonthlyReport)
//! - Business logic services (credit policy, report aggregation, access)
//! - Domain error types

pub mod models;
pub mod services;
