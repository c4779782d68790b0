//! Shared utilities and common types for the GymDesk backend.
//!
//! This crate provides common functionality used across all other crates:
//! - JWT validation for staff identity tokens
//! - Common validation logic (year-month, session times)

pub mod jwt;
pub mod validation;
