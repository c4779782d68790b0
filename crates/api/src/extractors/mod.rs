//! Request extractors.

pub mod staff_auth;

pub use staff_auth::{load_staff, StaffAuth};
