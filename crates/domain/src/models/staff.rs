//! Staff identity and role models.
//!
//! Authentication is external; the staff row only carries the scope
//! (gym/company) and privilege level used by capability checks.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Privilege level of a staff member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    /// Company owner: full access across the company's gyms.
    Owner,
    /// Gym manager: reviews reports and manages memberships for one gym.
    Manager,
    /// Trainer: owns schedule entries and monthly submissions.
    Trainer,
}

impl std::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StaffRole::Owner => write!(f, "owner"),
            StaffRole::Manager => write!(f, "manager"),
            StaffRole::Trainer => write!(f, "trainer"),
        }
    }
}

/// A staff member with their authorization scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Staff {
    pub id: Uuid,
    pub gym_id: Uuid,
    pub company_id: Uuid,
    pub display_name: String,
    pub role: StaffRole,
    pub is_active: bool,
}
