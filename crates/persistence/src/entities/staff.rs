//! Staff entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{Staff, StaffRole};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for staff role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "staff_role", rename_all = "lowercase")]
pub enum StaffRoleDb {
    Owner,
    Manager,
    Trainer,
}

impl From<StaffRoleDb> for StaffRole {
    fn from(role: StaffRoleDb) -> Self {
        match role {
            StaffRoleDb::Owner => StaffRole::Owner,
            StaffRoleDb::Manager => StaffRole::Manager,
            StaffRoleDb::Trainer => StaffRole::Trainer,
        }
    }
}

/// Database row mapping for the staff table.
#[derive(Debug, Clone, FromRow)]
pub struct StaffEntity {
    pub id: Uuid,
    pub gym_id: Uuid,
    pub company_id: Uuid,
    pub display_name: String,
    pub role: StaffRoleDb,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<StaffEntity> for Staff {
    fn from(e: StaffEntity) -> Self {
        Staff {
            id: e.id,
            gym_id: e.gym_id,
            company_id: e.company_id,
            display_name: e.display_name,
            role: e.role.into(),
            is_active: e.is_active,
        }
    }
}
