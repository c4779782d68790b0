//! Membership entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use domain::models::MembershipStatus;
use sqlx::FromRow;
use uuid::Uuid;

use crate::entities::SessionTypeDb;

/// Database enum for membership status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "membership_status", rename_all = "lowercase")]
pub enum MembershipStatusDb {
    Active,
    Expired,
    Paused,
}

impl From<MembershipStatusDb> for MembershipStatus {
    fn from(status: MembershipStatusDb) -> Self {
        match status {
            MembershipStatusDb::Active => MembershipStatus::Active,
            MembershipStatusDb::Expired => MembershipStatus::Expired,
            MembershipStatusDb::Paused => MembershipStatus::Paused,
        }
    }
}

/// Database row mapping for the memberships table.
#[derive(Debug, Clone, FromRow)]
pub struct MembershipEntity {
    pub id: Uuid,
    pub member_id: Uuid,
    pub gym_id: Uuid,
    pub name: String,
    pub session_type: SessionTypeDb,
    pub total_sessions: i32,
    pub used_sessions: i32,
    pub status: MembershipStatusDb,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
