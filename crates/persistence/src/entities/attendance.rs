//! Attendance record entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::entities::ScheduleStatusDb;

/// Database row mapping for the attendance_records table.
///
/// `schedule_id` is unique; writes go through an upsert so repeated terminal
/// transitions update the same row.
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceEntity {
    pub id: Uuid,
    pub schedule_id: Uuid,
    pub member_id: Option<Uuid>,
    pub status: ScheduleStatusDb,
    pub attended_at: DateTime<Utc>,
    pub memo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
