//! Attendance record domain models.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::schedule::ScheduleStatus;

/// Realized outcome of a schedule entry. At most one exists per entry; it is
/// created on the first terminal transition and updated on re-transitions.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AttendanceResponse {
    pub id: Uuid,
    pub schedule_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_id: Option<Uuid>,
    pub status: ScheduleStatus,
    pub attended_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}
