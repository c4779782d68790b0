//! Schedule entry entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{ScheduleStatus, SessionType, WorkClassification};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for schedule status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "schedule_status", rename_all = "snake_case")]
pub enum ScheduleStatusDb {
    Reserved,
    Completed,
    NoShow,
    NoShowDeducted,
    Cancelled,
    Service,
}

impl From<ScheduleStatus> for ScheduleStatusDb {
    fn from(status: ScheduleStatus) -> Self {
        match status {
            ScheduleStatus::Reserved => ScheduleStatusDb::Reserved,
            ScheduleStatus::Completed => ScheduleStatusDb::Completed,
            ScheduleStatus::NoShow => ScheduleStatusDb::NoShow,
            ScheduleStatus::NoShowDeducted => ScheduleStatusDb::NoShowDeducted,
            ScheduleStatus::Cancelled => ScheduleStatusDb::Cancelled,
            ScheduleStatus::Service => ScheduleStatusDb::Service,
        }
    }
}

impl From<ScheduleStatusDb> for ScheduleStatus {
    fn from(status: ScheduleStatusDb) -> Self {
        match status {
            ScheduleStatusDb::Reserved => ScheduleStatus::Reserved,
            ScheduleStatusDb::Completed => ScheduleStatus::Completed,
            ScheduleStatusDb::NoShow => ScheduleStatus::NoShow,
            ScheduleStatusDb::NoShowDeducted => ScheduleStatus::NoShowDeducted,
            ScheduleStatusDb::Cancelled => ScheduleStatus::Cancelled,
            ScheduleStatusDb::Service => ScheduleStatus::Service,
        }
    }
}

/// Database enum for session type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "session_type", rename_all = "lowercase")]
pub enum SessionTypeDb {
    Pt,
    Ot,
    Personal,
}

impl From<SessionType> for SessionTypeDb {
    fn from(t: SessionType) -> Self {
        match t {
            SessionType::Pt => SessionTypeDb::Pt,
            SessionType::Ot => SessionTypeDb::Ot,
            SessionType::Personal => SessionTypeDb::Personal,
        }
    }
}

impl From<SessionTypeDb> for SessionType {
    fn from(t: SessionTypeDb) -> Self {
        match t {
            SessionTypeDb::Pt => SessionType::Pt,
            SessionTypeDb::Ot => SessionType::Ot,
            SessionTypeDb::Personal => SessionType::Personal,
        }
    }
}

/// Database enum for work classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "work_classification", rename_all = "lowercase")]
pub enum WorkClassificationDb {
    Inside,
    Outside,
    Weekend,
    Holiday,
}

impl From<WorkClassification> for WorkClassificationDb {
    fn from(c: WorkClassification) -> Self {
        match c {
            WorkClassification::Inside => WorkClassificationDb::Inside,
            WorkClassification::Outside => WorkClassificationDb::Outside,
            WorkClassification::Weekend => WorkClassificationDb::Weekend,
            WorkClassification::Holiday => WorkClassificationDb::Holiday,
        }
    }
}

impl From<WorkClassificationDb> for WorkClassification {
    fn from(c: WorkClassificationDb) -> Self {
        match c {
            WorkClassificationDb::Inside => WorkClassification::Inside,
            WorkClassificationDb::Outside => WorkClassification::Outside,
            WorkClassificationDb::Weekend => WorkClassification::Weekend,
            WorkClassificationDb::Holiday => WorkClassification::Holiday,
        }
    }
}

/// Database row mapping for the schedule_entries table.
#[derive(Debug, Clone, FromRow)]
pub struct ScheduleEntity {
    pub id: Uuid,
    pub staff_id: Uuid,
    pub gym_id: Uuid,
    pub member_id: Option<Uuid>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub session_type: SessionTypeDb,
    pub classification: WorkClassificationDb,
    pub status: ScheduleStatusDb,
    pub is_locked: bool,
    pub report_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Minimal projection used when folding a month into report statistics.
#[derive(Debug, Clone, FromRow)]
pub struct ScheduleFactsRow {
    pub status: ScheduleStatusDb,
    pub session_type: SessionTypeDb,
    pub classification: WorkClassificationDb,
}
