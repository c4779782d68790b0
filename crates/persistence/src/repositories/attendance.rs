//! Attendance record repository.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{AttendanceEntity, ScheduleStatusDb};
use crate::metrics::QueryTimer;

const ATTENDANCE_COLUMNS: &str =
    "id, schedule_id, member_id, status, attended_at, memo, created_at, updated_at";

/// Repository for attendance-record database operations.
#[derive(Clone)]
pub struct AttendanceRepository {
    pool: PgPool,
}

impl AttendanceRepository {
    /// Creates a new AttendanceRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Write the realized outcome for a schedule entry.
    ///
    /// Upsert keyed on schedule_id: the first terminal transition creates the
    /// row, later re-transitions update it in place. A NULL memo leaves the
    /// existing memo untouched.
    pub async fn upsert(
        &self,
        schedule_id: Uuid,
        member_id: Option<Uuid>,
        status: ScheduleStatusDb,
        memo: Option<&str>,
    ) -> Result<AttendanceEntity, sqlx::Error> {
        let timer = QueryTimer::new("upsert_attendance_record");
        let result = sqlx::query_as::<_, AttendanceEntity>(&format!(
            r#"
            INSERT INTO attendance_records (schedule_id, member_id, status, attended_at, memo)
            VALUES ($1, $2, $3, NOW(), $4)
            ON CONFLICT (schedule_id) DO UPDATE
            SET status = EXCLUDED.status,
                attended_at = NOW(),
                memo = COALESCE(EXCLUDED.memo, attendance_records.memo),
                updated_at = NOW()
            RETURNING {ATTENDANCE_COLUMNS}
            "#,
        ))
        .bind(schedule_id)
        .bind(member_id)
        .bind(status)
        .bind(memo)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update the status of an existing record, if one exists.
    ///
    /// Used when an entry leaves a consuming state: the record is never
    /// created by this path, only revised.
    pub async fn update_status_if_exists(
        &self,
        schedule_id: Uuid,
        status: ScheduleStatusDb,
        memo: Option<&str>,
    ) -> Result<Option<AttendanceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_attendance_status");
        let result = sqlx::query_as::<_, AttendanceEntity>(&format!(
            r#"
            UPDATE attendance_records
            SET status = $2, memo = COALESCE($3, memo), updated_at = NOW()
            WHERE schedule_id = $1
            RETURNING {ATTENDANCE_COLUMNS}
            "#,
        ))
        .bind(schedule_id)
        .bind(status)
        .bind(memo)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find the attendance record for a schedule entry.
    pub async fn find_by_schedule(
        &self,
        schedule_id: Uuid,
    ) -> Result<Option<AttendanceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_attendance_by_schedule");
        let result = sqlx::query_as::<_, AttendanceEntity>(&format!(
            r#"
            SELECT {ATTENDANCE_COLUMNS}
            FROM attendance_records
            WHERE schedule_id = $1
            "#,
        ))
        .bind(schedule_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}
