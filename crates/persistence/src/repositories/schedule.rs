//! Schedule entry repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{
    ScheduleEntity, ScheduleStatusDb, SessionTypeDb, WorkClassificationDb,
};
use crate::metrics::QueryTimer;

const SCHEDULE_COLUMNS: &str = "id, staff_id, gym_id, member_id, start_time, end_time, \
     session_type, classification, status, is_locked, report_id, created_at, updated_at";

/// Repository for schedule-entry database operations.
#[derive(Clone)]
pub struct ScheduleRepository {
    pool: PgPool,
}

impl ScheduleRepository {
    /// Creates a new ScheduleRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new schedule entry in the initial `reserved` status.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        staff_id: Uuid,
        gym_id: Uuid,
        member_id: Option<Uuid>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        session_type: SessionTypeDb,
        classification: WorkClassificationDb,
    ) -> Result<ScheduleEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_schedule_entry");
        let result = sqlx::query_as::<_, ScheduleEntity>(&format!(
            r#"
            INSERT INTO schedule_entries
                (staff_id, gym_id, member_id, start_time, end_time, session_type, classification)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {SCHEDULE_COLUMNS}
            "#,
        ))
        .bind(staff_id)
        .bind(gym_id)
        .bind(member_id)
        .bind(start_time)
        .bind(end_time)
        .bind(session_type)
        .bind(classification)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a schedule entry by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ScheduleEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_schedule_by_id");
        let result = sqlx::query_as::<_, ScheduleEntity>(&format!(
            r#"
            SELECT {SCHEDULE_COLUMNS}
            FROM schedule_entries
            WHERE id = $1
            "#,
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update status (and optionally classification), refusing locked entries.
    ///
    /// The update is conditional on the row still holding `expected_status`,
    /// so two callers racing through the same transition cannot both apply
    /// their ledger side effects. Returns None when the row is missing,
    /// locked, or no longer in the expected status; the caller distinguishes
    /// the cases by re-reading the entry.
    pub async fn update_status(
        &self,
        id: Uuid,
        expected_status: ScheduleStatusDb,
        status: ScheduleStatusDb,
        classification: Option<WorkClassificationDb>,
    ) -> Result<Option<ScheduleEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_schedule_status");
        let result = sqlx::query_as::<_, ScheduleEntity>(&format!(
            r#"
            UPDATE schedule_entries
            SET status = $3, classification = COALESCE($4, classification), updated_at = NOW()
            WHERE id = $1 AND is_locked = false AND status = $2
            RETURNING {SCHEDULE_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(expected_status)
        .bind(status)
        .bind(classification)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete an unlocked schedule entry. Returns false when the row is
    /// missing or locked.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_schedule_entry");
        let result = sqlx::query(
            r#"
            DELETE FROM schedule_entries
            WHERE id = $1 AND is_locked = false
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map(|r| r.rows_affected() == 1);
        timer.record();
        result
    }

    /// List a trainer's entries whose start time falls in [start, end).
    pub async fn list_for_staff_in_range(
        &self,
        staff_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ScheduleEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_schedules_for_staff_in_range");
        let result = sqlx::query_as::<_, ScheduleEntity>(&format!(
            r#"
            SELECT {SCHEDULE_COLUMNS}
            FROM schedule_entries
            WHERE staff_id = $1 AND start_time >= $2 AND start_time < $3
            ORDER BY start_time ASC
            "#,
        ))
        .bind(staff_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
