//! Monthly report repository.
//!
//! Submission and review are multi-statement transactions: a report snapshot
//! must never exist with its entries unlocked, and a rejection-unlock must
//! ride the same commit as the status change.

use chrono::{DateTime, Utc};
use domain::models::MonthlyStats;
use domain::services::report_stats;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{MonthlyReportEntity, ReportStatusDb, ScheduleFactsRow};
use crate::metrics::QueryTimer;

const REPORT_COLUMNS: &str = "id, staff_id, gym_id, company_id, year_month, stats, status, \
     submitted_at, reviewed_at, reviewed_by, admin_memo, created_at, updated_at";

/// Repository for monthly-report database operations.
#[derive(Clone)]
pub struct MonthlyReportRepository {
    pool: PgPool,
}

impl MonthlyReportRepository {
    /// Creates a new MonthlyReportRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a monthly report by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<MonthlyReportEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_monthly_report_by_id");
        let result = sqlx::query_as::<_, MonthlyReportEntity>(&format!(
            r#"
            SELECT {REPORT_COLUMNS}
            FROM monthly_reports
            WHERE id = $1
            "#,
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a report by its natural key.
    pub async fn find_by_staff_and_month(
        &self,
        staff_id: Uuid,
        year_month: &str,
    ) -> Result<Option<MonthlyReportEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_monthly_report_by_staff_month");
        let result = sqlx::query_as::<_, MonthlyReportEntity>(&format!(
            r#"
            SELECT {REPORT_COLUMNS}
            FROM monthly_reports
            WHERE staff_id = $1 AND year_month = $2
            "#,
        ))
        .bind(staff_id)
        .bind(year_month)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Submit a trainer's month: snapshot stats, upsert the report, lock the
    /// entries. All inside one transaction so the stats and the locked set
    /// are the same set of rows, and a lock failure aborts the submission.
    pub async fn submit(
        &self,
        staff_id: Uuid,
        gym_id: Uuid,
        company_id: Uuid,
        year_month: &str,
        period_start: DateTime<Utc>,
        period_end: DateTime<Utc>,
    ) -> Result<(MonthlyReportEntity, i64), sqlx::Error> {
        let timer = QueryTimer::new("submit_monthly_report");

        let mut tx = self.pool.begin().await?;
        // Serializable, so an entry inserted between the snapshot select and
        // the lock update aborts the submission (40001) instead of being
        // locked without appearing in the stats. The handler retries once.
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await?;

        // Pin the entry set for the month; stats and locks both derive from it.
        let facts = sqlx::query_as::<_, ScheduleFactsRow>(
            r#"
            SELECT status, session_type, classification
            FROM schedule_entries
            WHERE staff_id = $1 AND start_time >= $2 AND start_time < $3
            FOR UPDATE
            "#,
        )
        .bind(staff_id)
        .bind(period_start)
        .bind(period_end)
        .fetch_all(&mut *tx)
        .await?;

        let stats: MonthlyStats = report_stats::aggregate_month(
            facts
                .iter()
                .map(|f| (f.status.into(), f.session_type.into(), f.classification.into())),
        );

        // Resubmission overwrites the same (staff, year_month) row and clears
        // any previous review.
        let report = sqlx::query_as::<_, MonthlyReportEntity>(&format!(
            r#"
            INSERT INTO monthly_reports (staff_id, gym_id, company_id, year_month, stats, status, submitted_at)
            VALUES ($1, $2, $3, $4, $5, 'submitted', NOW())
            ON CONFLICT (staff_id, year_month) DO UPDATE
            SET stats = EXCLUDED.stats,
                status = 'submitted',
                submitted_at = NOW(),
                reviewed_at = NULL,
                reviewed_by = NULL,
                admin_memo = NULL,
                updated_at = NOW()
            RETURNING {REPORT_COLUMNS}
            "#,
        ))
        .bind(staff_id)
        .bind(gym_id)
        .bind(company_id)
        .bind(year_month)
        .bind(Json(&stats))
        .fetch_one(&mut *tx)
        .await?;

        let locked = sqlx::query(
            r#"
            UPDATE schedule_entries
            SET report_id = $1, is_locked = true, updated_at = NOW()
            WHERE staff_id = $2 AND start_time >= $3 AND start_time < $4
            "#,
        )
        .bind(report.id)
        .bind(staff_id)
        .bind(period_start)
        .bind(period_end)
        .execute(&mut *tx)
        .await?
        .rows_affected() as i64;

        tx.commit().await?;
        timer.record();
        Ok((report, locked))
    }

    /// Review a submitted report, optionally unlocking its entries on reject.
    ///
    /// Conditional on `status = 'submitted'`: returns None when the report
    /// was already reviewed (or resubmission raced the review).
    pub async fn review(
        &self,
        report_id: Uuid,
        status: ReportStatusDb,
        reviewed_by: Uuid,
        admin_memo: Option<&str>,
        unlock_entries: bool,
    ) -> Result<Option<(MonthlyReportEntity, i64)>, sqlx::Error> {
        let timer = QueryTimer::new("review_monthly_report");

        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await?;

        let report = sqlx::query_as::<_, MonthlyReportEntity>(&format!(
            r#"
            UPDATE monthly_reports
            SET status = $2, reviewed_at = NOW(), reviewed_by = $3, admin_memo = $4,
                updated_at = NOW()
            WHERE id = $1 AND status = 'submitted'
            RETURNING {REPORT_COLUMNS}
            "#,
        ))
        .bind(report_id)
        .bind(status)
        .bind(reviewed_by)
        .bind(admin_memo)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(report) = report else {
            tx.rollback().await?;
            timer.record();
            return Ok(None);
        };

        let unlocked = if unlock_entries {
            sqlx::query(
                r#"
                UPDATE schedule_entries
                SET is_locked = false, updated_at = NOW()
                WHERE report_id = $1
                "#,
            )
            .bind(report_id)
            .execute(&mut *tx)
            .await?
            .rows_affected() as i64
        } else {
            0
        };

        tx.commit().await?;
        timer.record();
        Ok(Some((report, unlocked)))
    }
}
