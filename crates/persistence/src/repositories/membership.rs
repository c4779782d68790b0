//! Membership ledger repository.
//!
//! The counters are the unit of truth for credit availability; both counter
//! mutations are single conditional statements so concurrent markings cannot
//! lose updates or push a finite membership past its quota.

use domain::models::UNLIMITED_SESSIONS;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{MembershipEntity, SessionTypeDb};
use crate::metrics::QueryTimer;

/// Repository for membership-related database operations.
#[derive(Clone)]
pub struct MembershipRepository {
    pool: PgPool,
}

impl MembershipRepository {
    /// Creates a new MembershipRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a membership by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<MembershipEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_membership_by_id");
        let result = sqlx::query_as::<_, MembershipEntity>(
            r#"
            SELECT id, member_id, gym_id, name, session_type, total_sessions, used_sessions,
                   status, start_date, end_date, created_at, updated_at
            FROM memberships
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find the membership a consuming transition should deduct from.
    ///
    /// Earliest-expiry-first policy: among the member's active memberships of
    /// the matching session class, pick the one ending soonest.
    pub async fn find_deductible(
        &self,
        member_id: Uuid,
        gym_id: Uuid,
        session_type: SessionTypeDb,
    ) -> Result<Option<MembershipEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_deductible_membership");
        let result = sqlx::query_as::<_, MembershipEntity>(
            r#"
            SELECT id, member_id, gym_id, name, session_type, total_sessions, used_sessions,
                   status, start_date, end_date, created_at, updated_at
            FROM memberships
            WHERE member_id = $1 AND gym_id = $2 AND session_type = $3
              AND status = 'active' AND end_date >= CURRENT_DATE
            ORDER BY end_date ASC
            LIMIT 1
            "#,
        )
        .bind(member_id)
        .bind(gym_id)
        .bind(session_type)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Increment used_sessions by one, guarded against exceeding the quota.
    ///
    /// Returns false when the membership is already at quota (the caller
    /// records this as an exhausted deduction, not an error).
    pub async fn increment_used(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("increment_membership_used");
        let result = sqlx::query(
            r#"
            UPDATE memberships
            SET used_sessions = used_sessions + 1, updated_at = NOW()
            WHERE id = $1 AND (total_sessions = $2 OR used_sessions < total_sessions)
            "#,
        )
        .bind(id)
        .bind(UNLIMITED_SESSIONS)
        .execute(&self.pool)
        .await
        .map(|r| r.rows_affected() == 1);
        timer.record();
        result
    }

    /// Decrement used_sessions by one, floored at zero.
    ///
    /// Returns false when the counter was already zero (a recoverable
    /// inconsistency, not a fatal error).
    pub async fn decrement_used(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("decrement_membership_used");
        let result = sqlx::query(
            r#"
            UPDATE memberships
            SET used_sessions = used_sessions - 1, updated_at = NOW()
            WHERE id = $1 AND used_sessions > 0
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map(|r| r.rows_affected() == 1);
        timer.record();
        result
    }

    /// Extend the end date by the given number of days (holding feature).
    pub async fn extend_end_date(
        &self,
        id: Uuid,
        days: i32,
    ) -> Result<Option<MembershipEntity>, sqlx::Error> {
        let timer = QueryTimer::new("extend_membership_end_date");
        let result = sqlx::query_as::<_, MembershipEntity>(
            r#"
            UPDATE memberships
            SET end_date = end_date + $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, member_id, gym_id, name, session_type, total_sessions, used_sessions,
                      status, start_date, end_date, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(days)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}
