//! Credit transaction repository.
//!
//! Deductions are recorded per schedule entry so refunds reverse the exact
//! membership that was charged.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::CreditTransactionEntity;
use crate::metrics::QueryTimer;

const TRANSACTION_COLUMNS: &str =
    "id, schedule_id, membership_id, delta, created_at, reversed_at";

/// Repository for credit-transaction database operations.
#[derive(Clone)]
pub struct CreditTransactionRepository {
    pool: PgPool,
}

impl CreditTransactionRepository {
    /// Creates a new CreditTransactionRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a deduction of one session against a membership.
    pub async fn record_deduction(
        &self,
        schedule_id: Uuid,
        membership_id: Uuid,
    ) -> Result<CreditTransactionEntity, sqlx::Error> {
        let timer = QueryTimer::new("record_credit_deduction");
        let result = sqlx::query_as::<_, CreditTransactionEntity>(&format!(
            r#"
            INSERT INTO credit_transactions (schedule_id, membership_id, delta)
            VALUES ($1, $2, -1)
            RETURNING {TRANSACTION_COLUMNS}
            "#,
        ))
        .bind(schedule_id)
        .bind(membership_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Mark the most recent open deduction for a schedule entry as reversed.
    ///
    /// Returns the reversed transaction, or None when no open deduction
    /// exists (the caller falls back to the earliest-expiry heuristic).
    pub async fn reverse_open_deduction(
        &self,
        schedule_id: Uuid,
    ) -> Result<Option<CreditTransactionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("reverse_credit_deduction");
        let result = sqlx::query_as::<_, CreditTransactionEntity>(&format!(
            r#"
            UPDATE credit_transactions
            SET reversed_at = NOW()
            WHERE id = (
                SELECT id FROM credit_transactions
                WHERE schedule_id = $1 AND reversed_at IS NULL
                ORDER BY created_at DESC
                LIMIT 1
                FOR UPDATE SKIP LOCKED
            )
            RETURNING {TRANSACTION_COLUMNS}
            "#,
        ))
        .bind(schedule_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List all transactions for a schedule entry, newest first.
    pub async fn list_for_schedule(
        &self,
        schedule_id: Uuid,
    ) -> Result<Vec<CreditTransactionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_credit_transactions_for_schedule");
        let result = sqlx::query_as::<_, CreditTransactionEntity>(&format!(
            r#"
            SELECT {TRANSACTION_COLUMNS}
            FROM credit_transactions
            WHERE schedule_id = $1
            ORDER BY created_at DESC
            "#,
        ))
        .bind(schedule_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
