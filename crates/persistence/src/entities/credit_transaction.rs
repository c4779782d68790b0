//! Credit transaction entity (database row mapping).
//!
//! One row per ledger mutation caused by a schedule entry, so that a refund
//! reverses the exact membership that was deducted instead of re-deriving it
//! heuristically.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the credit_transactions table.
#[derive(Debug, Clone, FromRow)]
pub struct CreditTransactionEntity {
    pub id: Uuid,
    pub schedule_id: Uuid,
    pub membership_id: Uuid,
    /// Change to remaining sessions: -1 for a deduction.
    pub delta: i32,
    pub created_at: DateTime<Utc>,
    /// Set when the deduction has been refunded.
    pub reversed_at: Option<DateTime<Utc>>,
}
