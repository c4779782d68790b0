//! Credit reconciliation for schedule status transitions.
//!
//! The status change is the primary effect and commits on its own; ledger and
//! attendance writes follow best-effort. A failed ledger step is logged and
//! surfaced as an annotated outcome, never as a failed transition.

use domain::models::{CreditOutcome, ScheduleStatus, WorkClassification};
use domain::services::credit_policy::{self, LedgerAction};
use persistence::entities::ScheduleEntity;
use persistence::repositories::{
    AttendanceRepository, CreditTransactionRepository, MembershipRepository, ScheduleRepository,
};
use sqlx::PgPool;
use tracing::warn;

use crate::error::ApiError;
use crate::middleware::metrics::record_credit_outcome;

/// Applies status transitions together with their credit-ledger and
/// attendance side effects.
#[derive(Clone)]
pub struct CreditReconciliationService {
    schedules: ScheduleRepository,
    memberships: MembershipRepository,
    attendance: AttendanceRepository,
    transactions: CreditTransactionRepository,
}

impl CreditReconciliationService {
    /// Creates a new service over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            schedules: ScheduleRepository::new(pool.clone()),
            memberships: MembershipRepository::new(pool.clone()),
            attendance: AttendanceRepository::new(pool.clone()),
            transactions: CreditTransactionRepository::new(pool),
        }
    }

    /// Transition an entry to a new status, reconciling the credit ledger.
    ///
    /// The caller has already verified the entry exists and the staff member
    /// may edit it. Locked entries are refused.
    pub async fn apply_status_change(
        &self,
        entry: &ScheduleEntity,
        new_status: ScheduleStatus,
        classification: Option<WorkClassification>,
    ) -> Result<(ScheduleEntity, CreditOutcome), ApiError> {
        let old_status: ScheduleStatus = entry.status.into();

        let updated = match self
            .schedules
            .update_status(
                entry.id,
                entry.status,
                new_status.into(),
                classification.map(Into::into),
            )
            .await?
        {
            Some(updated) => updated,
            // The conditional update matched nothing; re-read to tell the
            // caller which precondition failed.
            None => {
                return Err(match self.schedules.find_by_id(entry.id).await? {
                    None => ApiError::NotFound("Schedule entry not found".to_string()),
                    Some(current) if current.is_locked => ApiError::Forbidden(
                        "Schedule entry is locked by a submitted report".to_string(),
                    ),
                    Some(_) => ApiError::Conflict(
                        "Schedule entry was modified concurrently".to_string(),
                    ),
                });
            }
        };

        let outcome = match credit_policy::decide(old_status, new_status) {
            LedgerAction::None => CreditOutcome::NoChange,
            LedgerAction::Deduct => match self.deduct(&updated).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(schedule_id = %updated.id, error = %e,
                        "credit deduction failed; ledger untouched");
                    CreditOutcome::NoChange
                }
            },
            LedgerAction::Refund => match self.refund(&updated).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(schedule_id = %updated.id, error = %e,
                        "credit refund failed; ledger untouched");
                    CreditOutcome::RefundSkipped
                }
            },
        };

        record_credit_outcome(outcome_kind(&outcome));
        self.record_attendance(&updated, old_status, new_status, &outcome)
            .await;

        Ok((updated, outcome))
    }

    /// Delete an unlocked entry, then refund a consumed credit.
    ///
    /// The delete goes first: a concurrent submit may have locked the entry
    /// since the caller read it, and a refused delete must leave the ledger
    /// untouched. The refund works from the entry snapshot because credit
    /// transactions are keyed by schedule id without a foreign key.
    pub async fn delete_entry(&self, entry: &ScheduleEntity) -> Result<CreditOutcome, ApiError> {
        if entry.is_locked {
            return Err(ApiError::Forbidden(
                "Schedule entry is locked by a submitted report".to_string(),
            ));
        }

        let deleted = self.schedules.delete(entry.id).await?;
        if !deleted {
            return Err(ApiError::Forbidden(
                "Schedule entry is locked by a submitted report".to_string(),
            ));
        }

        let outcome = if credit_policy::consumes_credit(entry.status.into()) {
            match self.refund(entry).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(schedule_id = %entry.id, error = %e,
                        "refund after delete failed; ledger untouched");
                    CreditOutcome::RefundSkipped
                }
            }
        } else {
            CreditOutcome::NoChange
        };

        record_credit_outcome(outcome_kind(&outcome));
        Ok(outcome)
    }

    /// Deduct one session for a transition into a consuming status.
    async fn deduct(&self, entry: &ScheduleEntity) -> Result<CreditOutcome, sqlx::Error> {
        let Some(member_id) = entry.member_id else {
            return Ok(CreditOutcome::NoMatchingMembership);
        };

        let membership = self
            .memberships
            .find_deductible(member_id, entry.gym_id, entry.session_type)
            .await?;

        let Some(membership) = membership else {
            return Ok(CreditOutcome::NoMatchingMembership);
        };

        if !self.memberships.increment_used(membership.id).await? {
            return Ok(CreditOutcome::QuotaExhausted {
                membership_id: membership.id,
            });
        }

        self.transactions
            .record_deduction(entry.id, membership.id)
            .await?;

        Ok(CreditOutcome::Deducted {
            membership_id: membership.id,
        })
    }

    /// Refund one session for a transition out of a consuming status.
    ///
    /// Prefers reversing the open credit transaction for this entry; falls
    /// back to the earliest-expiry heuristic when no deduction was recorded.
    async fn refund(&self, entry: &ScheduleEntity) -> Result<CreditOutcome, sqlx::Error> {
        if let Some(txn) = self.transactions.reverse_open_deduction(entry.id).await? {
            if !self.memberships.decrement_used(txn.membership_id).await? {
                warn!(membership_id = %txn.membership_id,
                    "refund found used_sessions already at zero");
            }
            return Ok(CreditOutcome::Refunded {
                membership_id: txn.membership_id,
            });
        }

        let Some(member_id) = entry.member_id else {
            return Ok(CreditOutcome::RefundSkipped);
        };

        let membership = self
            .memberships
            .find_deductible(member_id, entry.gym_id, entry.session_type)
            .await?;

        if let Some(m) = membership {
            if self.memberships.decrement_used(m.id).await? {
                return Ok(CreditOutcome::Refunded { membership_id: m.id });
            }
        }
        Ok(CreditOutcome::RefundSkipped)
    }

    /// Best-effort attendance bookkeeping for a completed transition.
    ///
    /// Entering a consuming status upserts the record; leaving one revises
    /// the existing record in place. Non-consuming shuffles leave it alone.
    async fn record_attendance(
        &self,
        entry: &ScheduleEntity,
        old_status: ScheduleStatus,
        new_status: ScheduleStatus,
        outcome: &CreditOutcome,
    ) {
        // A NoChange outcome carries no ledger information; keep whatever
        // memo the original deduction wrote instead of overwriting it.
        let memo = match outcome {
            CreditOutcome::NoChange => None,
            _ => Some(outcome.memo()),
        };

        if credit_policy::consumes_credit(new_status) {
            if let Err(e) = self
                .attendance
                .upsert(entry.id, entry.member_id, new_status.into(), memo.as_deref())
                .await
            {
                warn!(schedule_id = %entry.id, error = %e, "attendance upsert failed");
            }
        } else if credit_policy::consumes_credit(old_status) {
            if let Err(e) = self
                .attendance
                .update_status_if_exists(entry.id, new_status.into(), memo.as_deref())
                .await
            {
                warn!(schedule_id = %entry.id, error = %e, "attendance update failed");
            }
        }
    }
}

/// Static label for the outcome metric.
fn outcome_kind(outcome: &CreditOutcome) -> &'static str {
    match outcome {
        CreditOutcome::Deducted { .. } => "deducted",
        CreditOutcome::QuotaExhausted { .. } => "quota_exhausted",
        CreditOutcome::NoMatchingMembership => "no_matching_membership",
        CreditOutcome::Refunded { .. } => "refunded",
        CreditOutcome::RefundSkipped => "refund_skipped",
        CreditOutcome::NoChange => "no_change",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_outcome_kind_labels() {
        let id = Uuid::new_v4();
        assert_eq!(
            outcome_kind(&CreditOutcome::Deducted { membership_id: id }),
            "deducted"
        );
        assert_eq!(
            outcome_kind(&CreditOutcome::QuotaExhausted { membership_id: id }),
            "quota_exhausted"
        );
        assert_eq!(
            outcome_kind(&CreditOutcome::NoMatchingMembership),
            "no_matching_membership"
        );
        assert_eq!(outcome_kind(&CreditOutcome::RefundSkipped), "refund_skipped");
        assert_eq!(outcome_kind(&CreditOutcome::NoChange), "no_change");
    }
}
