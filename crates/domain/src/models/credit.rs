//! Ledger outcome of a schedule status transition.

use serde::Serialize;
use uuid::Uuid;

/// What happened to the member's session credits during a transition.
///
/// Quota exhaustion and a missing membership are annotated outcomes, not
/// errors: the status transition itself still goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CreditOutcome {
    /// One session was deducted from the given membership.
    Deducted { membership_id: Uuid },
    /// A matching membership was found but had no remaining sessions.
    QuotaExhausted { membership_id: Uuid },
    /// No active membership of the matching class exists.
    NoMatchingMembership,
    /// One session was credited back to the given membership.
    Refunded { membership_id: Uuid },
    /// A refund was due but no deduction could be traced back.
    RefundSkipped,
    /// The transition did not touch the ledger.
    NoChange,
}

impl CreditOutcome {
    /// Memo text stored on the attendance record for auditability.
    pub fn memo(&self) -> String {
        match self {
            CreditOutcome::Deducted { membership_id } => {
                format!("deducted 1 session from membership {}", membership_id)
            }
            CreditOutcome::QuotaExhausted { membership_id } => {
                format!(
                    "quota exhausted on membership {}; no deduction applied",
                    membership_id
                )
            }
            CreditOutcome::NoMatchingMembership => {
                "no active membership found; no deduction applied".to_string()
            }
            CreditOutcome::Refunded { membership_id } => {
                format!("refunded 1 session to membership {}", membership_id)
            }
            CreditOutcome::RefundSkipped => {
                "refund due but no deduction traced; ledger untouched".to_string()
            }
            CreditOutcome::NoChange => "no ledger change".to_string(),
        }
    }
}
