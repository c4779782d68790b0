//! Credit accounting policy for schedule status transitions.
//!
//! The six schedule statuses collapse into two accounting buckets, and the
//! ledger action for any transition is a function of the (old, new) bucket
//! pair. Keeping the mapping and the decision table here makes the policy
//! data rather than conditionals scattered across handlers.

use crate::models::ScheduleStatus;

/// Accounting bucket of a schedule status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditBucket {
    /// A session credit has been consumed (`completed`, `no_show_deducted`).
    Consuming,
    /// No credit is consumed, or a prior consumption was refunded.
    NonConsuming,
}

/// Ledger action required by a status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerAction {
    /// Deduct one session from the matching membership.
    Deduct,
    /// Credit one session back to the previously deducted membership.
    Refund,
    /// Leave the ledger untouched.
    None,
}

/// Maps a schedule status to its accounting bucket.
pub fn bucket(status: ScheduleStatus) -> CreditBucket {
    match status {
        ScheduleStatus::Completed | ScheduleStatus::NoShowDeducted => CreditBucket::Consuming,
        ScheduleStatus::Reserved
        | ScheduleStatus::NoShow
        | ScheduleStatus::Cancelled
        | ScheduleStatus::Service => CreditBucket::NonConsuming,
    }
}

/// True if the status represents a consumed session credit.
pub fn consumes_credit(status: ScheduleStatus) -> bool {
    bucket(status) == CreditBucket::Consuming
}

/// Decision table: (old bucket, new bucket) → ledger action.
pub fn decide(old: ScheduleStatus, new: ScheduleStatus) -> LedgerAction {
    match (bucket(old), bucket(new)) {
        (CreditBucket::NonConsuming, CreditBucket::Consuming) => LedgerAction::Deduct,
        (CreditBucket::Consuming, CreditBucket::NonConsuming) => LedgerAction::Refund,
        (CreditBucket::Consuming, CreditBucket::Consuming)
        | (CreditBucket::NonConsuming, CreditBucket::NonConsuming) => LedgerAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ScheduleStatus::*;

    const ALL: [ScheduleStatus; 6] =
        [Reserved, Completed, NoShow, NoShowDeducted, Cancelled, Service];

    #[test]
    fn test_bucket_classification() {
        assert_eq!(bucket(Completed), CreditBucket::Consuming);
        assert_eq!(bucket(NoShowDeducted), CreditBucket::Consuming);
        assert_eq!(bucket(Reserved), CreditBucket::NonConsuming);
        assert_eq!(bucket(NoShow), CreditBucket::NonConsuming);
        assert_eq!(bucket(Cancelled), CreditBucket::NonConsuming);
        assert_eq!(bucket(Service), CreditBucket::NonConsuming);
    }

    #[test]
    fn test_quick_attendance_deducts() {
        assert_eq!(decide(Reserved, Completed), LedgerAction::Deduct);
        assert_eq!(decide(Reserved, NoShowDeducted), LedgerAction::Deduct);
    }

    #[test]
    fn test_reversal_refunds() {
        assert_eq!(decide(Completed, Reserved), LedgerAction::Refund);
        assert_eq!(decide(Completed, Cancelled), LedgerAction::Refund);
        assert_eq!(decide(NoShowDeducted, NoShow), LedgerAction::Refund);
    }

    #[test]
    fn test_same_bucket_transitions_are_noops() {
        // Consuming to consuming
        assert_eq!(decide(Completed, NoShowDeducted), LedgerAction::None);
        assert_eq!(decide(NoShowDeducted, Completed), LedgerAction::None);
        // Non-consuming shuffles
        assert_eq!(decide(Reserved, Cancelled), LedgerAction::None);
        assert_eq!(decide(Cancelled, NoShow), LedgerAction::None);
        assert_eq!(decide(NoShow, Service), LedgerAction::None);
    }

    #[test]
    fn test_full_table_is_bucket_consistent() {
        // The decision for every pair must agree with the bucket classification.
        for old in ALL {
            for new in ALL {
                let expected = match (consumes_credit(old), consumes_credit(new)) {
                    (false, true) => LedgerAction::Deduct,
                    (true, false) => LedgerAction::Refund,
                    _ => LedgerAction::None,
                };
                assert_eq!(decide(old, new), expected, "{old} -> {new}");
            }
        }
    }

    #[test]
    fn test_round_trip_is_conserving() {
        // A deduct followed by its reverse transition must pair with a refund.
        for a in ALL {
            for b in ALL {
                if decide(a, b) == LedgerAction::Deduct {
                    assert_eq!(decide(b, a), LedgerAction::Refund, "{a} <-> {b}");
                }
            }
        }
    }
}
