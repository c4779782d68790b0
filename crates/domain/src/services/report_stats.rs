//! Monthly report aggregation.
//!
//! A pure, deterministic fold over a trainer's schedule entries for one
//! calendar month. Safe to recompute idempotently; the result is snapshotted
//! into the report at submission time.

use crate::models::{MonthlyStats, ScheduleStatus, SessionType, WorkClassification};

/// Aggregates (status, type, classification) facts into a stats snapshot.
///
/// Personal entries count toward the total and the status buckets but have no
/// type-by-classification cell; only PT and OT cross with the classification.
pub fn aggregate_month<I>(entries: I) -> MonthlyStats
where
    I: IntoIterator<Item = (ScheduleStatus, SessionType, WorkClassification)>,
{
    let mut stats = MonthlyStats::default();

    for (status, session_type, classification) in entries {
        stats.total += 1;

        match status {
            ScheduleStatus::Reserved => stats.status_reserved += 1,
            ScheduleStatus::Completed => stats.status_completed += 1,
            ScheduleStatus::NoShow => stats.status_no_show += 1,
            ScheduleStatus::NoShowDeducted => stats.status_no_show_deducted += 1,
            ScheduleStatus::Cancelled => stats.status_cancelled += 1,
            ScheduleStatus::Service => stats.status_service += 1,
        }

        match (session_type, classification) {
            (SessionType::Pt, WorkClassification::Inside) => stats.pt_inside += 1,
            (SessionType::Pt, WorkClassification::Outside) => stats.pt_outside += 1,
            (SessionType::Pt, WorkClassification::Weekend) => stats.pt_weekend += 1,
            (SessionType::Pt, WorkClassification::Holiday) => stats.pt_holiday += 1,
            (SessionType::Ot, WorkClassification::Inside) => stats.ot_inside += 1,
            (SessionType::Ot, WorkClassification::Outside) => stats.ot_outside += 1,
            (SessionType::Ot, WorkClassification::Weekend) => stats.ot_weekend += 1,
            (SessionType::Ot, WorkClassification::Holiday) => stats.ot_holiday += 1,
            (SessionType::Personal, _) => {}
        }
    }

    stats
}
