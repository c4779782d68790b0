//! Domain services for GymDesk.
//!
//! Services contain business logic that operates on domain models.

pub mod access;
pub mod credit_policy;
pub mod report_stats;

pub use access::{can_edit_schedule, can_manage_membership, can_review_report, can_submit_report};
pub use credit_policy::{bucket, consumes_credit, decide, CreditBucket, LedgerAction};
pub use report_stats::aggregate_month;
