//! Database entities (row mappings).

pub mod attendance;
pub mod credit_transaction;
pub mod membership;
pub mod monthly_report;
pub mod schedule;
pub mod staff;

pub use attendance::AttendanceEntity;
pub use credit_transaction::CreditTransactionEntity;
pub use membership::{MembershipEntity, MembershipStatusDb};
pub use monthly_report::{MonthlyReportEntity, ReportStatusDb};
pub use schedule::{
    ScheduleEntity, ScheduleFactsRow, ScheduleStatusDb, SessionTypeDb, WorkClassificationDb,
};
pub use staff::{StaffEntity, StaffRoleDb};
