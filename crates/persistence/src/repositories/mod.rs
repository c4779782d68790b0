//! Repository implementations for database operations.

pub mod attendance;
pub mod credit_transaction;
pub mod membership;
pub mod monthly_report;
pub mod schedule;
pub mod staff;

pub use attendance::AttendanceRepository;
pub use credit_transaction::CreditTransactionRepository;
pub use membership::MembershipRepository;
pub use monthly_report::MonthlyReportRepository;
pub use schedule::ScheduleRepository;
pub use staff::StaffRepository;
