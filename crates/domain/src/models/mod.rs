//! Domain models for GymDesk.

pub mod attendance;
pub mod credit;
pub mod membership;
pub mod monthly_report;
pub mod schedule;
pub mod staff;

pub use attendance::AttendanceResponse;
pub use credit::CreditOutcome;
pub use membership::{
    HoldMembershipRequest, HoldMembershipResponse, MembershipResponse, MembershipStatus,
    UNLIMITED_SESSIONS,
};
pub use monthly_report::{
    MonthlyStats, ReportResponse, ReportStatus, ReviewReportRequest, ReviewReportResponse,
    SubmitReportRequest, SubmitReportResponse, YearMonth,
};
pub use schedule::{
    CreateScheduleRequest, ScheduleResponse, ScheduleStatus, SessionType, TransitionResponse,
    UpdateScheduleStatusRequest, WorkClassification,
};
pub use staff::{Staff, StaffRole};
