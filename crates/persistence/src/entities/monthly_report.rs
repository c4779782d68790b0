//! Monthly report entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{MonthlyStats, ReportStatus};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for report status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "report_status", rename_all = "lowercase")]
pub enum ReportStatusDb {
    Submitted,
    Approved,
    Rejected,
}

impl From<ReportStatusDb> for ReportStatus {
    fn from(status: ReportStatusDb) -> Self {
        match status {
            ReportStatusDb::Submitted => ReportStatus::Submitted,
            ReportStatusDb::Approved => ReportStatus::Approved,
            ReportStatusDb::Rejected => ReportStatus::Rejected,
        }
    }
}

/// Database row mapping for the monthly_reports table.
///
/// Unique on (staff_id, year_month); submission upserts over that key.
#[derive(Debug, Clone, FromRow)]
pub struct MonthlyReportEntity {
    pub id: Uuid,
    pub staff_id: Uuid,
    pub gym_id: Uuid,
    pub company_id: Uuid,
    pub year_month: String,
    pub stats: Json<MonthlyStats>,
    pub status: ReportStatusDb,
    pub submitted_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<Uuid>,
    pub admin_memo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
