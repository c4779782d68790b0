//! Monthly report domain models and the year-month period type.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Status of a submitted monthly report.
///
/// "Not submitted" is implicit: no report row exists for the period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Submitted,
    Approved,
    Rejected,
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportStatus::Submitted => write!(f, "submitted"),
            ReportStatus::Approved => write!(f, "approved"),
            ReportStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Error parsing a YYYY-MM period string.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid year-month: must be YYYY-MM with month 01-12")]
pub struct YearMonthParseError;

/// A calendar month in YYYY-MM form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// UTC boundaries of the month: first instant (inclusive) and the first
    /// instant of the following month (exclusive).
    pub fn bounds(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("validated month")
            .and_hms_opt(0, 0, 0)
            .expect("midnight is valid");
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .expect("validated month")
            .and_hms_opt(0, 0, 0)
            .expect("midnight is valid");
        (Utc.from_utc_datetime(&start), Utc.from_utc_datetime(&end))
    }
}

impl FromStr for YearMonth {
    type Err = YearMonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        shared::validation::validate_year_month(s).map_err(|_| YearMonthParseError)?;
        let (year, month) = s.split_once('-').ok_or(YearMonthParseError)?;
        Ok(YearMonth {
            year: year.parse().map_err(|_| YearMonthParseError)?,
            month: month.parse().map_err(|_| YearMonthParseError)?,
        })
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Snapshot of a trainer's schedule statistics for one month.
///
/// Computed once at submission and stored on the report so that later edits
/// cannot change what was approved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyStats {
    pub total: i64,
    pub status_reserved: i64,
    pub status_completed: i64,
    pub status_no_show: i64,
    pub status_no_show_deducted: i64,
    pub status_cancelled: i64,
    pub status_service: i64,
    pub pt_inside: i64,
    pub pt_outside: i64,
    pub pt_weekend: i64,
    pub pt_holiday: i64,
    pub ot_inside: i64,
    pub ot_outside: i64,
    pub ot_weekend: i64,
    pub ot_holiday: i64,
}

/// Request to submit a trainer's month for review.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SubmitReportRequest {
    pub year_month: String,
}

/// Monthly report as returned to the caller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ReportResponse {
    pub id: Uuid,
    pub staff_id: Uuid,
    pub gym_id: Uuid,
    pub company_id: Uuid,
    pub year_month: String,
    pub stats: MonthlyStats,
    pub status: ReportStatus,
    pub submitted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_memo: Option<String>,
}

/// Response after a successful submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SubmitReportResponse {
    pub report: ReportResponse,
    pub locked_entries: i64,
}

/// Request to approve or reject a submitted report.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ReviewReportRequest {
    pub approved: bool,
    #[serde(default)]
    pub admin_memo: Option<String>,
    /// On rejection, clear entry locks so the trainer can edit and resubmit.
    #[serde(default = "default_unlock_on_reject")]
    pub unlock_on_reject: bool,
}

fn default_unlock_on_reject() -> bool {
    true
}

/// Response after a review action.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ReviewReportResponse {
    pub id: Uuid,
    pub status: ReportStatus,
    pub reviewed_at: DateTime<Utc>,
    pub reviewed_by: Uuid,
    pub unlocked_entries: i64,
}
