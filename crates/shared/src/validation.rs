//! Common validation utilities.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Calendar month in YYYY-MM form, months 01-12.
    static ref YEAR_MONTH_RE: Regex = Regex::new(r"^\d{4}-(0[1-9]|1[0-2])$").unwrap();
}

/// Maximum length of an admin memo attached to a report review.
pub const MAX_MEMO_LENGTH: usize = 2000;

/// Maximum number of days a membership hold may extend the end date.
pub const MAX_HOLD_DAYS: i64 = 365;

/// Validates that a string is a well-formed YYYY-MM calendar month.
pub fn validate_year_month(value: &str) -> Result<(), ValidationError> {
    if YEAR_MONTH_RE.is_match(value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("year_month_format");
        err.message = Some("Year-month must be in YYYY-MM format".into());
        Err(err)
    }
}

/// Validates that a session time range is non-empty (end strictly after start).
pub fn validate_session_range(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<(), ValidationError> {
    if end > start {
        Ok(())
    } else {
        let mut err = ValidationError::new("session_range");
        err.message = Some("Session end time must be after start time".into());
        Err(err)
    }
}

/// Validates that a memo does not exceed the maximum length.
pub fn validate_memo(memo: &str) -> Result<(), ValidationError> {
    if memo.len() <= MAX_MEMO_LENGTH {
        Ok(())
    } else {
        let mut err = ValidationError::new("memo_length");
        err.message = Some("Memo exceeds maximum length".into());
        Err(err)
    }
}

/// Validates that a hold extension is within the allowed range.
pub fn validate_hold_days(days: i64) -> Result<(), ValidationError> {
    if (1..=MAX_HOLD_DAYS).contains(&days) {
        Ok(())
    } else {
        let mut err = ValidationError::new("hold_days_range");
        err.message = Some("Hold days must be between 1 and 365".into());
        Err(err)
    }
}
