//! Membership domain models: one purchased package of sessions for a member.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sentinel `total_sessions` value denoting an unlimited membership.
pub const UNLIMITED_SESSIONS: i32 = 9999;

/// Status of a membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    Active,
    Expired,
    Paused,
}

impl std::fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MembershipStatus::Active => write!(f, "active"),
            MembershipStatus::Expired => write!(f, "expired"),
            MembershipStatus::Paused => write!(f, "paused"),
        }
    }
}

/// Membership as returned to the caller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MembershipResponse {
    pub id: Uuid,
    pub member_id: Uuid,
    pub gym_id: Uuid,
    pub name: String,
    pub total_sessions: i32,
    pub used_sessions: i32,
    /// None for unlimited memberships.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_sessions: Option<i32>,
    pub status: MembershipStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl MembershipResponse {
    /// Remaining sessions, or None when the membership is unlimited.
    pub fn compute_remaining(total: i32, used: i32) -> Option<i32> {
        if total == UNLIMITED_SESSIONS {
            None
        } else {
            Some((total - used).max(0))
        }
    }
}

/// Request to place a membership on hold, extending its end date.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HoldMembershipRequest {
    pub days: i64,
}

/// Response after a hold extension.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HoldMembershipResponse {
    pub id: Uuid,
    pub end_date: NaiveDate,
    pub extended_by_days: i64,
    pub extended_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_status_display() {
        assert_eq!(MembershipStatus::Active.to_string(), "active");
        assert_eq!(MembershipStatus::Expired.to_string(), "expired");
        assert_eq!(MembershipStatus::Paused.to_string(), "paused");
    }

    #[test]
    fn test_remaining_sessions_finite() {
        assert_eq!(MembershipResponse::compute_remaining(10, 3), Some(7));
        assert_eq!(MembershipResponse::compute_remaining(10, 10), Some(0));
        // Tolerated transient over-use never reports negative
        assert_eq!(MembershipResponse::compute_remaining(10, 11), Some(0));
    }

    #[test]
    fn test_remaining_sessions_unlimited() {
        assert_eq!(
            MembershipResponse::compute_remaining(UNLIMITED_SESSIONS, 500),
            None
        );
    }

    #[test]
    fn test_hold_request_deserialize() {
        let req: HoldMembershipRequest = serde_json::from_str(r#"{"days":14}"#).unwrap();
        assert_eq!(req.days, 14);
    }
}
