//! Schedule entry domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::credit::CreditOutcome;

/// Status of a schedule entry.
///
/// `Completed` and `NoShowDeducted` consume a session credit; the other
/// statuses do not (or represent a refunded credit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    Reserved,
    Completed,
    NoShow,
    NoShowDeducted,
    Cancelled,
    Service,
}

impl std::fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleStatus::Reserved => write!(f, "reserved"),
            ScheduleStatus::Completed => write!(f, "completed"),
            ScheduleStatus::NoShow => write!(f, "no_show"),
            ScheduleStatus::NoShowDeducted => write!(f, "no_show_deducted"),
            ScheduleStatus::Cancelled => write!(f, "cancelled"),
            ScheduleStatus::Service => write!(f, "service"),
        }
    }
}

/// Type of session a schedule entry represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    Pt,
    Ot,
    Personal,
}

impl std::fmt::Display for SessionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionType::Pt => write!(f, "pt"),
            SessionType::Ot => write!(f, "ot"),
            SessionType::Personal => write!(f, "personal"),
        }
    }
}

/// Work classification of a schedule entry for payroll statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkClassification {
    Inside,
    Outside,
    Weekend,
    Holiday,
}

impl std::fmt::Display for WorkClassification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkClassification::Inside => write!(f, "inside"),
            WorkClassification::Outside => write!(f, "outside"),
            WorkClassification::Weekend => write!(f, "weekend"),
            WorkClassification::Holiday => write!(f, "holiday"),
        }
    }
}

/// Request to create a schedule entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CreateScheduleRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_id: Option<Uuid>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub session_type: SessionType,
    pub classification: WorkClassification,
}

/// Request to change the status (and optionally classification) of an entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UpdateScheduleStatusRequest {
    pub status: ScheduleStatus,
    #[serde(default)]
    pub classification: Option<WorkClassification>,
}

/// Schedule entry as returned to the caller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ScheduleResponse {
    pub id: Uuid,
    pub staff_id: Uuid,
    pub gym_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_id: Option<Uuid>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub session_type: SessionType,
    pub classification: WorkClassification,
    pub status: ScheduleStatus,
    pub is_locked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_id: Option<Uuid>,
}

/// Result of a status transition, including the ledger outcome.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TransitionResponse {
    pub schedule: ScheduleResponse,
    pub credit: CreditOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_status_display() {
        assert_eq!(ScheduleStatus::Reserved.to_string(), "reserved");
        assert_eq!(ScheduleStatus::Completed.to_string(), "completed");
        assert_eq!(ScheduleStatus::NoShow.to_string(), "no_show");
        assert_eq!(ScheduleStatus::NoShowDeducted.to_string(), "no_show_deducted");
        assert_eq!(ScheduleStatus::Cancelled.to_string(), "cancelled");
        assert_eq!(ScheduleStatus::Service.to_string(), "service");
    }

    #[test]
    fn test_schedule_status_serde() {
        let status: ScheduleStatus = serde_json::from_str("\"no_show_deducted\"").unwrap();
        assert_eq!(status, ScheduleStatus::NoShowDeducted);
        assert_eq!(
            serde_json::to_string(&ScheduleStatus::NoShow).unwrap(),
            "\"no_show\""
        );
    }

    #[test]
    fn test_invalid_status_rejected() {
        let result: Result<ScheduleStatus, _> = serde_json::from_str("\"attended\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_update_status_request_deserialize() {
        let json = r#"{"status":"completed"}"#;
        let req: UpdateScheduleStatusRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.status, ScheduleStatus::Completed);
        assert!(req.classification.is_none());

        let json = r#"{"status":"completed","classification":"weekend"}"#;
        let req: UpdateScheduleStatusRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.classification, Some(WorkClassification::Weekend));
    }

    #[test]
    fn test_session_type_serde() {
        let t: SessionType = serde_json::from_str("\"pt\"").unwrap();
        assert_eq!(t, SessionType::Pt);
        assert_eq!(serde_json::to_string(&SessionType::Ot).unwrap(), "\"ot\"");
    }
}
