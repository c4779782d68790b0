//! Schedule entry routes: creation, lookup, status transitions, deletion.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::{
    AttendanceResponse, CreateScheduleRequest, CreditOutcome, ScheduleResponse, ScheduleStatus,
    TransitionResponse, UpdateScheduleStatusRequest, YearMonth,
};
use domain::services::access;
use chrono::{DateTime, Utc};
use persistence::entities::ScheduleEntity;
use persistence::repositories::{
    AttendanceRepository, CreditTransactionRepository, ScheduleRepository,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{load_staff, StaffAuth};
use crate::services::CreditReconciliationService;

/// Query parameters for listing a trainer's month.
#[derive(Debug, Deserialize)]
pub struct ListSchedulesQuery {
    pub year_month: String,
}

/// Response for a schedule deletion, carrying the ledger outcome.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DeleteScheduleResponse {
    pub deleted: bool,
    pub credit: CreditOutcome,
}

/// One ledger line in an entry's credit history.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CreditTransactionResponse {
    pub id: Uuid,
    pub membership_id: Uuid,
    pub delta: i32,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reversed_at: Option<DateTime<Utc>>,
}

pub(crate) fn to_response(entity: ScheduleEntity) -> ScheduleResponse {
    ScheduleResponse {
        id: entity.id,
        staff_id: entity.staff_id,
        gym_id: entity.gym_id,
        member_id: entity.member_id,
        start_time: entity.start_time,
        end_time: entity.end_time,
        session_type: entity.session_type.into(),
        classification: entity.classification.into(),
        status: entity.status.into(),
        is_locked: entity.is_locked,
        report_id: entity.report_id,
    }
}

/// Load an entry and check the caller may touch it.
async fn find_editable(
    state: &AppState,
    auth: &StaffAuth,
    id: Uuid,
) -> Result<(domain::models::Staff, ScheduleEntity), ApiError> {
    let staff = load_staff(state, auth).await?;

    let entry = ScheduleRepository::new(state.pool.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Schedule entry not found".to_string()))?;

    if !access::can_edit_schedule(&staff, entry.staff_id, entry.gym_id) {
        return Err(ApiError::Forbidden(
            "Not allowed to access this schedule entry".to_string(),
        ));
    }

    Ok((staff, entry))
}

/// Create a schedule entry for the authenticated trainer.
///
/// POST /api/v1/schedules
pub async fn create_schedule(
    State(state): State<AppState>,
    auth: StaffAuth,
    Json(request): Json<CreateScheduleRequest>,
) -> Result<(StatusCode, Json<ScheduleResponse>), ApiError> {
    shared::validation::validate_session_range(request.start_time, request.end_time)?;

    let staff = load_staff(&state, &auth).await?;
    if !staff.is_active {
        return Err(ApiError::Forbidden("Staff account is inactive".to_string()));
    }

    let entry = ScheduleRepository::new(state.pool.clone())
        .create(
            staff.id,
            staff.gym_id,
            request.member_id,
            request.start_time,
            request.end_time,
            request.session_type.into(),
            request.classification.into(),
        )
        .await?;

    info!(schedule_id = %entry.id, staff_id = %staff.id, "schedule entry created");

    Ok((StatusCode::CREATED, Json(to_response(entry))))
}

/// Fetch a single schedule entry.
///
/// GET /api/v1/schedules/:id
pub async fn get_schedule(
    State(state): State<AppState>,
    auth: StaffAuth,
    Path(id): Path<Uuid>,
) -> Result<Json<ScheduleResponse>, ApiError> {
    let (_, entry) = find_editable(&state, &auth, id).await?;
    Ok(Json(to_response(entry)))
}

/// List the authenticated trainer's entries for a month.
///
/// GET /api/v1/schedules?year_month=YYYY-MM
pub async fn list_schedules(
    State(state): State<AppState>,
    auth: StaffAuth,
    Query(query): Query<ListSchedulesQuery>,
) -> Result<Json<Vec<ScheduleResponse>>, ApiError> {
    let year_month: YearMonth = query
        .year_month
        .parse()
        .map_err(|_| ApiError::Validation("Year-month must be in YYYY-MM format".to_string()))?;

    let staff = load_staff(&state, &auth).await?;
    let (start, end) = year_month.bounds();

    let entries = ScheduleRepository::new(state.pool.clone())
        .list_for_staff_in_range(staff.id, start, end)
        .await?;

    Ok(Json(entries.into_iter().map(to_response).collect()))
}

/// Transition an entry to a new status, reconciling the credit ledger.
///
/// PATCH /api/v1/schedules/:id/status
pub async fn update_schedule_status(
    State(state): State<AppState>,
    auth: StaffAuth,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateScheduleStatusRequest>,
) -> Result<Json<TransitionResponse>, ApiError> {
    let (_, entry) = find_editable(&state, &auth, id).await?;

    let (updated, credit) = CreditReconciliationService::new(state.pool.clone())
        .apply_status_change(&entry, request.status, request.classification)
        .await?;

    Ok(Json(TransitionResponse {
        schedule: to_response(updated),
        credit,
    }))
}

/// Quick attendance: mark an entry completed.
///
/// POST /api/v1/schedules/:id/attend
pub async fn attend_schedule(
    State(state): State<AppState>,
    auth: StaffAuth,
    Path(id): Path<Uuid>,
) -> Result<Json<TransitionResponse>, ApiError> {
    let (_, entry) = find_editable(&state, &auth, id).await?;

    let (updated, credit) = CreditReconciliationService::new(state.pool.clone())
        .apply_status_change(&entry, ScheduleStatus::Completed, None)
        .await?;

    Ok(Json(TransitionResponse {
        schedule: to_response(updated),
        credit,
    }))
}

/// Fetch the realized attendance record for an entry, if one exists.
///
/// GET /api/v1/schedules/:id/attendance
pub async fn get_attendance(
    State(state): State<AppState>,
    auth: StaffAuth,
    Path(id): Path<Uuid>,
) -> Result<Json<AttendanceResponse>, ApiError> {
    let (_, entry) = find_editable(&state, &auth, id).await?;

    let record = AttendanceRepository::new(state.pool.clone())
        .find_by_schedule(entry.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("No attendance record for this entry".to_string()))?;

    Ok(Json(AttendanceResponse {
        id: record.id,
        schedule_id: record.schedule_id,
        member_id: record.member_id,
        status: record.status.into(),
        attended_at: record.attended_at,
        memo: record.memo,
    }))
}

/// Fetch the credit ledger history for an entry, newest first.
///
/// GET /api/v1/schedules/:id/credits
pub async fn list_credit_transactions(
    State(state): State<AppState>,
    auth: StaffAuth,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<CreditTransactionResponse>>, ApiError> {
    let (_, entry) = find_editable(&state, &auth, id).await?;

    let transactions = CreditTransactionRepository::new(state.pool.clone())
        .list_for_schedule(entry.id)
        .await?;

    Ok(Json(
        transactions
            .into_iter()
            .map(|t| CreditTransactionResponse {
                id: t.id,
                membership_id: t.membership_id,
                delta: t.delta,
                created_at: t.created_at,
                reversed_at: t.reversed_at,
            })
            .collect(),
    ))
}

/// Delete an unlocked entry, refunding a consumed credit first.
///
/// DELETE /api/v1/schedules/:id
pub async fn delete_schedule(
    State(state): State<AppState>,
    auth: StaffAuth,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteScheduleResponse>, ApiError> {
    let (_, entry) = find_editable(&state, &auth, id).await?;

    let credit = CreditReconciliationService::new(state.pool.clone())
        .delete_entry(&entry)
        .await?;

    info!(schedule_id = %entry.id, "schedule entry deleted");

    Ok(Json(DeleteScheduleResponse {
        deleted: true,
        credit,
    }))
}
