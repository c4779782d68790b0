//! Monthly report routes: submission, lookup, review.

use axum::{
    extract::{Path, State},
    Json,
};
use domain::models::{
    ReportResponse, ReviewReportRequest, ReviewReportResponse, SubmitReportRequest,
    SubmitReportResponse, YearMonth,
};
use domain::services::access;
use axum::extract::Query;
use persistence::entities::{MonthlyReportEntity, ReportStatusDb};
use persistence::repositories::MonthlyReportRepository;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{load_staff, StaffAuth};
use crate::middleware::metrics::record_report_submitted;

fn to_response(entity: MonthlyReportEntity) -> ReportResponse {
    ReportResponse {
        id: entity.id,
        staff_id: entity.staff_id,
        gym_id: entity.gym_id,
        company_id: entity.company_id,
        year_month: entity.year_month,
        stats: entity.stats.0,
        status: entity.status.into(),
        submitted_at: entity.submitted_at,
        reviewed_at: entity.reviewed_at,
        reviewed_by: entity.reviewed_by,
        admin_memo: entity.admin_memo,
    }
}

/// serialization_failure or deadlock: safe to retry the whole transaction.
fn is_retryable(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err)
            if db_err.code().as_deref() == Some("40001")
                || db_err.code().as_deref() == Some("40P01")
    )
}

/// Submit the authenticated trainer's month for review.
///
/// POST /api/v1/reports/submit
///
/// Resubmission after a rejection reuses the same (staff, year_month) row.
pub async fn submit_report(
    State(state): State<AppState>,
    auth: StaffAuth,
    Json(request): Json<SubmitReportRequest>,
) -> Result<Json<SubmitReportResponse>, ApiError> {
    let year_month: YearMonth = request
        .year_month
        .parse()
        .map_err(|_| ApiError::Validation("Year-month must be in YYYY-MM format".to_string()))?;

    let staff = load_staff(&state, &auth).await?;
    if !access::can_submit_report(&staff, staff.id, staff.gym_id) {
        return Err(ApiError::Forbidden(
            "Not allowed to submit this report".to_string(),
        ));
    }

    let repo = MonthlyReportRepository::new(state.pool.clone());
    let (start, end) = year_month.bounds();
    let period = year_month.to_string();

    let (report, locked) = match repo
        .submit(staff.id, staff.gym_id, staff.company_id, &period, start, end)
        .await
    {
        Ok(result) => result,
        Err(e) if is_retryable(&e) => {
            warn!(staff_id = %staff.id, year_month = %period,
                "submission hit a concurrent update, retrying once");
            repo.submit(staff.id, staff.gym_id, staff.company_id, &period, start, end)
                .await?
        }
        Err(e) => return Err(e.into()),
    };

    info!(report_id = %report.id, staff_id = %staff.id, year_month = %period,
        locked_entries = locked, "monthly report submitted");
    record_report_submitted(locked);

    Ok(Json(SubmitReportResponse {
        report: to_response(report),
        locked_entries: locked,
    }))
}

/// Query parameters for the caller's own report lookup.
#[derive(Debug, Deserialize)]
pub struct OwnReportQuery {
    pub year_month: String,
}

/// Fetch the authenticated staff member's own report for a month.
///
/// GET /api/v1/reports?year_month=YYYY-MM
///
/// 404 means the month has not been submitted.
pub async fn get_own_report(
    State(state): State<AppState>,
    auth: StaffAuth,
    Query(query): Query<OwnReportQuery>,
) -> Result<Json<ReportResponse>, ApiError> {
    let year_month: YearMonth = query
        .year_month
        .parse()
        .map_err(|_| ApiError::Validation("Year-month must be in YYYY-MM format".to_string()))?;

    let staff = load_staff(&state, &auth).await?;

    let report = MonthlyReportRepository::new(state.pool.clone())
        .find_by_staff_and_month(staff.id, &year_month.to_string())
        .await?
        .ok_or_else(|| ApiError::NotFound("No report submitted for this month".to_string()))?;

    Ok(Json(to_response(report)))
}

/// Fetch a monthly report.
///
/// GET /api/v1/reports/:id
///
/// Visible to the submitting trainer and to staff who could review it.
pub async fn get_report(
    State(state): State<AppState>,
    auth: StaffAuth,
    Path(id): Path<Uuid>,
) -> Result<Json<ReportResponse>, ApiError> {
    let staff = load_staff(&state, &auth).await?;

    let report = MonthlyReportRepository::new(state.pool.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Report not found".to_string()))?;

    let is_own = staff.is_active && staff.id == report.staff_id;
    if !is_own && !access::can_review_report(&staff, report.gym_id, report.company_id) {
        return Err(ApiError::Forbidden(
            "Not allowed to access this report".to_string(),
        ));
    }

    Ok(Json(to_response(report)))
}

/// Approve or reject a submitted report.
///
/// POST /api/v1/reports/:id/review
///
/// Rejection unlocks the report's entries (unless unlock_on_reject is false)
/// so the trainer can correct and resubmit; approval leaves them locked.
pub async fn review_report(
    State(state): State<AppState>,
    auth: StaffAuth,
    Path(id): Path<Uuid>,
    Json(request): Json<ReviewReportRequest>,
) -> Result<Json<ReviewReportResponse>, ApiError> {
    if let Some(memo) = &request.admin_memo {
        shared::validation::validate_memo(memo)?;
    }

    let staff = load_staff(&state, &auth).await?;

    let repo = MonthlyReportRepository::new(state.pool.clone());
    let report = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Report not found".to_string()))?;

    if !access::can_review_report(&staff, report.gym_id, report.company_id) {
        return Err(ApiError::Forbidden(
            "Not allowed to review this report".to_string(),
        ));
    }

    let status = if request.approved {
        ReportStatusDb::Approved
    } else {
        ReportStatusDb::Rejected
    };
    let unlock = !request.approved && request.unlock_on_reject;

    let (reviewed, unlocked) = repo
        .review(id, status, staff.id, request.admin_memo.as_deref(), unlock)
        .await?
        .ok_or_else(|| {
            ApiError::Conflict("Report is not awaiting review".to_string())
        })?;

    info!(report_id = %id, approved = request.approved, unlocked_entries = unlocked,
        "monthly report reviewed");

    Ok(Json(ReviewReportResponse {
        id: reviewed.id,
        status: reviewed.status.into(),
        reviewed_at: reviewed.reviewed_at.unwrap_or_else(chrono::Utc::now),
        reviewed_by: staff.id,
        unlocked_entries: unlocked,
    }))
}
