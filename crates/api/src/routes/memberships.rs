//! Membership routes: lookup and hold extension.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use domain::models::{HoldMembershipRequest, HoldMembershipResponse, MembershipResponse};
use domain::services::access;
use persistence::entities::MembershipEntity;
use persistence::repositories::MembershipRepository;
use tracing::info;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{load_staff, StaffAuth};

fn to_response(entity: MembershipEntity) -> MembershipResponse {
    let remaining =
        MembershipResponse::compute_remaining(entity.total_sessions, entity.used_sessions);
    MembershipResponse {
        id: entity.id,
        member_id: entity.member_id,
        gym_id: entity.gym_id,
        name: entity.name,
        total_sessions: entity.total_sessions,
        used_sessions: entity.used_sessions,
        remaining_sessions: remaining,
        status: entity.status.into(),
        start_date: entity.start_date,
        end_date: entity.end_date,
    }
}

/// Fetch a membership with its remaining-session count.
///
/// GET /api/v1/memberships/:id
pub async fn get_membership(
    State(state): State<AppState>,
    auth: StaffAuth,
    Path(id): Path<Uuid>,
) -> Result<Json<MembershipResponse>, ApiError> {
    let staff = load_staff(&state, &auth).await?;

    let membership = MembershipRepository::new(state.pool.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Membership not found".to_string()))?;

    // Any active staff in the gym may check a member's balance.
    if !staff.is_active || staff.gym_id != membership.gym_id {
        return Err(ApiError::Forbidden(
            "Not allowed to access this membership".to_string(),
        ));
    }

    Ok(Json(to_response(membership)))
}

/// Place a membership on hold, extending its end date.
///
/// POST /api/v1/memberships/:id/hold
pub async fn hold_membership(
    State(state): State<AppState>,
    auth: StaffAuth,
    Path(id): Path<Uuid>,
    Json(request): Json<HoldMembershipRequest>,
) -> Result<Json<HoldMembershipResponse>, ApiError> {
    shared::validation::validate_hold_days(request.days)?;

    let staff = load_staff(&state, &auth).await?;

    let repo = MembershipRepository::new(state.pool.clone());
    let membership = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Membership not found".to_string()))?;

    if !access::can_manage_membership(&staff, membership.gym_id) {
        return Err(ApiError::Forbidden(
            "Not allowed to manage this membership".to_string(),
        ));
    }

    let extended = repo
        .extend_end_date(id, request.days as i32)
        .await?
        .ok_or_else(|| ApiError::NotFound("Membership not found".to_string()))?;

    info!(membership_id = %id, days = request.days, "membership hold applied");

    Ok(Json(HoldMembershipResponse {
        id: extended.id,
        end_date: extended.end_date,
        extended_by_days: request.days,
        extended_at: Utc::now(),
    }))
}
