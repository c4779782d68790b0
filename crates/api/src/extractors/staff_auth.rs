//! Staff JWT authentication extractor.
//!
//! Validates the Bearer token in the Authorization header and resolves the
//! staff identity. Role and scope are not carried in the token; handlers load
//! the staff row for capability checks via [`load_staff`].

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use domain::models::Staff;
use persistence::repositories::StaffRepository;
use shared::jwt::{extract_staff_id, JwtConfig};
use uuid::Uuid;

use crate::app::AppState;
use crate::config::JwtAuthConfig;
use crate::error::ApiError;

/// Authenticated staff identity from a validated JWT.
#[derive(Debug, Clone)]
pub struct StaffAuth {
    /// Staff ID from the JWT subject claim.
    pub staff_id: Uuid,
    /// JWT ID (jti) for audit correlation.
    pub jti: String,
}

fn create_jwt_config(config: &JwtAuthConfig) -> Result<JwtConfig, ApiError> {
    JwtConfig::with_leeway(
        &config.private_key,
        &config.public_key,
        config.access_token_expiry_secs,
        config.leeway_secs,
    )
    .map_err(|e| ApiError::Internal(format!("JWT configuration error: {}", e)))
}

#[async_trait]
impl FromRequestParts<AppState> for StaffAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError::Unauthorized("Invalid Authorization header format".to_string())
        })?;

        let jwt_config = create_jwt_config(&state.config.jwt)?;

        let claims = jwt_config
            .validate_token(token)
            .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

        let staff_id = extract_staff_id(&claims)
            .map_err(|_| ApiError::Unauthorized("Invalid token subject".to_string()))?;

        Ok(StaffAuth {
            staff_id,
            jti: claims.jti,
        })
    }
}

/// Resolve the authenticated staff row for capability checks.
///
/// A token whose subject no longer exists is treated as unauthorized rather
/// than a missing resource.
pub async fn load_staff(state: &AppState, auth: &StaffAuth) -> Result<Staff, ApiError> {
    let staff = StaffRepository::new(state.pool.clone())
        .find_by_id(auth.staff_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Unknown staff identity".to_string()))?;

    Ok(staff.into())
}
