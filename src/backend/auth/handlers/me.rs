/**
 * Current Account Handlers
 *
 * Everything under /api/auth that acts on the caller's own account. The
 * middleware has already checked the token and that the account exists.
 */

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
};

use crate::backend::auth::handlers::types::ChangePasswordRequest;
use crate::backend::auth::passwords::{hash_password, verify_password};
use crate::backend::auth::users::{get_user_by_id, set_avatar, update_password, update_profile, User};
use crate::backend::error::BackendError;
use crate::backend::extract::Json;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::backend::uploads::{save_image, AVATARS};
use crate::shared::gym::{UpdateProfileRequest, UserProfile};
use crate::shared::{navigation_for, Navigation};

async fn load_caller(state: &AppState, user: &AuthUser) -> Result<User, BackendError> {
    get_user_by_id(&state.db_pool, user.id())
        .await?
        .ok_or_else(|| BackendError::not_found("User"))
}

/// GET /api/auth/me
pub async fn get_me(State(state): State<AppState>, user: AuthUser) -> Result<Json<UserProfile>, BackendError> {
    let account = load_caller(&state, &user).await?;
    Ok(Json(account.to_profile()))
}

/// PUT /api/auth/me
///
/// Only personal details; role, status and membership are managed by staff.
pub async fn update_me(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<UserProfile>, BackendError> {
    request.validate()?;
    let updated = update_profile(&state.db_pool, user.id(), &request, None, None).await?;
    tracing::info!("Profile updated: {}", updated.id);
    Ok(Json(updated.to_profile()))
}

/// PUT /api/auth/password
///
/// # Errors
///
/// * `400 Bad Request` - new password too short
/// * `401 Unauthorized` - current password is wrong
pub async fn change_password(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<StatusCode, BackendError> {
    request.validate()?;
    let account = load_caller(&state, &user).await?;

    if !verify_password(&request.current_password, &account.password_hash) {
        tracing::warn!("Password change with wrong current password: {}", account.email);
        return Err(BackendError::unauthorized("Current password is incorrect"));
    }

    let password_hash = hash_password(&request.new_password, state.config.bcrypt_cost)?;
    update_password(&state.db_pool, account.id, &password_hash).await?;
    tracing::info!("Password changed: {}", account.id);

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/auth/me/avatar (multipart, field `image`)
pub async fn upload_avatar(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> Result<Json<UserProfile>, BackendError> {
    let path = save_image(multipart, &state.config.uploads_dir, AVATARS, user.id()).await?;
    let updated = set_avatar(&state.db_pool, user.id(), &path).await?;
    Ok(Json(updated.to_profile()))
}

/// GET /api/auth/navigation
pub async fn get_navigation(user: AuthUser) -> Json<Navigation> {
    Json(navigation_for(user.role()))
}
