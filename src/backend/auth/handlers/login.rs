/**
 * Login Handler
 *
 * POST /api/auth/login
 *
 * # Security
 *
 * - Unknown email and wrong password return the same 401
 * - Deactivated accounts get 403 after the password check, so the status
 *   is only revealed to someone who knows the password
 * - Expired customers may still log in to see their account
 */

use axum::extract::State;

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::passwords::verify_password;
use crate::backend::auth::sessions::create_token;
use crate::backend::auth::users::get_user_by_email;
use crate::backend::error::BackendError;
use crate::backend::extract::Json;
use crate::backend::server::state::AppState;
use crate::shared::AccountStatus;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - user not found or password incorrect
/// * `403 Forbidden` - account is inactive
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    tracing::info!("Login request for: {}", request.email);

    let user = get_user_by_email(&state.db_pool, &request.email)
        .await?
        .ok_or_else(|| {
            tracing::warn!("User not found: {}", request.email);
            BackendError::unauthorized(INVALID_CREDENTIALS)
        })?;

    if !verify_password(&request.password, &user.password_hash) {
        tracing::warn!("Invalid password for user: {}", request.email);
        return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
    }

    if user.status == AccountStatus::Inactive {
        tracing::warn!("Login refused for inactive account: {}", user.email);
        return Err(BackendError::forbidden("Account has been deactivated"));
    }

    let token = create_token(&state.config, user.id, &user.email, user.role)?;

    tracing::info!("User logged in successfully: {} ({})", user.email, user.role);

    Ok(Json(AuthResponse {
        token,
        user: user.to_profile(),
    }))
}
