/**
 * Register Handler
 *
 * POST /api/auth/register. Public sign-up always creates a customer
 * account with no membership; staff accounts are created by an admin.
 */

use axum::{extract::State, http::StatusCode};

use crate::backend::auth::handlers::types::{AuthResponse, RegisterRequest};
use crate::backend::auth::passwords::hash_password;
use crate::backend::auth::sessions::create_token;
use crate::backend::auth::users::{create_user, get_user_by_email, NewUser};
use crate::backend::error::BackendError;
use crate::backend::extract::Json;
use crate::backend::server::state::AppState;
use crate::shared::Role;

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - invalid email, short password or empty name
/// * `409 Conflict` - the email is already registered
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), BackendError> {
    request.validate()?;
    tracing::info!("Register request for: {}", request.email);

    if get_user_by_email(&state.db_pool, &request.email).await?.is_some() {
        tracing::warn!("Email already registered: {}", request.email);
        return Err(BackendError::conflict("Email is already registered"));
    }

    let password_hash = hash_password(&request.password, state.config.bcrypt_cost)?;
    let mut new_user = NewUser::new(&request.email, password_hash, &request.full_name, Role::Customer);
    new_user.phone = request.phone;

    let user = create_user(&state.db_pool, new_user).await?;
    let token = create_token(&state.config, user.id, &user.email, user.role)?;

    tracing::info!("Customer registered: {} ({})", user.full_name, user.id);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.to_profile(),
        }),
    ))
}
