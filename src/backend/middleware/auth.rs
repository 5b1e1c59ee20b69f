/**
 * Authentication Middleware
 *
 * Protects every route behind it: extracts and verifies the bearer token,
 * re-loads the account so role and status changes take effect immediately,
 * and hands the result to handlers through request extensions.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::auth::sessions::verify_token;
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::{AccountStatus, Role};

/// Authenticated user data attached by the middleware
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
    pub status: AccountStatus,
}

/// Authentication middleware
///
/// Returns 401 if the token is missing, malformed, expired or names a
/// deleted account, and 403 if the account has been deactivated.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            BackendError::unauthorized("No token, authorization denied")
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("Invalid Authorization header format");
        BackendError::unauthorized("Invalid authorization header")
    })?;

    let claims = verify_token(&app_state.config, token).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        BackendError::unauthorized("Token is not valid")
    })?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|e| {
        tracing::warn!("Invalid user ID in token: {:?}", e);
        BackendError::unauthorized("Token is not valid")
    })?;

    let user = get_user_by_id(&app_state.db_pool, user_id).await?.ok_or_else(|| {
        tracing::warn!("Token for unknown user {}", user_id);
        BackendError::unauthorized("Account no longer exists")
    })?;

    if user.status == AccountStatus::Inactive {
        return Err(BackendError::forbidden("Account has been deactivated"));
    }

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: user.id,
        email: user.email,
        role: user.role,
        status: user.status,
    });

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl AuthUser {
    pub fn id(&self) -> Uuid {
        self.0.user_id
    }

    pub fn role(&self) -> Role {
        self.0.role
    }

    /// 403 unless `allowed` holds for the caller's role
    pub fn require(&self, allowed: impl Fn(&Role) -> bool, action: &str) -> Result<(), BackendError> {
        if allowed(&self.0.role) {
            Ok(())
        } else {
            tracing::warn!("{} ({}) may not {}", self.0.email, self.0.role, action);
            Err(BackendError::forbidden(format!("Your role may not {action}")))
        }
    }

    /// 403 unless the caller has exactly `role`
    pub fn require_role(&self, role: Role, action: &str) -> Result<(), BackendError> {
        self.require(|r| *r == role, action)
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::unauthorized("Not authenticated")
            })?;

        Ok(AuthUser(user))
    }
}
