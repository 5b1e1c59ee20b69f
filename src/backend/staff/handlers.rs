/**
 * Staff Handlers
 *
 * Every route requires the admin role. Customer accounts are not staff and
 * are reported as not found here; admins are listed but cannot be created
 * through the API.
 */

use axum::{extract::State, http::StatusCode};
use uuid::Uuid;

use crate::backend::auth::users::{get_user_by_id, list_users_by_role, User};
use crate::backend::error::BackendError;
use crate::backend::extract::{Json, Path, Query};
use crate::backend::members::db::delete_account;
use crate::backend::members::handlers::{create_staff_account, update_staff_account};
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::backend::uploads::{discard_images, AVATARS};
use crate::shared::gym::{CreateStaffRequest, StaffQuery, UpdateStaffRequest, UserProfile};
use crate::shared::Role;

async fn load_staff(state: &AppState, id: Uuid) -> Result<User, BackendError> {
    get_user_by_id(&state.db_pool, id)
        .await?
        .filter(|u| u.role != Role::Customer)
        .ok_or_else(|| BackendError::not_found("Staff member"))
}

/// GET /api/staff?role=
pub async fn list_staff(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<StaffQuery>,
) -> Result<Json<Vec<UserProfile>>, BackendError> {
    user.require(Role::can_manage_staff, "list staff")?;
    let role = query.role.unwrap_or(Role::Receptionist);
    if role == Role::Customer {
        return Err(BackendError::invalid_field("role", "Customers are not staff"));
    }
    let staff = list_users_by_role(&state.db_pool, role).await?;
    Ok(Json(staff.iter().map(User::to_profile).collect()))
}

/// POST /api/staff
pub async fn create_staff(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateStaffRequest>,
) -> Result<(StatusCode, Json<UserProfile>), BackendError> {
    user.require(Role::can_manage_staff, "create staff")?;
    let role = request.role.unwrap_or(Role::Receptionist);
    if !matches!(role, Role::Receptionist | Role::Trainer) {
        return Err(BackendError::invalid_field("role", "Staff role must be receptionist or trainer"));
    }

    let account = create_staff_account(&state, request, role).await?;
    tracing::info!("{} account {} created by {}", account.role, account.id, user.id());
    Ok((StatusCode::CREATED, Json(account.to_profile())))
}

/// GET /api/staff/{id}
pub async fn get_staff(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<UserProfile>, BackendError> {
    user.require(Role::can_manage_staff, "view staff")?;
    Ok(Json(load_staff(&state, id).await?.to_profile()))
}

/// PUT /api/staff/{id}
pub async fn update_staff(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStaffRequest>,
) -> Result<Json<UserProfile>, BackendError> {
    user.require(Role::can_manage_staff, "update staff")?;
    load_staff(&state, id).await?;
    let updated = update_staff_account(&state, id, request).await?;
    Ok(Json(updated.to_profile()))
}

/// DELETE /api/staff/{id}
pub async fn delete_staff(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, BackendError> {
    user.require(Role::can_manage_staff, "delete staff")?;
    if id == user.id() {
        return Err(BackendError::bad_request("You cannot delete your own account"));
    }
    load_staff(&state, id).await?;
    delete_account(&state.db_pool, id).await?;
    discard_images(&state.config.uploads_dir, AVATARS, id).await;
    tracing::info!("Staff account {} deleted by {}", id, user.id());
    Ok(StatusCode::NO_CONTENT)
}
