/**
 * Member Handlers
 *
 * # Access
 *
 * - Customer register: admin and receptionist. Deleting: admin only.
 * - A single customer may also be read by their assigned trainer and by
 *   the customer themself.
 * - Trainer roster: readable by everyone signed in; managed by admin and
 *   receptionist; deleted by admin only.
 */

use axum::{extract::State, http::StatusCode};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::backend::auth::passwords::hash_password;
use crate::backend::auth::users::{
    create_user, list_users_by_role, set_status, update_profile, NewUser, User,
};
use crate::backend::error::BackendError;
use crate::backend::extract::{Json, Path, Query};
use crate::backend::members::db::{
    customers_of_trainer, delete_account, ensure_email_available, list_customers as query_customers,
    require_account, set_membership, set_trainer,
};
use crate::backend::membership::check_expired_memberships;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::backend::uploads::{discard_images, AVATARS};
use crate::shared::gym::{
    AssignTrainerRequest, CreateCustomerRequest, CreateStaffRequest, CustomerQuery,
    RenewMembershipRequest, SetStatusRequest, UpdateCustomerRequest, UpdateStaffRequest, UserProfile,
};
use crate::shared::membership::{renewal_end, status_after_update};
use crate::shared::{AccountStatus, Role};

fn profiles(users: Vec<User>) -> Json<Vec<UserProfile>> {
    Json(users.iter().map(User::to_profile).collect())
}

/// 400 unless `trainer_id` names a trainer account
async fn check_trainer_ref(state: &AppState, trainer_id: Uuid) -> Result<(), BackendError> {
    crate::backend::auth::users::get_user_with_role(&state.db_pool, trainer_id, Role::Trainer)
        .await?
        .map(|_| ())
        .ok_or_else(|| BackendError::invalid_field("trainerId", "Trainer not found"))
}

// ---------------------------------------------------------------------------
// Customers
// ---------------------------------------------------------------------------

/// GET /api/users/customers
pub async fn list_customers(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<CustomerQuery>,
) -> Result<Json<Vec<UserProfile>>, BackendError> {
    user.require(Role::can_manage_customers, "list customers")?;
    let customers = query_customers(&state.db_pool, &query).await?;
    Ok(profiles(customers))
}

/// POST /api/users/customers
///
/// A `plan` starts a membership now; otherwise an explicit `membershipEnd`
/// may be given. An end date already in the past creates the account as
/// expired.
pub async fn create_customer(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<UserProfile>), BackendError> {
    user.require(Role::can_manage_customers, "create customers")?;
    request.validate()?;
    ensure_email_available(&state.db_pool, &request.email, None).await?;
    if let Some(trainer_id) = request.trainer_id {
        check_trainer_ref(&state, trainer_id).await?;
    }

    let now = Utc::now();
    let (start, end) = match (request.plan, request.membership_end) {
        (Some(plan), _) => (Some(now), Some(plan.end_from(now))),
        (None, Some(end)) => (Some(now), Some(end)),
        (None, None) => (None, None),
    };

    let password_hash = hash_password(&request.password, state.config.bcrypt_cost)?;
    let mut new_user = NewUser::new(&request.email, password_hash, &request.full_name, Role::Customer);
    new_user.phone = request.phone;
    new_user.gender = request.gender;
    new_user.date_of_birth = request.date_of_birth;
    new_user.address = request.address;
    new_user.membership_type = request.plan;
    new_user.membership_start = start;
    new_user.membership_end = end;
    new_user.trainer_id = request.trainer_id;

    let mut customer = create_user(&state.db_pool, new_user).await?;
    let status = status_after_update(customer.status, end, now);
    if status != customer.status {
        customer = set_status(&state.db_pool, customer.id, status).await?;
    }

    tracing::info!("Customer {} created by {}", customer.id, user.id());
    Ok((StatusCode::CREATED, Json(customer.to_profile())))
}

/// GET /api/users/customers/{id}
pub async fn get_customer(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<UserProfile>, BackendError> {
    let customer = require_account(&state.db_pool, id, Role::Customer, "Customer").await?;

    let allowed = user.role().can_manage_customers()
        || customer.id == user.id()
        || (user.role() == Role::Trainer && customer.trainer_id == Some(user.id()));
    if !allowed {
        return Err(BackendError::forbidden("You may not view this customer"));
    }

    Ok(Json(customer.to_profile()))
}

/// PUT /api/users/customers/{id}
pub async fn update_customer(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCustomerRequest>,
) -> Result<Json<UserProfile>, BackendError> {
    user.require(Role::can_manage_customers, "update customers")?;
    request.validate()?;
    let customer = require_account(&state.db_pool, id, Role::Customer, "Customer").await?;
    if let Some(email) = &request.email {
        ensure_email_available(&state.db_pool, email, Some(id)).await?;
    }

    let mut tx = state.db_pool.begin().await?;
    let mut updated = update_profile(&mut *tx, id, &request.profile, request.email.as_deref(), None).await?;

    if let Some(end) = request.membership_end {
        let status = status_after_update(customer.status, Some(end), Utc::now());
        updated = set_membership(&mut *tx, id, None, None, Some(end), status).await?;
    }
    tx.commit().await?;

    Ok(Json(updated.to_profile()))
}

/// DELETE /api/users/customers/{id}
pub async fn delete_customer(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, BackendError> {
    user.require(Role::can_delete_customers, "delete customers")?;
    require_account(&state.db_pool, id, Role::Customer, "Customer").await?;
    delete_account(&state.db_pool, id).await?;
    discard_images(&state.config.uploads_dir, AVATARS, id).await;
    tracing::info!("Customer {} deleted by {}", id, user.id());
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/users/customers/{id}/renew
///
/// Remaining time on a running membership is kept. A lapsed one restarts
/// today. Renewal always leaves the account active.
pub async fn renew_membership(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<RenewMembershipRequest>,
) -> Result<Json<UserProfile>, BackendError> {
    user.require(Role::can_manage_customers, "renew memberships")?;
    let customer = require_account(&state.db_pool, id, Role::Customer, "Customer").await?;

    let now = Utc::now();
    let running = customer.membership_end.is_some_and(|end| end > now);
    let start = if running { None } else { Some(now) };
    let end = renewal_end(customer.membership_end, now, request.plan);

    let updated = set_membership(
        &state.db_pool,
        id,
        Some(request.plan),
        start,
        Some(end),
        AccountStatus::Active,
    )
    .await?;

    tracing::info!("Membership of {} renewed ({}) until {}", id, request.plan, end);
    Ok(Json(updated.to_profile()))
}

/// PUT /api/users/customers/{id}/trainer
pub async fn assign_trainer(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<AssignTrainerRequest>,
) -> Result<Json<UserProfile>, BackendError> {
    user.require(Role::can_manage_customers, "assign trainers")?;
    require_account(&state.db_pool, id, Role::Customer, "Customer").await?;
    if let Some(trainer_id) = request.trainer_id {
        check_trainer_ref(&state, trainer_id).await?;
    }

    let updated = set_trainer(&state.db_pool, id, request.trainer_id).await?;
    Ok(Json(updated.to_profile()))
}

/// PUT /api/users/customers/{id}/status
pub async fn set_customer_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<SetStatusRequest>,
) -> Result<Json<UserProfile>, BackendError> {
    user.require(Role::can_manage_customers, "change customer status")?;
    require_account(&state.db_pool, id, Role::Customer, "Customer").await?;
    let updated = set_status(&state.db_pool, id, request.status).await?;
    tracing::info!("Customer {} set to {} by {}", id, request.status, user.id());
    Ok(Json(updated.to_profile()))
}

/// GET /api/users/my-customers
pub async fn my_customers(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<UserProfile>>, BackendError> {
    user.require_role(Role::Trainer, "list assigned customers")?;
    let customers = customers_of_trainer(&state.db_pool, user.id()).await?;
    Ok(profiles(customers))
}

/// POST /api/users/check-expired
pub async fn check_expired(State(state): State<AppState>, user: AuthUser) -> Result<Json<Value>, BackendError> {
    user.require(Role::can_run_expiry_sweep, "run the expiry check")?;
    let ids = check_expired_memberships(&state.db_pool, Utc::now()).await?;
    Ok(Json(json!({ "expired": ids.len(), "ids": ids })))
}

// ---------------------------------------------------------------------------
// Trainers
// ---------------------------------------------------------------------------

/// GET /api/users/trainers
pub async fn list_trainers(State(state): State<AppState>, _user: AuthUser) -> Result<Json<Vec<UserProfile>>, BackendError> {
    let trainers = list_users_by_role(&state.db_pool, Role::Trainer).await?;
    Ok(profiles(trainers))
}

/// POST /api/users/trainers
pub async fn create_trainer(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateStaffRequest>,
) -> Result<(StatusCode, Json<UserProfile>), BackendError> {
    user.require(Role::can_manage_trainers, "create trainers")?;
    let trainer = create_staff_account(&state, request, Role::Trainer).await?;
    tracing::info!("Trainer {} created by {}", trainer.id, user.id());
    Ok((StatusCode::CREATED, Json(trainer.to_profile())))
}

/// GET /api/users/trainers/{id}
pub async fn get_trainer(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<UserProfile>, BackendError> {
    let trainer = require_account(&state.db_pool, id, Role::Trainer, "Trainer").await?;
    Ok(Json(trainer.to_profile()))
}

/// PUT /api/users/trainers/{id}
pub async fn update_trainer(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStaffRequest>,
) -> Result<Json<UserProfile>, BackendError> {
    user.require(Role::can_manage_trainers, "update trainers")?;
    require_account(&state.db_pool, id, Role::Trainer, "Trainer").await?;
    let updated = update_staff_account(&state, id, request).await?;
    Ok(Json(updated.to_profile()))
}

/// DELETE /api/users/trainers/{id}
///
/// Their customers become unassigned and their schedule is removed.
pub async fn delete_trainer(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, BackendError> {
    user.require(Role::can_delete_trainers, "delete trainers")?;
    require_account(&state.db_pool, id, Role::Trainer, "Trainer").await?;
    delete_account(&state.db_pool, id).await?;
    discard_images(&state.config.uploads_dir, AVATARS, id).await;
    tracing::info!("Trainer {} deleted by {}", id, user.id());
    Ok(StatusCode::NO_CONTENT)
}

/// Validate and insert a trainer or receptionist account
pub(crate) async fn create_staff_account(
    state: &AppState,
    request: CreateStaffRequest,
    role: Role,
) -> Result<User, BackendError> {
    request.validate()?;
    ensure_email_available(&state.db_pool, &request.email, None).await?;

    let password_hash = hash_password(&request.password, state.config.bcrypt_cost)?;
    let mut new_user = NewUser::new(&request.email, password_hash, &request.full_name, role);
    new_user.phone = request.phone;
    new_user.gender = request.gender;
    new_user.date_of_birth = request.date_of_birth;
    new_user.address = request.address;
    new_user.specialization = request.specialization;

    Ok(create_user(&state.db_pool, new_user).await?)
}

pub(crate) async fn update_staff_account(
    state: &AppState,
    id: Uuid,
    request: UpdateStaffRequest,
) -> Result<User, BackendError> {
    request.validate()?;
    if let Some(email) = &request.email {
        ensure_email_available(&state.db_pool, email, Some(id)).await?;
    }
    Ok(update_profile(
        &state.db_pool,
        id,
        &request.profile,
        request.email.as_deref(),
        request.specialization.as_deref(),
    )
    .await?)
}
