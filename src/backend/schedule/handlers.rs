/**
 * Schedule Handlers
 *
 * # Overlaps
 *
 * Adding a single item that overlaps an existing one is a 409. Replacing
 * the week validates the whole set first and reports every bad item as a
 * field error, so nothing is written unless the new week is consistent.
 */

use axum::{extract::State, http::StatusCode};
use uuid::Uuid;

use crate::backend::auth::users::User;
use crate::backend::error::BackendError;
use crate::backend::extract::{Json, Path};
use crate::backend::members::db::require_account;
use crate::backend::middleware::AuthUser;
use crate::backend::schedule::db;
use crate::backend::server::state::AppState;
use crate::shared::gym::{ReplaceScheduleRequest, ScheduleItem, TrainerSchedule};
use crate::shared::schedule::{find_conflict, validate_week};
use crate::shared::{Role, ScheduleItemInput, ScheduleSlot};

fn check_editor(user: &AuthUser, trainer_id: Uuid) -> Result<(), BackendError> {
    if user.role().can_manage_schedule_of(user.id(), trainer_id) {
        Ok(())
    } else {
        Err(BackendError::forbidden("You may only edit your own schedule"))
    }
}

async fn load_schedule(state: &AppState, trainer: &User) -> Result<TrainerSchedule, BackendError> {
    let mut conn = state.db_pool.acquire().await?;
    let items = db::list_items(&mut conn, trainer.id).await?;
    Ok(TrainerSchedule::new(trainer.id, trainer.full_name.clone(), items))
}

/// GET /api/schedules/me
pub async fn my_schedule(State(state): State<AppState>, user: AuthUser) -> Result<Json<TrainerSchedule>, BackendError> {
    user.require_role(Role::Trainer, "view own schedule")?;
    let trainer = require_account(&state.db_pool, user.id(), Role::Trainer, "Trainer").await?;
    Ok(Json(load_schedule(&state, &trainer).await?))
}

/// GET /api/schedules/{trainer_id}
pub async fn get_schedule(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(trainer_id): Path<Uuid>,
) -> Result<Json<TrainerSchedule>, BackendError> {
    let trainer = require_account(&state.db_pool, trainer_id, Role::Trainer, "Trainer").await?;
    Ok(Json(load_schedule(&state, &trainer).await?))
}

/// POST /api/schedules/{trainer_id}
pub async fn add_schedule_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(trainer_id): Path<Uuid>,
    Json(input): Json<ScheduleItemInput>,
) -> Result<(StatusCode, Json<ScheduleItem>), BackendError> {
    check_editor(&user, trainer_id)?;
    require_account(&state.db_pool, trainer_id, Role::Trainer, "Trainer").await?;
    let slot = input.validate()?;

    let mut tx = state.db_pool.begin().await?;
    let existing: Vec<ScheduleSlot> = db::list_items(&mut tx, trainer_id)
        .await?
        .into_iter()
        .map(|item| item.slot)
        .collect();
    if let Some(conflict) = find_conflict(&existing, &slot) {
        return Err(BackendError::conflict(format!(
            "Overlaps {} {}-{}",
            conflict.day, conflict.start_time, conflict.end_time
        )));
    }
    let item = db::insert_item(&mut tx, trainer_id, slot).await?;
    tx.commit().await?;

    tracing::info!("Schedule item {} added for trainer {} by {}", item.id, trainer_id, user.id());
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/schedules/{trainer_id}
pub async fn replace_schedule(
    State(state): State<AppState>,
    user: AuthUser,
    Path(trainer_id): Path<Uuid>,
    Json(request): Json<ReplaceScheduleRequest>,
) -> Result<Json<TrainerSchedule>, BackendError> {
    check_editor(&user, trainer_id)?;
    let trainer = require_account(&state.db_pool, trainer_id, Role::Trainer, "Trainer").await?;
    let slots = validate_week(&request.items)?;

    let items = db::replace_items(&state.db_pool, trainer_id, slots).await?;
    tracing::info!("Schedule of trainer {} replaced ({} items) by {}", trainer_id, items.len(), user.id());
    Ok(Json(TrainerSchedule::new(trainer.id, trainer.full_name, items)))
}

/// DELETE /api/schedules/{trainer_id}/items/{item_id}
pub async fn delete_schedule_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path((trainer_id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, BackendError> {
    check_editor(&user, trainer_id)?;
    if !db::delete_item(&state.db_pool, trainer_id, item_id).await? {
        return Err(BackendError::not_found("Schedule item"));
    }
    Ok(StatusCode::NO_CONTENT)
}
