/**
 * Equipment Handlers
 *
 * Reading and editing the inventory is front-desk work (admin and
 * receptionist); adding and removing machines is admin only.
 */

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::backend::equipment::db;
use crate::backend::error::BackendError;
use crate::backend::extract::{Json, Path, Query};
use crate::backend::maintenance::db::list_maintenance;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::backend::uploads::{discard_images, save_image, EQUIPMENT};
use crate::shared::gym::{
    CreateEquipmentRequest, Equipment, EquipmentQuery, MaintenanceQuery, MaintenanceRecord,
    UpdateEquipmentRequest,
};
use crate::shared::Role;

pub(crate) async fn require_equipment(state: &AppState, id: Uuid) -> Result<Equipment, BackendError> {
    db::get_equipment(&state.db_pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found("Equipment"))
}

/// GET /api/equipment?status=&category=
pub async fn list_equipment(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<EquipmentQuery>,
) -> Result<Json<Vec<Equipment>>, BackendError> {
    user.require(Role::can_view_equipment, "view equipment")?;
    Ok(Json(db::list_equipment(&state.db_pool, &query).await?))
}

/// POST /api/equipment
pub async fn create_equipment(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateEquipmentRequest>,
) -> Result<(StatusCode, Json<Equipment>), BackendError> {
    user.require(Role::can_create_equipment, "add equipment")?;
    request.validate()?;
    let created = db::create_equipment(&state.db_pool, &request).await?;
    tracing::info!("Equipment {} ({}) added by {}", created.id, created.name, user.id());
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/equipment/{id}
pub async fn get_equipment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Equipment>, BackendError> {
    user.require(Role::can_view_equipment, "view equipment")?;
    Ok(Json(require_equipment(&state, id).await?))
}

/// PUT /api/equipment/{id}
pub async fn update_equipment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateEquipmentRequest>,
) -> Result<Json<Equipment>, BackendError> {
    user.require(Role::can_update_equipment, "update equipment")?;
    request.validate()?;
    require_equipment(&state, id).await?;
    Ok(Json(db::update_equipment(&state.db_pool, id, &request).await?))
}

/// DELETE /api/equipment/{id}
pub async fn delete_equipment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, BackendError> {
    user.require(Role::can_delete_equipment, "delete equipment")?;
    if !db::delete_equipment(&state.db_pool, id).await? {
        return Err(BackendError::not_found("Equipment"));
    }
    discard_images(&state.config.uploads_dir, EQUIPMENT, id).await;
    tracing::info!("Equipment {} deleted by {}", id, user.id());
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/equipment/{id}/image (multipart, field `image`)
pub async fn upload_equipment_image(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<Equipment>, BackendError> {
    user.require(Role::can_update_equipment, "update equipment")?;
    require_equipment(&state, id).await?;
    let path = save_image(multipart, &state.config.uploads_dir, EQUIPMENT, id).await?;
    Ok(Json(db::set_equipment_image(&state.db_pool, id, &path).await?))
}

/// GET /api/equipment/{id}/maintenance
pub async fn equipment_maintenance(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<MaintenanceRecord>>, BackendError> {
    user.require(Role::can_manage_maintenance, "view maintenance")?;
    require_equipment(&state, id).await?;
    let query = MaintenanceQuery {
        equipment_id: Some(id),
        status: None,
    };
    Ok(Json(list_maintenance(&state.db_pool, &query).await?))
}
