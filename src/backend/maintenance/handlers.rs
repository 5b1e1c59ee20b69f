/**
 * Maintenance Handlers
 *
 * All routes are open to admin and receptionist. Status changes update the
 * record and its machine in one transaction.
 */

use axum::{extract::State, http::StatusCode};
use chrono::{Days, Utc};
use uuid::Uuid;

use crate::backend::equipment::db::get_equipment;
use crate::backend::error::BackendError;
use crate::backend::extract::{Json, Path, Query};
use crate::backend::maintenance::db;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::gym::{
    CreateMaintenanceRequest, MaintenanceQuery, MaintenanceRecord, MaintenanceStatus, UpcomingQuery,
    UpdateMaintenanceRequest,
};
use crate::shared::Role;

const DEFAULT_UPCOMING_DAYS: u32 = 7;
const MAX_UPCOMING_DAYS: u32 = 366;

async fn require_record(state: &AppState, id: Uuid) -> Result<MaintenanceRecord, BackendError> {
    db::get_maintenance(&state.db_pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found("Maintenance record"))
}

/// GET /api/maintenance?equipmentId=&status=
pub async fn list_maintenance(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<MaintenanceQuery>,
) -> Result<Json<Vec<MaintenanceRecord>>, BackendError> {
    user.require(Role::can_manage_maintenance, "view maintenance")?;
    Ok(Json(db::list_maintenance(&state.db_pool, &query).await?))
}

/// GET /api/maintenance/upcoming?days=7
pub async fn upcoming_maintenance(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<UpcomingQuery>,
) -> Result<Json<Vec<MaintenanceRecord>>, BackendError> {
    user.require(Role::can_manage_maintenance, "view maintenance")?;
    let days = query.days.unwrap_or(DEFAULT_UPCOMING_DAYS);
    if days > MAX_UPCOMING_DAYS {
        return Err(BackendError::invalid_field("days", format!("At most {MAX_UPCOMING_DAYS} days")));
    }

    let today = Utc::now().date_naive();
    let until = today.checked_add_days(Days::new(days.into())).unwrap_or(today);
    Ok(Json(db::upcoming_maintenance(&state.db_pool, today, until).await?))
}

/// GET /api/maintenance/{id}
pub async fn get_maintenance(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MaintenanceRecord>, BackendError> {
    user.require(Role::can_manage_maintenance, "view maintenance")?;
    Ok(Json(require_record(&state, id).await?))
}

/// POST /api/maintenance
///
/// # Errors
///
/// * `400 Bad Request` - invalid fields or unknown `equipmentId`
pub async fn create_maintenance(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateMaintenanceRequest>,
) -> Result<(StatusCode, Json<MaintenanceRecord>), BackendError> {
    user.require(Role::can_manage_maintenance, "schedule maintenance")?;
    request.validate()?;

    let status = request.status.unwrap_or(MaintenanceStatus::Scheduled);
    let completed_date = match (status, request.completed_date) {
        (MaintenanceStatus::Completed, None) => Some(Utc::now().date_naive()),
        (_, date) => date,
    };

    let mut tx = state.db_pool.begin().await?;
    if get_equipment(&mut *tx, request.equipment_id).await?.is_none() {
        return Err(BackendError::invalid_field("equipmentId", "Equipment not found"));
    }
    let record = db::insert_maintenance(&mut tx, &request, status, completed_date).await?;
    db::sync_equipment_status(&mut tx, record.equipment_id, None, Some(record.status)).await?;
    tx.commit().await?;

    tracing::info!("Maintenance {} ({}) created for equipment {}", record.id, record.status, record.equipment_id);
    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /api/maintenance/{id}
pub async fn update_maintenance(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateMaintenanceRequest>,
) -> Result<Json<MaintenanceRecord>, BackendError> {
    user.require(Role::can_manage_maintenance, "update maintenance")?;
    let current = require_record(&state, id).await?;
    request.validate(current.scheduled_date)?;

    let next_status = request.status.unwrap_or(current.status);
    let completed_date = match request.completed_date {
        None if next_status == MaintenanceStatus::Completed && current.completed_date.is_none() => {
            Some(Utc::now().date_naive())
        }
        date => date,
    };

    let mut tx = state.db_pool.begin().await?;
    let record = db::update_maintenance(&mut tx, id, &request, completed_date).await?;
    if record.status != current.status {
        db::sync_equipment_status(&mut tx, record.equipment_id, Some(current.status), Some(record.status)).await?;
    }
    tx.commit().await?;

    Ok(Json(record))
}

/// DELETE /api/maintenance/{id}
pub async fn delete_maintenance(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, BackendError> {
    user.require(Role::can_manage_maintenance, "delete maintenance")?;
    let current = require_record(&state, id).await?;

    let mut tx = state.db_pool.begin().await?;
    db::delete_maintenance(&mut tx, id).await?;
    db::sync_equipment_status(&mut tx, current.equipment_id, Some(current.status), None).await?;
    tx.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}
