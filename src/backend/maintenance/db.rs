/**
 * Maintenance Database Operations
 *
 * Writes that change a record's status take a connection so the handler can
 * update the record and its machine in one transaction.
 */

use chrono::{NaiveDate, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::backend::equipment::db::{get_equipment, set_equipment_status};
use crate::shared::gym::{
    CreateMaintenanceRequest, EquipmentStatus, MaintenanceQuery, MaintenanceRecord, MaintenanceStatus,
    UpdateMaintenanceRequest,
};

const MAINTENANCE_COLUMNS: &str = "id, equipment_id, description, scheduled_date, completed_date, \
     cost, technician, status, created_at, updated_at";

pub async fn get_maintenance(pool: &SqlitePool, id: Uuid) -> Result<Option<MaintenanceRecord>, sqlx::Error> {
    sqlx::query_as::<_, MaintenanceRecord>(&format!(
        "SELECT {MAINTENANCE_COLUMNS} FROM maintenance WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Filtered records, most recently scheduled first
pub async fn list_maintenance(
    pool: &SqlitePool,
    query: &MaintenanceQuery,
) -> Result<Vec<MaintenanceRecord>, sqlx::Error> {
    sqlx::query_as::<_, MaintenanceRecord>(&format!(
        r#"
        SELECT {MAINTENANCE_COLUMNS} FROM maintenance
        WHERE (? IS NULL OR equipment_id = ?)
          AND (? IS NULL OR status = ?)
        ORDER BY scheduled_date DESC, created_at DESC
        "#
    ))
    .bind(query.equipment_id)
    .bind(query.equipment_id)
    .bind(query.status)
    .bind(query.status)
    .fetch_all(pool)
    .await
}

/// Scheduled records due between `from` and `to` inclusive, soonest first
pub async fn upcoming_maintenance(
    pool: &SqlitePool,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<MaintenanceRecord>, sqlx::Error> {
    sqlx::query_as::<_, MaintenanceRecord>(&format!(
        r#"
        SELECT {MAINTENANCE_COLUMNS} FROM maintenance
        WHERE status = ? AND scheduled_date >= ? AND scheduled_date <= ?
        ORDER BY scheduled_date ASC, created_at ASC
        "#
    ))
    .bind(MaintenanceStatus::Scheduled)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await
}

pub async fn insert_maintenance(
    conn: &mut SqliteConnection,
    request: &CreateMaintenanceRequest,
    status: MaintenanceStatus,
    completed_date: Option<NaiveDate>,
) -> Result<MaintenanceRecord, sqlx::Error> {
    let now = Utc::now();
    sqlx::query_as::<_, MaintenanceRecord>(&format!(
        r#"
        INSERT INTO maintenance (id, equipment_id, description, scheduled_date, completed_date,
            cost, technician, status, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING {MAINTENANCE_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(request.equipment_id)
    .bind(request.description.trim())
    .bind(request.scheduled_date)
    .bind(completed_date)
    .bind(request.cost)
    .bind(&request.technician)
    .bind(status)
    .bind(now)
    .bind(now)
    .fetch_one(conn)
    .await
}

/// Apply changes; `None` fields keep their stored value
pub async fn update_maintenance(
    conn: &mut SqliteConnection,
    id: Uuid,
    request: &UpdateMaintenanceRequest,
    completed_date: Option<NaiveDate>,
) -> Result<MaintenanceRecord, sqlx::Error> {
    sqlx::query_as::<_, MaintenanceRecord>(&format!(
        r#"
        UPDATE maintenance SET
            description = COALESCE(?, description),
            scheduled_date = COALESCE(?, scheduled_date),
            completed_date = COALESCE(?, completed_date),
            cost = COALESCE(?, cost),
            technician = COALESCE(?, technician),
            status = COALESCE(?, status),
            updated_at = ?
        WHERE id = ?
        RETURNING {MAINTENANCE_COLUMNS}
        "#
    ))
    .bind(request.description.as_deref().map(str::trim))
    .bind(request.scheduled_date)
    .bind(completed_date)
    .bind(request.cost)
    .bind(&request.technician)
    .bind(request.status)
    .bind(Utc::now())
    .bind(id)
    .fetch_one(conn)
    .await
}

pub async fn delete_maintenance(conn: &mut SqliteConnection, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM maintenance WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

async fn count_in_progress(conn: &mut SqliteConnection, equipment_id: Uuid) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM maintenance WHERE equipment_id = ? AND status = ?")
        .bind(equipment_id)
        .bind(MaintenanceStatus::InProgress)
        .fetch_one(conn)
        .await?;
    Ok(count)
}

/// Bring a machine's status in line after one of its records changed
///
/// `previous` is the record's status before the change (`None` for a new
/// record); `next` is `None` when the record was deleted.
pub async fn sync_equipment_status(
    conn: &mut SqliteConnection,
    equipment_id: Uuid,
    previous: Option<MaintenanceStatus>,
    next: Option<MaintenanceStatus>,
) -> Result<(), sqlx::Error> {
    if next == Some(MaintenanceStatus::InProgress) {
        return set_equipment_status(&mut *conn, equipment_id, EquipmentStatus::Maintenance).await;
    }

    let released = next.map_or(true, |s| s.is_closed()) || previous == Some(MaintenanceStatus::InProgress);
    if !released {
        return Ok(());
    }

    let Some(equipment) = get_equipment(&mut *conn, equipment_id).await? else {
        return Ok(());
    };
    if equipment.status == EquipmentStatus::Maintenance && count_in_progress(conn, equipment_id).await? == 0 {
        set_equipment_status(&mut *conn, equipment_id, EquipmentStatus::Available).await?;
        tracing::info!("Equipment {} back in service", equipment_id);
    }
    Ok(())
}
