/**
 * Equipment Database Operations
 */

use chrono::Utc;
use sqlx::{Executor, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::shared::gym::{CreateEquipmentRequest, Equipment, EquipmentQuery, EquipmentStatus, UpdateEquipmentRequest};

const EQUIPMENT_COLUMNS: &str = "id, name, category, brand, serial_number, purchase_date, price, \
     location, status, notes, image_url, created_at, updated_at";

/// Blank strings from forms are stored as NULL
fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub async fn create_equipment(pool: &SqlitePool, request: &CreateEquipmentRequest) -> Result<Equipment, sqlx::Error> {
    let now = Utc::now();
    sqlx::query_as::<_, Equipment>(&format!(
        r#"
        INSERT INTO equipment (id, name, category, brand, serial_number, purchase_date, price,
            location, status, notes, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING {EQUIPMENT_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(request.name.trim())
    .bind(request.category.trim())
    .bind(non_blank(&request.brand))
    .bind(non_blank(&request.serial_number))
    .bind(request.purchase_date)
    .bind(request.price)
    .bind(non_blank(&request.location))
    .bind(request.status.unwrap_or(EquipmentStatus::Available))
    .bind(&request.notes)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn get_equipment<'e, E>(executor: E, id: Uuid) -> Result<Option<Equipment>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Equipment>(&format!("SELECT {EQUIPMENT_COLUMNS} FROM equipment WHERE id = ?"))
        .bind(id)
        .fetch_optional(executor)
        .await
}

/// Filtered inventory, by name
pub async fn list_equipment(pool: &SqlitePool, query: &EquipmentQuery) -> Result<Vec<Equipment>, sqlx::Error> {
    let category = non_blank(&query.category);
    sqlx::query_as::<_, Equipment>(&format!(
        r#"
        SELECT {EQUIPMENT_COLUMNS} FROM equipment
        WHERE (? IS NULL OR status = ?)
          AND (? IS NULL OR category = ? COLLATE NOCASE)
        ORDER BY name COLLATE NOCASE
        "#
    ))
    .bind(query.status)
    .bind(query.status)
    .bind(category)
    .bind(category)
    .fetch_all(pool)
    .await
}

/// Apply changes; `None` fields keep their stored value
pub async fn update_equipment(
    pool: &SqlitePool,
    id: Uuid,
    request: &UpdateEquipmentRequest,
) -> Result<Equipment, sqlx::Error> {
    sqlx::query_as::<_, Equipment>(&format!(
        r#"
        UPDATE equipment SET
            name = COALESCE(?, name),
            category = COALESCE(?, category),
            brand = COALESCE(?, brand),
            serial_number = COALESCE(?, serial_number),
            purchase_date = COALESCE(?, purchase_date),
            price = COALESCE(?, price),
            location = COALESCE(?, location),
            status = COALESCE(?, status),
            notes = COALESCE(?, notes),
            updated_at = ?
        WHERE id = ?
        RETURNING {EQUIPMENT_COLUMNS}
        "#
    ))
    .bind(request.name.as_deref().map(str::trim))
    .bind(request.category.as_deref().map(str::trim))
    .bind(non_blank(&request.brand))
    .bind(non_blank(&request.serial_number))
    .bind(request.purchase_date)
    .bind(request.price)
    .bind(non_blank(&request.location))
    .bind(request.status)
    .bind(&request.notes)
    .bind(Utc::now())
    .bind(id)
    .fetch_one(pool)
    .await
}

pub async fn set_equipment_status<'e, E>(executor: E, id: Uuid, status: EquipmentStatus) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("UPDATE equipment SET status = ?, updated_at = ? WHERE id = ?")
        .bind(status)
        .bind(Utc::now())
        .bind(id)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn set_equipment_image(pool: &SqlitePool, id: Uuid, image_url: &str) -> Result<Equipment, sqlx::Error> {
    sqlx::query_as::<_, Equipment>(&format!(
        "UPDATE equipment SET image_url = ?, updated_at = ? WHERE id = ? RETURNING {EQUIPMENT_COLUMNS}"
    ))
    .bind(image_url)
    .bind(Utc::now())
    .bind(id)
    .fetch_one(pool)
    .await
}

/// Delete a machine and, through the foreign key, its maintenance history
pub async fn delete_equipment(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM equipment WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
