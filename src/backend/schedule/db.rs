/**
 * Schedule Database Operations
 *
 * Days and times are stored as their wire strings ("Monday", "08:30") and
 * parsed back through the shared schedule types on load.
 */

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::shared::gym::ScheduleItem;
use crate::shared::{ScheduleSlot, SharedError};

#[derive(Debug, sqlx::FromRow)]
struct ScheduleRow {
    id: Uuid,
    trainer_id: Uuid,
    day: String,
    start_time: String,
    end_time: String,
    note: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ScheduleRow> for ScheduleItem {
    type Error = SharedError;

    fn try_from(row: ScheduleRow) -> Result<Self, Self::Error> {
        Ok(ScheduleItem {
            id: row.id,
            trainer_id: row.trainer_id,
            slot: ScheduleSlot {
                day: row.day.parse()?,
                start_time: row.start_time.parse()?,
                end_time: row.end_time.parse()?,
                note: row.note,
            },
            created_at: row.created_at,
        })
    }
}

/// A trainer's items in week order
pub async fn list_items(conn: &mut SqliteConnection, trainer_id: Uuid) -> Result<Vec<ScheduleItem>, sqlx::Error> {
    let rows: Vec<ScheduleRow> = sqlx::query_as(
        "SELECT id, trainer_id, day, start_time, end_time, note, created_at FROM schedule_items WHERE trainer_id = ?",
    )
    .bind(trainer_id)
    .fetch_all(conn)
    .await?;

    let mut items = rows
        .into_iter()
        .map(ScheduleItem::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
    items.sort_by(|a, b| ScheduleSlot::chronological(&a.slot, &b.slot));
    Ok(items)
}

pub async fn insert_item(
    conn: &mut SqliteConnection,
    trainer_id: Uuid,
    slot: ScheduleSlot,
) -> Result<ScheduleItem, sqlx::Error> {
    let item = ScheduleItem {
        id: Uuid::new_v4(),
        trainer_id,
        slot,
        created_at: Utc::now(),
    };
    sqlx::query(
        r#"
        INSERT INTO schedule_items (id, trainer_id, day, start_time, end_time, note, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(item.id)
    .bind(item.trainer_id)
    .bind(item.slot.day.as_str())
    .bind(item.slot.start_time.to_string())
    .bind(item.slot.end_time.to_string())
    .bind(&item.slot.note)
    .bind(item.created_at)
    .execute(conn)
    .await?;
    Ok(item)
}

/// Swap a trainer's whole week for `slots` in one transaction
pub async fn replace_items(
    pool: &SqlitePool,
    trainer_id: Uuid,
    slots: Vec<ScheduleSlot>,
) -> Result<Vec<ScheduleItem>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM schedule_items WHERE trainer_id = ?")
        .bind(trainer_id)
        .execute(&mut *tx)
        .await?;

    let mut items = Vec::with_capacity(slots.len());
    for slot in slots {
        items.push(insert_item(&mut tx, trainer_id, slot).await?);
    }

    tx.commit().await?;
    Ok(items)
}

/// Returns whether the item existed and belonged to the trainer
pub async fn delete_item(pool: &SqlitePool, trainer_id: Uuid, item_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM schedule_items WHERE id = ? AND trainer_id = ?")
        .bind(item_id)
        .bind(trainer_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
