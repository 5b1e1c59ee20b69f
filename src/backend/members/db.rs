/**
 * Member Database Operations
 *
 * Filtering, membership and assignment updates for customer rows, and the
 * account removal that keeps trainer references consistent.
 */

use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool};
use uuid::Uuid;

use crate::backend::auth::users::{delete_user, get_user_by_email, User, USER_COLUMNS};
use crate::backend::error::BackendError;
use crate::shared::gym::CustomerQuery;
use crate::shared::{AccountStatus, MembershipPlan, Role};

/// Escape `\`, `%` and `_` so user input matches literally under `ESCAPE '\'`
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Customers matching the optional filters, by name
pub async fn list_customers(pool: &SqlitePool, query: &CustomerQuery) -> Result<Vec<User>, sqlx::Error> {
    let pattern = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(|q| format!("%{}%", escape_like(&q.to_lowercase())));

    sqlx::query_as::<_, User>(&format!(
        r#"
        SELECT {USER_COLUMNS} FROM users
        WHERE role = ?
          AND (? IS NULL OR status = ?)
          AND (? IS NULL OR trainer_id = ?)
          AND (? IS NULL
               OR lower(full_name) LIKE ? ESCAPE '\'
               OR email LIKE ? ESCAPE '\'
               OR phone LIKE ? ESCAPE '\')
        ORDER BY full_name COLLATE NOCASE, email
        "#
    ))
    .bind(Role::Customer)
    .bind(query.status)
    .bind(query.status)
    .bind(query.trainer_id)
    .bind(query.trainer_id)
    .bind(&pattern)
    .bind(&pattern)
    .bind(&pattern)
    .bind(&pattern)
    .fetch_all(pool)
    .await
}

/// Customers assigned to a trainer
pub async fn customers_of_trainer(pool: &SqlitePool, trainer_id: Uuid) -> Result<Vec<User>, sqlx::Error> {
    list_customers(
        pool,
        &CustomerQuery {
            trainer_id: Some(trainer_id),
            ..Default::default()
        },
    )
    .await
}

/// Store a customer's membership window and the status that goes with it
pub async fn set_membership<'e, E>(
    executor: E,
    id: Uuid,
    plan: Option<MembershipPlan>,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    status: AccountStatus,
) -> Result<User, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users SET
            membership_type = COALESCE(?, membership_type),
            membership_start = COALESCE(?, membership_start),
            membership_end = ?,
            status = ?,
            updated_at = ?
        WHERE id = ?
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(plan)
    .bind(start)
    .bind(end)
    .bind(status)
    .bind(Utc::now())
    .bind(id)
    .fetch_one(executor)
    .await
}

pub async fn set_trainer(pool: &SqlitePool, customer_id: Uuid, trainer_id: Option<Uuid>) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET trainer_id = ?, updated_at = ? WHERE id = ? RETURNING {USER_COLUMNS}"
    ))
    .bind(trainer_id)
    .bind(Utc::now())
    .bind(customer_id)
    .fetch_one(pool)
    .await
}

/// Delete an account, unassigning its customers and dropping its schedule
///
/// Returns whether the account existed.
pub async fn delete_account(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let unassigned = sqlx::query("UPDATE users SET trainer_id = NULL, updated_at = ? WHERE trainer_id = ?")
        .bind(Utc::now())
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    sqlx::query("DELETE FROM schedule_items WHERE trainer_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let removed = delete_user(&mut *tx, id).await?;

    tx.commit().await?;

    if unassigned > 0 {
        tracing::info!("Unassigned {} customer(s) from deleted trainer {}", unassigned, id);
    }
    Ok(removed)
}

/// 409 if another account already uses `email`
pub async fn ensure_email_available(
    pool: &SqlitePool,
    email: &str,
    except: Option<Uuid>,
) -> Result<(), BackendError> {
    match get_user_by_email(pool, email).await? {
        Some(existing) if Some(existing.id) != except => {
            Err(BackendError::conflict("Email is already registered"))
        }
        _ => Ok(()),
    }
}

/// Load an account that must have `role`, or 404 naming `resource`
pub async fn require_account(
    pool: &SqlitePool,
    id: Uuid,
    role: Role,
    resource: &'static str,
) -> Result<User, BackendError> {
    crate::backend::auth::users::get_user_with_role(pool, id, role)
        .await?
        .ok_or_else(|| BackendError::not_found(resource))
}
