/**
 * Membership Expiry Sweep
 *
 * Dates are compared with `shared::membership::is_expired` after loading the
 * candidates, so the rule is the same one the renewal endpoint uses.
 */

use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::shared::membership::is_expired;
use crate::shared::{AccountStatus, Role};

/// Mark every active customer whose membership has ended as expired
///
/// Runs in one transaction and returns the ids that changed. Customers
/// without an end date are never expired.
pub async fn check_expired_memberships(
    pool: &SqlitePool,
    now: DateTime<Utc>,
) -> Result<Vec<Uuid>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let candidates: Vec<(Uuid, DateTime<Utc>)> = sqlx::query_as(
        r#"
        SELECT id, membership_end FROM users
        WHERE role = ? AND status = ? AND membership_end IS NOT NULL
        "#,
    )
    .bind(Role::Customer)
    .bind(AccountStatus::Active)
    .fetch_all(&mut *tx)
    .await?;

    let mut expired = Vec::new();
    for (id, end) in candidates {
        if !is_expired(end, now) {
            continue;
        }
        sqlx::query("UPDATE users SET status = ?, updated_at = ? WHERE id = ?")
            .bind(AccountStatus::Expired)
            .bind(now)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        expired.push(id);
    }

    tx.commit().await?;

    if !expired.is_empty() {
        tracing::info!("Marked {} membership(s) as expired", expired.len());
    }
    Ok(expired)
}

/// Run the sweep now and then every `interval`
///
/// A failed pass is logged and the next tick tries again.
pub fn spawn_expiry_sweep(pool: SqlitePool, interval: Duration) -> JoinHandle<()> {
    let interval = if interval.is_zero() {
        tracing::warn!("Expiry sweep interval of zero, using 1s");
        Duration::from_secs(1)
    } else {
        interval
    };

    tokio::spawn(async move {
        // The first tick completes immediately.
        let mut interval = tokio::time::interval(interval);
        loop {
            interval.tick().await;
            match check_expired_memberships(&pool, Utc::now()).await {
                Ok(ids) => tracing::debug!("Expiry sweep finished, {} account(s) expired", ids.len()),
                Err(e) => tracing::error!("Expiry sweep failed: {:?}", e),
            }
        }
    })
}
