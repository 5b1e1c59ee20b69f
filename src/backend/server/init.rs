/**
 * Server Initialization
 *
 * # Initialization Process
 *
 * 1. Connect to the database and run migrations
 * 2. Seed the bootstrap admin when one is configured and none exists
 * 3. Start the membership expiry sweep
 * 4. Create and configure the router
 *
 * Startup fails on database or migration errors; there is nothing useful the
 * server can do without its store.
 */

use axum::Router;

use crate::backend::auth::passwords::hash_password;
use crate::backend::auth::users::{count_users_with_role, create_user, get_user_by_email, NewUser};
use crate::backend::error::BackendError;
use crate::backend::membership::spawn_expiry_sweep;
use crate::backend::routes::create_router;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::state::AppState;
use crate::shared::Role;

/// Create and configure the Axum application
pub async fn create_app(config: ServerConfig) -> Result<Router<()>, BackendError> {
    tracing::info!("Initializing Family Gym backend server");

    let db_pool = load_database(&config.database_url).await?;
    let app_state = AppState::new(db_pool, config);

    seed_admin(&app_state).await?;

    spawn_expiry_sweep(app_state.db_pool.clone(), app_state.config.expiry_sweep_interval);
    tracing::info!(
        "Membership expiry sweep scheduled every {}s",
        app_state.config.expiry_sweep_interval.as_secs()
    );

    Ok(create_router(app_state))
}

/// Create the configured admin account if the gym has no admin yet
///
/// Returns whether an account was created.
pub async fn seed_admin(app_state: &AppState) -> Result<bool, BackendError> {
    let Some(seed) = &app_state.config.admin else {
        return Ok(false);
    };

    if count_users_with_role(&app_state.db_pool, Role::Admin).await? > 0 {
        tracing::debug!("Admin account already present, skipping bootstrap");
        return Ok(false);
    }
    if get_user_by_email(&app_state.db_pool, &seed.email).await?.is_some() {
        tracing::warn!("ADMIN_EMAIL {} belongs to a non-admin account, not seeding", seed.email);
        return Ok(false);
    }

    let password_hash = hash_password(&seed.password, app_state.config.bcrypt_cost)?;
    let admin = create_user(
        &app_state.db_pool,
        NewUser::new(&seed.email, password_hash, &seed.full_name, Role::Admin),
    )
    .await?;

    tracing::info!("Bootstrap admin created: {}", admin.email);
    Ok(true)
}
