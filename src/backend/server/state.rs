/**
 * Application State Management
 *
 * `AppState` is the single state type of the router. The `FromRef`
 * implementations let handlers extract only the part they need, e.g.
 * `State(pool): State<SqlitePool>`.
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::server::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    /// Connection pool for the gym database
    pub db_pool: SqlitePool,

    /// Configuration loaded at startup
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, config: ServerConfig) -> Self {
        Self {
            db_pool,
            config: Arc::new(config),
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
