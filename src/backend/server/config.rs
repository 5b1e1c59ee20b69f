/**
 * Server Configuration
 *
 * Settings come from environment variables (after `.env` is loaded by the
 * binary). Every key has a default for local development; a key that is set
 * but cannot be parsed is a startup error.
 */

use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

use crate::backend::error::BackendError;

const DEV_JWT_SECRET: &str = "family-gym-dev-secret-change-me";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error("{0} must be set together with its pair")]
    Incomplete(&'static str),
}

/// Credentials of the admin account created on first start
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub token_ttl: chrono::Duration,
    pub cors_origin: String,
    pub uploads_dir: PathBuf,
    pub expiry_sweep_interval: Duration,
    pub bcrypt_cost: u32,
    pub admin: Option<AdminSeed>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            database_url: "sqlite://gym.db?mode=rwc".to_string(),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl: chrono::Duration::days(30),
            cors_origin: "http://localhost:3000".to_string(),
            uploads_dir: PathBuf::from("uploads"),
            expiry_sweep_interval: Duration::from_secs(24 * 60 * 60),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            admin: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let jwt_secret = match var("JWT_SECRET") {
            Some(secret) => secret,
            None => {
                tracing::warn!("JWT_SECRET not set, using an insecure development secret");
                defaults.jwt_secret
            }
        };

        let admin = match (var("ADMIN_EMAIL"), var("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(AdminSeed {
                email,
                password,
                full_name: var("ADMIN_NAME").unwrap_or_else(|| "System Administrator".to_string()),
            }),
            (None, None) => None,
            _ => return Err(ConfigError::Incomplete("ADMIN_EMAIL/ADMIN_PASSWORD")),
        };

        let bcrypt_cost: u32 = try_load("BCRYPT_COST", defaults.bcrypt_cost)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
                reason: "must be between 4 and 31".to_string(),
            });
        }

        Ok(Self {
            port: try_load("SERVER_PORT", defaults.port)?,
            database_url: var("DATABASE_URL").unwrap_or(defaults.database_url),
            jwt_secret,
            token_ttl: chrono::Duration::days(try_load("TOKEN_TTL_DAYS", 30i64)?),
            cors_origin: var("CORS_ORIGIN").unwrap_or(defaults.cors_origin),
            uploads_dir: var("UPLOADS_DIR").map(PathBuf::from).unwrap_or(defaults.uploads_dir),
            expiry_sweep_interval: sweep_interval(try_load(
                "EXPIRY_SWEEP_SECS",
                defaults.expiry_sweep_interval.as_secs(),
            )?)?,
            bcrypt_cost,
            admin,
        })
    }
}

/// The sweep timer needs a non-zero period
fn sweep_interval(secs: u64) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::InvalidValue {
            key: "EXPIRY_SWEEP_SECS",
            value: secs.to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}

fn var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn try_load<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match var(key) {
        None => {
            tracing::info!("{key} not set, using default: {default}");
            Ok(default)
        }
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

/// Connect to the database and bring the schema up to date
///
/// In-memory SQLite URLs get a single connection that is never recycled, so
/// the database lives exactly as long as the pool.
pub async fn load_database(database_url: &str) -> Result<SqlitePool, BackendError> {
    tracing::info!("Connecting to database...");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(8)
            .connect_with(options)
            .await?
    };

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database ready");

    Ok(pool)
}
