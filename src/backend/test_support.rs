//! Helpers shared by the backend's unit tests

use sqlx::SqlitePool;

use crate::backend::auth::passwords::hash_password;
use crate::backend::auth::users::{create_user, NewUser, User};
use crate::backend::middleware::{AuthUser, AuthenticatedUser};
use crate::backend::server::config::{load_database, ServerConfig};
use crate::shared::Role;

pub const TEST_PASSWORD: &str = "secret123";

/// Fresh in-memory database with the schema applied
pub async fn test_pool() -> SqlitePool {
    load_database("sqlite::memory:")
        .await
        .expect("in-memory database should open")
}

/// Development config with the cheapest bcrypt cost
pub fn test_config() -> ServerConfig {
    ServerConfig {
        bcrypt_cost: 4,
        ..Default::default()
    }
}

/// Insert an account whose password is `TEST_PASSWORD`
pub async fn insert_user(pool: &SqlitePool, email: &str, role: Role) -> User {
    let hash = hash_password(TEST_PASSWORD, 4).expect("hash should succeed");
    let name = email.split('@').next().unwrap_or(email).to_string();
    create_user(pool, NewUser::new(email, hash, name, role))
        .await
        .expect("user should insert")
}

/// What the middleware would attach for `account`
pub fn auth(account: &User) -> AuthUser {
    AuthUser(AuthenticatedUser {
        user_id: account.id,
        email: account.email.clone(),
        role: account.role,
        status: account.status,
    })
}
