//! Authentication test helpers

use family_gym::backend::auth::passwords::hash_password;
use family_gym::backend::auth::sessions::create_token;
use family_gym::backend::auth::users::{create_user, NewUser};
use family_gym::shared::Role;
use uuid::Uuid;

use super::app::TestApp;

pub const PASSWORD: &str = "password123";

/// Test user credentials
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub token: String,
}

/// Insert an account directly and mint its token
pub async fn create_test_user(app: &TestApp, email: &str, role: Role) -> TestUser {
    let hash = hash_password(PASSWORD, 4).expect("hash");
    let name = email.split('@').next().unwrap_or(email);
    let user = create_user(&app.state.db_pool, NewUser::new(email, hash, name, role))
        .await
        .expect("create user");
    let token = create_token(&app.state.config, user.id, &user.email, user.role).expect("token");
    TestUser {
        id: user.id,
        email: user.email,
        token,
    }
}

pub async fn admin(app: &TestApp) -> TestUser {
    create_test_user(app, "admin@gym.test", Role::Admin).await
}

pub async fn receptionist(app: &TestApp) -> TestUser {
    create_test_user(app, "desk@gym.test", Role::Receptionist).await
}

pub async fn trainer(app: &TestApp, email: &str) -> TestUser {
    create_test_user(app, email, Role::Trainer).await
}

pub async fn customer(app: &TestApp, email: &str) -> TestUser {
    create_test_user(app, email, Role::Customer).await
}
