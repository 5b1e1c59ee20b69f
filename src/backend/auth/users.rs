/**
 * User Model and Database Operations
 *
 * One `users` table holds every account. The role decides which of the
 * optional columns are meaningful: membership columns for customers,
 * `specialization` for trainers.
 */

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Sqlite, SqlitePool};
use uuid::Uuid;

use crate::shared::gym::{UpdateProfileRequest, UserProfile};
use crate::shared::{AccountStatus, MembershipPlan, Role};

pub(crate) const USER_COLUMNS: &str = "id, email, password_hash, full_name, phone, role, status, \
     gender, date_of_birth, address, membership_type, membership_start, membership_end, \
     trainer_id, specialization, avatar_url, created_at, updated_at";

/// User struct representing a row of the `users` table
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub role: Role,
    pub status: AccountStatus,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub membership_type: Option<MembershipPlan>,
    pub membership_start: Option<DateTime<Utc>>,
    pub membership_end: Option<DateTime<Utc>>,
    /// Assigned trainer (customers only)
    pub trainer_id: Option<Uuid>,
    /// Trainer specialty (trainers only)
    pub specialization: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Public view without the password hash
    pub fn to_profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            phone: self.phone.clone(),
            role: self.role,
            status: self.status,
            gender: self.gender.clone(),
            date_of_birth: self.date_of_birth,
            address: self.address.clone(),
            membership_type: self.membership_type,
            membership_start: self.membership_start,
            membership_end: self.membership_end,
            trainer_id: self.trainer_id,
            specialization: self.specialization.clone(),
            avatar_url: self.avatar_url.clone(),
            created_at: self.created_at,
        }
    }
}

/// Values for a new account
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: Role,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub membership_type: Option<MembershipPlan>,
    pub membership_start: Option<DateTime<Utc>>,
    pub membership_end: Option<DateTime<Utc>>,
    pub trainer_id: Option<Uuid>,
    pub specialization: Option<String>,
}

impl NewUser {
    pub fn new(email: impl Into<String>, password_hash: String, full_name: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            password_hash,
            full_name: full_name.into(),
            role,
            phone: None,
            gender: None,
            date_of_birth: None,
            address: None,
            membership_type: None,
            membership_start: None,
            membership_end: None,
            trainer_id: None,
            specialization: None,
        }
    }
}

/// Create a new user
///
/// The email is stored trimmed and lowercased.
pub async fn create_user(pool: &SqlitePool, new_user: NewUser) -> Result<User, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (id, email, password_hash, full_name, phone, role, status, gender,
            date_of_birth, address, membership_type, membership_start, membership_end,
            trainer_id, specialization, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(crate::shared::gym::members::normalize_email(&new_user.email))
    .bind(&new_user.password_hash)
    .bind(new_user.full_name.trim())
    .bind(&new_user.phone)
    .bind(new_user.role)
    .bind(AccountStatus::Active)
    .bind(&new_user.gender)
    .bind(new_user.date_of_birth)
    .bind(&new_user.address)
    .bind(new_user.membership_type)
    .bind(new_user.membership_start)
    .bind(new_user.membership_end)
    .bind(new_user.trainer_id)
    .bind(&new_user.specialization)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    tracing::debug!("Created {} account {}", user.role, user.id);
    Ok(user)
}

/// Get user by email (case-insensitive)
pub async fn get_user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
        .bind(crate::shared::gym::members::normalize_email(email))
        .fetch_optional(pool)
        .await
}

/// Get user by ID
pub async fn get_user_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Get user by ID, only if it has the given role
pub async fn get_user_with_role(
    pool: &SqlitePool,
    id: Uuid,
    role: Role,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ? AND role = ?"))
        .bind(id)
        .bind(role)
        .fetch_optional(pool)
        .await
}

/// All accounts with a role, by name
pub async fn list_users_by_role(pool: &SqlitePool, role: Role) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE role = ? ORDER BY full_name COLLATE NOCASE, email"
    ))
    .bind(role)
    .fetch_all(pool)
    .await
}

pub async fn count_users_with_role(pool: &SqlitePool, role: Role) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE role = ?")
        .bind(role)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Apply profile changes; `None` fields keep their stored value
pub async fn update_profile<'e, E>(
    executor: E,
    id: Uuid,
    profile: &UpdateProfileRequest,
    email: Option<&str>,
    specialization: Option<&str>,
) -> Result<User, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users SET
            full_name = COALESCE(?, full_name),
            phone = COALESCE(?, phone),
            gender = COALESCE(?, gender),
            date_of_birth = COALESCE(?, date_of_birth),
            address = COALESCE(?, address),
            email = COALESCE(?, email),
            specialization = COALESCE(?, specialization),
            updated_at = ?
        WHERE id = ?
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(profile.full_name.as_deref().map(str::trim))
    .bind(&profile.phone)
    .bind(&profile.gender)
    .bind(profile.date_of_birth)
    .bind(&profile.address)
    .bind(email.map(crate::shared::gym::members::normalize_email))
    .bind(specialization)
    .bind(Utc::now())
    .bind(id)
    .fetch_one(executor)
    .await
}

pub async fn update_password(pool: &SqlitePool, id: Uuid, password_hash: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?")
        .bind(password_hash)
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn set_status(pool: &SqlitePool, id: Uuid, status: AccountStatus) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET status = ?, updated_at = ? WHERE id = ? RETURNING {USER_COLUMNS}"
    ))
    .bind(status)
    .bind(Utc::now())
    .bind(id)
    .fetch_one(pool)
    .await
}

pub async fn set_avatar(pool: &SqlitePool, id: Uuid, avatar_url: &str) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET avatar_url = ?, updated_at = ? WHERE id = ? RETURNING {USER_COLUMNS}"
    ))
    .bind(avatar_url)
    .bind(Utc::now())
    .bind(id)
    .fetch_one(pool)
    .await
}

/// Delete a user; returns whether a row was removed
///
/// Takes any executor so account removal can run inside a transaction.
pub async fn delete_user<'e, E>(executor: E, id: Uuid) -> Result<bool, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}
