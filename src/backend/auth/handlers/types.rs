/**
 * Authentication Request and Response Types
 */

use serde::{Deserialize, Serialize};

use crate::shared::gym::members::{check_email, check_full_name, check_password};
use crate::shared::gym::UserProfile;
use crate::shared::FieldErrors;

/// Self-service sign-up; always creates a customer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone: Option<String>,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_email(&self.email, &mut errors);
        check_password("password", &self.password, &mut errors);
        check_full_name(&self.full_name, &mut errors);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token plus the account it was issued for
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

impl ChangePasswordRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_password("newPassword", &self.new_password, &mut errors);
        errors.into_result()
    }
}
