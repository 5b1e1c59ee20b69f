//! Member, trainer and staff account types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::FieldErrors;
use crate::shared::membership::MembershipPlan;
use crate::shared::roles::{AccountStatus, Role};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Public view of any account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
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
    pub trainer_id: Option<Uuid>,
    pub specialization: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields any account holder may change about themself
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
}

impl UpdateProfileRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(name) = &self.full_name {
            check_full_name(name, &mut errors);
        }
        errors.into_result()
    }
}

/// Desk-created customer account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    /// Starts a membership of this length now
    pub plan: Option<MembershipPlan>,
    /// Explicit end date; ignored when `plan` is given
    pub membership_end: Option<DateTime<Utc>>,
    pub trainer_id: Option<Uuid>,
}

impl CreateCustomerRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_email(&self.email, &mut errors);
        check_password("password", &self.password, &mut errors);
        check_full_name(&self.full_name, &mut errors);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    #[serde(flatten)]
    pub profile: UpdateProfileRequest,
    pub email: Option<String>,
    pub membership_end: Option<DateTime<Utc>>,
}

impl UpdateCustomerRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = self.profile.validate().err().unwrap_or_default();
        if let Some(email) = &self.email {
            check_email(email, &mut errors);
        }
        errors.into_result()
    }
}

/// Trainer or receptionist account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStaffRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub specialization: Option<String>,
    /// Only honoured on `/api/staff`; defaults to receptionist there
    pub role: Option<Role>,
}

impl CreateStaffRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_email(&self.email, &mut errors);
        check_password("password", &self.password, &mut errors);
        check_full_name(&self.full_name, &mut errors);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStaffRequest {
    #[serde(flatten)]
    pub profile: UpdateProfileRequest,
    pub email: Option<String>,
    pub specialization: Option<String>,
}

impl UpdateStaffRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = self.profile.validate().err().unwrap_or_default();
        if let Some(email) = &self.email {
            check_email(email, &mut errors);
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewMembershipRequest {
    pub plan: MembershipPlan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignTrainerRequest {
    pub trainer_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetStatusRequest {
    pub status: AccountStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerQuery {
    pub status: Option<AccountStatus>,
    pub trainer_id: Option<Uuid>,
    /// Case-insensitive match on name, email or phone
    pub q: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffQuery {
    pub role: Option<Role>,
}

pub fn check_email(email: &str, errors: &mut FieldErrors) {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        errors.add("email", "Please enter a valid email address");
    }
}

pub fn check_password(field: &str, password: &str, errors: &mut FieldErrors) {
    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.add(field, format!("Password must be at least {MIN_PASSWORD_LEN} characters"));
    }
}

pub fn check_full_name(name: &str, errors: &mut FieldErrors) {
    if name.trim().is_empty() {
        errors.add("fullName", "Full name is required");
    }
}

/// Emails are compared case-insensitively
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
