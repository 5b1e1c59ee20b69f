//! Roles and permissions
//!
//! Every account has exactly one [`Role`]. Route guards and the navigation
//! model both ask the predicates below, so the UI never offers an action the
//! API would refuse.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ssr", derive(sqlx::Type))]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "ssr", sqlx(rename_all = "lowercase"))]
pub enum Role {
    Admin,
    Receptionist,
    Trainer,
    Customer,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Receptionist, Role::Trainer, Role::Customer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Receptionist => "receptionist",
            Role::Trainer => "trainer",
            Role::Customer => "customer",
        }
    }

    fn is_staff(&self) -> bool {
        matches!(self, Role::Admin | Role::Receptionist)
    }

    pub fn can_manage_customers(&self) -> bool {
        self.is_staff()
    }

    pub fn can_delete_customers(&self) -> bool {
        *self == Role::Admin
    }

    pub fn can_manage_trainers(&self) -> bool {
        self.is_staff()
    }

    pub fn can_delete_trainers(&self) -> bool {
        *self == Role::Admin
    }

    pub fn can_manage_staff(&self) -> bool {
        *self == Role::Admin
    }

    pub fn can_view_equipment(&self) -> bool {
        self.is_staff()
    }

    pub fn can_update_equipment(&self) -> bool {
        self.is_staff()
    }

    pub fn can_create_equipment(&self) -> bool {
        *self == Role::Admin
    }

    pub fn can_delete_equipment(&self) -> bool {
        *self == Role::Admin
    }

    pub fn can_manage_maintenance(&self) -> bool {
        self.is_staff()
    }

    pub fn can_run_expiry_sweep(&self) -> bool {
        *self == Role::Admin
    }

    /// Staff may edit any trainer's week; a trainer only their own.
    pub fn can_manage_schedule_of(&self, actor_id: Uuid, trainer_id: Uuid) -> bool {
        self.is_staff() || (*self == Role::Trainer && actor_id == trainer_id)
    }

    /// Only front-desk roles get the sidebar layout.
    pub fn shows_sidebar(&self) -> bool {
        self.is_staff()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SharedError::parse("role", s))
    }
}

/// Account status
///
/// `expired` is set by the membership sweep; `inactive` is set by staff and
/// blocks sign-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ssr", derive(sqlx::Type))]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "ssr", sqlx(rename_all = "lowercase"))]
pub enum AccountStatus {
    Active,
    Expired,
    Inactive,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Expired => "expired",
            AccountStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountStatus {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(AccountStatus::Active),
            "expired" => Ok(AccountStatus::Expired),
            "inactive" => Ok(AccountStatus::Inactive),
            _ => Err(SharedError::parse("account status", s)),
        }
    }
}
