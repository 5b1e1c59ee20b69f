//! Maintenance record types

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::{FieldErrors, SharedError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ssr", derive(sqlx::Type))]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "ssr", sqlx(rename_all = "snake_case"))]
pub enum MaintenanceStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl MaintenanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceStatus::Scheduled => "scheduled",
            MaintenanceStatus::InProgress => "in_progress",
            MaintenanceStatus::Completed => "completed",
            MaintenanceStatus::Cancelled => "cancelled",
        }
    }

    /// Completed and cancelled records no longer hold the machine
    pub fn is_closed(&self) -> bool {
        matches!(self, MaintenanceStatus::Completed | MaintenanceStatus::Cancelled)
    }
}

impl fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaintenanceStatus {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scheduled" => Ok(MaintenanceStatus::Scheduled),
            "in_progress" => Ok(MaintenanceStatus::InProgress),
            "completed" => Ok(MaintenanceStatus::Completed),
            "cancelled" => Ok(MaintenanceStatus::Cancelled),
            _ => Err(SharedError::parse("maintenance status", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ssr", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    pub id: Uuid,
    pub equipment_id: Uuid,
    pub description: String,
    pub scheduled_date: NaiveDate,
    pub completed_date: Option<NaiveDate>,
    pub cost: Option<f64>,
    pub technician: Option<String>,
    pub status: MaintenanceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaintenanceRequest {
    pub equipment_id: Uuid,
    pub description: String,
    pub scheduled_date: NaiveDate,
    pub completed_date: Option<NaiveDate>,
    pub cost: Option<f64>,
    pub technician: Option<String>,
    pub status: Option<MaintenanceStatus>,
}

impl CreateMaintenanceRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.description.trim().is_empty() {
            errors.add("description", "Description is required");
        }
        check_cost(self.cost, &mut errors);
        check_completion(self.scheduled_date, self.completed_date, &mut errors);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMaintenanceRequest {
    pub description: Option<String>,
    pub scheduled_date: Option<NaiveDate>,
    pub completed_date: Option<NaiveDate>,
    pub cost: Option<f64>,
    pub technician: Option<String>,
    pub status: Option<MaintenanceStatus>,
}

impl UpdateMaintenanceRequest {
    /// `current_scheduled` is the stored date, used when the body omits one
    pub fn validate(&self, current_scheduled: NaiveDate) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.description.as_deref().is_some_and(|d| d.trim().is_empty()) {
            errors.add("description", "Description cannot be empty");
        }
        check_cost(self.cost, &mut errors);
        check_completion(
            self.scheduled_date.unwrap_or(current_scheduled),
            self.completed_date,
            &mut errors,
        );
        errors.into_result()
    }
}

fn check_cost(cost: Option<f64>, errors: &mut FieldErrors) {
    if let Some(cost) = cost {
        if !cost.is_finite() || cost < 0.0 {
            errors.add("cost", "Cost must be zero or more");
        }
    }
}

fn check_completion(scheduled: NaiveDate, completed: Option<NaiveDate>, errors: &mut FieldErrors) {
    if completed.is_some_and(|done| done < scheduled) {
        errors.add("completedDate", "Completion date cannot be before the scheduled date");
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceQuery {
    pub equipment_id: Option<Uuid>,
    pub status: Option<MaintenanceStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpcomingQuery {
    pub days: Option<u32>,
}
