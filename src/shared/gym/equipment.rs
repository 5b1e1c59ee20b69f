//! Equipment types

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::{FieldErrors, SharedError};

/// Condition of a machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ssr", derive(sqlx::Type))]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "ssr", sqlx(rename_all = "snake_case"))]
pub enum EquipmentStatus {
    Available,
    InUse,
    Maintenance,
    Broken,
}

impl EquipmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentStatus::Available => "available",
            EquipmentStatus::InUse => "in_use",
            EquipmentStatus::Maintenance => "maintenance",
            EquipmentStatus::Broken => "broken",
        }
    }
}

impl fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EquipmentStatus {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(EquipmentStatus::Available),
            "in_use" => Ok(EquipmentStatus::InUse),
            "maintenance" => Ok(EquipmentStatus::Maintenance),
            "broken" => Ok(EquipmentStatus::Broken),
            _ => Err(SharedError::parse("equipment status", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ssr", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub brand: Option<String>,
    pub serial_number: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub price: Option<f64>,
    pub location: Option<String>,
    pub status: EquipmentStatus,
    pub notes: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEquipmentRequest {
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub brand: Option<String>,
    pub serial_number: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub price: Option<f64>,
    pub location: Option<String>,
    pub status: Option<EquipmentStatus>,
    pub notes: Option<String>,
}

impl CreateEquipmentRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.name.trim().is_empty() {
            errors.add("name", "Equipment name is required");
        }
        check_price(self.price, &mut errors);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEquipmentRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub serial_number: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub price: Option<f64>,
    pub location: Option<String>,
    pub status: Option<EquipmentStatus>,
    pub notes: Option<String>,
}

impl UpdateEquipmentRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            errors.add("name", "Equipment name cannot be empty");
        }
        check_price(self.price, &mut errors);
        errors.into_result()
    }
}

fn check_price(price: Option<f64>, errors: &mut FieldErrors) {
    if let Some(price) = price {
        if !price.is_finite() || price < 0.0 {
            errors.add("price", "Price must be zero or more");
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentQuery {
    pub status: Option<EquipmentStatus>,
    pub category: Option<String>,
}
