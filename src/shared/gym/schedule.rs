//! Schedule request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::schedule::{ScheduleItemInput, ScheduleSlot};

/// A stored slot of a trainer's week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    pub id: Uuid,
    pub trainer_id: Uuid,
    #[serde(flatten)]
    pub slot: ScheduleSlot,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainerSchedule {
    pub trainer_id: Uuid,
    pub trainer_name: String,
    pub items: Vec<ScheduleItem>,
    /// Sum of all slot lengths
    pub weekly_minutes: u32,
}

impl TrainerSchedule {
    pub fn new(trainer_id: Uuid, trainer_name: String, items: Vec<ScheduleItem>) -> Self {
        let weekly_minutes = items.iter().map(|i| i.slot.duration_minutes() as u32).sum();
        Self {
            trainer_id,
            trainer_name,
            items,
            weekly_minutes,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplaceScheduleRequest {
    #[serde(default)]
    pub items: Vec<ScheduleItemInput>,
}
