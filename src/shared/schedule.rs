//! Weekly work schedule rules
//!
//! A trainer's week is a set of slots, each a day of the week plus a
//! half-open `[start, end)` time range in 24-hour `HH:mm`. Input arrives as
//! loose strings from a form; [`ScheduleItemInput::validate`] turns it into a
//! [`ScheduleSlot`] or reports every offending field.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::shared::error::{FieldErrors, SharedError};

/// Day of the week, Monday first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weekday::ALL
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SharedError::parse("weekday", s))
    }
}

/// Wall-clock time with minute precision, stored as minutes past midnight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then(|| TimeOfDay(hour as u16 * 60 + minute as u16))
    }

    pub fn hour(&self) -> u8 {
        (self.0 / 60) as u8
    }

    pub fn minute(&self) -> u8 {
        (self.0 % 60) as u8
    }

    pub fn minutes_since_midnight(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = SharedError;

    /// Accepts exactly `HH:mm`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SharedError::parse("time (expected HH:mm)", s);
        let bytes = s.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(invalid());
        }
        let digits = [bytes[0], bytes[1], bytes[3], bytes[4]];
        if !digits.iter().all(u8::is_ascii_digit) {
            return Err(invalid());
        }
        let hour = (digits[0] - b'0') * 10 + (digits[1] - b'0');
        let minute = (digits[2] - b'0') * 10 + (digits[3] - b'0');
        TimeOfDay::new(hour, minute).ok_or_else(invalid)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One validated slot of a trainer's week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSlot {
    pub day: Weekday,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ScheduleSlot {
    /// Same day and the half-open ranges intersect; touching slots do not overlap.
    pub fn overlaps(&self, other: &ScheduleSlot) -> bool {
        self.day == other.day
            && self.start_time < other.end_time
            && other.start_time < self.end_time
    }

    pub fn duration_minutes(&self) -> u16 {
        self.end_time.minutes_since_midnight() - self.start_time.minutes_since_midnight()
    }

    /// Order by day of week, then start time
    pub fn chronological(a: &ScheduleSlot, b: &ScheduleSlot) -> Ordering {
        (a.day, a.start_time, a.end_time).cmp(&(b.day, b.start_time, b.end_time))
    }
}

/// Raw schedule entry as submitted by a client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItemInput {
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

const MAX_NOTE_LEN: usize = 200;

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl ScheduleItemInput {
    pub fn new(day: &str, start_time: &str, end_time: &str) -> Self {
        Self {
            day: Some(day.to_string()),
            start_time: Some(start_time.to_string()),
            end_time: Some(end_time.to_string()),
            note: None,
        }
    }

    /// Validate every field, collecting all errors
    pub fn validate(&self) -> Result<ScheduleSlot, FieldErrors> {
        let mut errors = FieldErrors::new();

        let day = match present(&self.day) {
            None => {
                errors.add("day", "Day of week is required");
                None
            }
            Some(raw) => match raw.parse::<Weekday>() {
                Ok(day) => Some(day),
                Err(_) => {
                    errors.add("day", format!("'{raw}' is not a day of the week"));
                    None
                }
            },
        };

        let start = parse_time(&self.start_time, "startTime", "Start time is required", &mut errors);
        let end = parse_time(&self.end_time, "endTime", "End time is required", &mut errors);

        if let (Some(start), Some(end)) = (start, end) {
            if start >= end {
                errors.add("endTime", "End time must be after start time");
            }
        }

        let note = present(&self.note).map(str::to_string);
        if note.as_ref().is_some_and(|n| n.chars().count() > MAX_NOTE_LEN) {
            errors.add("note", format!("Note must be at most {MAX_NOTE_LEN} characters"));
        }

        match (day, start, end) {
            (Some(day), Some(start_time), Some(end_time)) if errors.is_empty() => Ok(ScheduleSlot {
                day,
                start_time,
                end_time,
                note,
            }),
            _ => Err(errors),
        }
    }
}

fn parse_time(
    value: &Option<String>,
    field: &str,
    missing: &str,
    errors: &mut FieldErrors,
) -> Option<TimeOfDay> {
    match present(value) {
        None => {
            errors.add(field, missing);
            None
        }
        Some(raw) => match raw.parse() {
            Ok(time) => Some(time),
            Err(_) => {
                errors.add(field, format!("'{raw}' is not a valid time (HH:mm)"));
                None
            }
        },
    }
}

/// First existing slot that `candidate` would overlap
pub fn find_conflict<'a>(existing: &'a [ScheduleSlot], candidate: &ScheduleSlot) -> Option<&'a ScheduleSlot> {
    existing.iter().find(|slot| slot.overlaps(candidate))
}

/// Validate a full week of items and reject overlaps among them.
///
/// Errors are keyed `items[i].field`. On success the slots are returned in
/// chronological order.
pub fn validate_week(items: &[ScheduleItemInput]) -> Result<Vec<ScheduleSlot>, FieldErrors> {
    let mut errors = FieldErrors::new();
    let mut slots = Vec::with_capacity(items.len());

    for (i, item) in items.iter().enumerate() {
        match item.validate() {
            Ok(slot) => slots.push((i, slot)),
            Err(item_errors) => errors.extend_prefixed(&format!("items[{i}]"), item_errors),
        }
    }

    for (pos, (i, slot)) in slots.iter().enumerate() {
        if let Some((j, _)) = slots[..pos].iter().find(|(_, earlier)| earlier.overlaps(slot)) {
            errors.add(
                format!("items[{i}].startTime"),
                format!("Overlaps items[{j}] on {}", slot.day),
            );
        }
    }

    errors.into_result()?;

    let mut slots: Vec<ScheduleSlot> = slots.into_iter().map(|(_, slot)| slot).collect();
    slots.sort_by(ScheduleSlot::chronological);
    Ok(slots)
}
