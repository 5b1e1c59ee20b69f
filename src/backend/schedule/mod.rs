//! Schedule Module
//!
//! Trainers' weekly work schedules under `/api/schedules`. Anyone signed in
//! may read a schedule; a trainer edits their own, front-desk staff edit any.

pub mod db;
pub mod handlers;

pub use handlers::{add_schedule_item, delete_schedule_item, get_schedule, my_schedule, replace_schedule};
