//! Staff Module
//!
//! Admin-only management of employee accounts under `/api/staff`.
//! Receptionists are the default; trainers can be managed here too.

pub mod handlers;

pub use handlers::{create_staff, delete_staff, get_staff, list_staff, update_staff};
