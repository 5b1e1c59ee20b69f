//! Maintenance Module
//!
//! Service records for equipment under `/api/maintenance`. Record status
//! drives the status of the machine it belongs to:
//!
//! - a record entering `in_progress` puts the machine in `maintenance`
//! - closing a record (or deleting or rescheduling one that was in progress)
//!   returns the machine to `available` once no other record holds it

pub mod db;
pub mod handlers;

pub use handlers::{
    create_maintenance, delete_maintenance, get_maintenance, list_maintenance, update_maintenance,
    upcoming_maintenance,
};
