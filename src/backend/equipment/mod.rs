//! Equipment Module
//!
//! The machine inventory under `/api/equipment`. Maintenance records live in
//! `backend::maintenance`; this module owns the rows they point at.

pub mod db;
pub mod handlers;

pub use handlers::{
    create_equipment, delete_equipment, equipment_maintenance, get_equipment, list_equipment,
    update_equipment, upload_equipment_image,
};
