//! Membership Module
//!
//! The expiry sweep: customers whose membership end date has passed are
//! moved from `active` to `expired`. It runs once when the server starts,
//! then on `EXPIRY_SWEEP_SECS`, and on demand through
//! `POST /api/users/check-expired`.

pub mod sweep;

pub use sweep::{check_expired_memberships, spawn_expiry_sweep};
