//! Shared Module
//!
//! Types and rules that are independent of the HTTP server and the store.
//! Everything here serializes to the JSON the API speaks, and the validation
//! and permission rules are pure functions so they can be tested in isolation.

/// Shared error types
pub mod error;

/// Roles, account status and permission predicates
pub mod roles;

/// Role-based navigation model
pub mod navigation;

/// Weekly work-schedule rules
pub mod schedule;

/// Membership plans and expiry arithmetic
pub mod membership;

/// Request and response types for gym resources
pub mod gym;

/// Re-export commonly used types for convenience
pub use error::{FieldErrors, SharedError};
pub use membership::MembershipPlan;
pub use navigation::{navigation_for, Navigation};
pub use roles::{AccountStatus, Role};
pub use schedule::{ScheduleItemInput, ScheduleSlot, TimeOfDay, Weekday};
