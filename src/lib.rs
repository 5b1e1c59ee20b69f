//! Family Gym - Main Library
//!
//! Family Gym is the backend of a fitness-center management application. It
//! exposes a REST API for customers, trainers, staff, equipment, maintenance
//! records and trainer work schedules, gated by role.
//!
//! # Module Structure
//!
//! - **`shared`** - Types and rules that do not need the server stack
//!   - Roles, permissions and the role-based navigation model
//!   - Weekly schedule validation (days, `HH:mm` times, overlaps)
//!   - Membership plan arithmetic
//!   - Request/response types for every resource
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server, routing and auth middleware
//!   - Per-resource handlers over an sqlx store
//!   - The membership expiry sweep
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - enables the `backend` module and the server binary.
//!
//! # Usage
//!
//! ```rust,no_run
//! use family_gym::backend::server::{config::ServerConfig, init::create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(config).await?;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Roles
//!
//! Every authenticated request carries one of four roles: `admin`,
//! `receptionist`, `trainer` or `customer`. The same permission predicates
//! drive both the route guards and the navigation returned to clients.

/// Shared types and domain rules
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
