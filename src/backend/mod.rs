//! Backend Module
//!
//! All server-side code: an Axum HTTP server over an sqlx store, with JWT
//! authentication and role-guarded routes for every gym resource.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state and startup
//! - **`routes`** - Router assembly (public and protected routes)
//! - **`middleware`** - Bearer-token authentication and role checks
//! - **`auth`** - Accounts, password hashing, tokens, `/api/auth` handlers
//! - **`members`** - Customers and trainers (`/api/users`)
//! - **`staff`** - Receptionist accounts (`/api/staff`)
//! - **`equipment`** - Equipment inventory (`/api/equipment`)
//! - **`maintenance`** - Maintenance records (`/api/maintenance`)
//! - **`schedule`** - Trainer work schedules (`/api/schedules`)
//! - **`membership`** - The periodic membership expiry sweep
//! - **`uploads`** - Image uploads served under `/uploads`
//! - **`extract`** - `Json`, `Query` and `Path` extractors with JSON rejections
//! - **`error`** - Backend error type and its HTTP mapping
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs
//! ├── main.rs         - Binary entry point
//! ├── server/         - Config, state, init
//! ├── routes/         - Router
//! ├── middleware/     - Auth middleware
//! ├── auth/           - Accounts and auth handlers
//! ├── members/        - Customers and trainers
//! ├── staff/          - Receptionists
//! ├── equipment/      - Equipment
//! ├── maintenance/    - Maintenance records
//! ├── schedule/       - Work schedules
//! ├── membership/     - Expiry sweep
//! ├── uploads.rs      - Multipart image storage
//! ├── extract.rs      - Request extractors
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! Handlers share an `AppState` holding the connection pool and the loaded
//! `ServerConfig`. Both are cheap to clone (`SqlitePool` is reference
//! counted, the config sits behind an `Arc`).
//!
//! # Error Handling
//!
//! Handlers return `Result<_, BackendError>`; the error converts itself into
//! a JSON body with the matching status code.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and account storage
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Customers and trainers
pub mod members;

/// Receptionist accounts
pub mod staff;

/// Equipment inventory
pub mod equipment;

/// Equipment maintenance records
pub mod maintenance;

/// Trainer weekly schedules
pub mod schedule;

/// Membership expiry sweep
pub mod membership;

/// Image uploads
pub mod uploads;

/// Request extractors with JSON error rejections
pub mod extract;

#[cfg(test)]
pub(crate) mod test_support;

/// Re-export commonly used types
pub use error::BackendError;
pub use server::{create_app, AppState, ServerConfig};
