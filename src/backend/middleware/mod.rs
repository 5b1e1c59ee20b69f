//! Middleware Module
//!
//! HTTP middleware for the backend server.
//!
//! - **`auth`** - Bearer-token authentication for protected routes, plus the
//!   `AuthUser` extractor handlers use for role checks
//!
//! # Example
//!
//! ```rust,ignore
//! let protected = Router::new()
//!     .route("/api/auth/me", get(get_me))
//!     .route_layer(axum::middleware::from_fn_with_state(state.clone(), auth_middleware));
//! ```

pub mod auth;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
