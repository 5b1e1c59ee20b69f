//! Common test utilities and helpers
//!
//! - **`app`** - an in-memory application and a one-call request helper
//! - **`auth_helpers`** - accounts with ready-made tokens
//! - **`assertions`** - checks on the JSON error body

pub mod app;
pub mod assertions;
pub mod auth_helpers;

pub use app::*;
pub use assertions::*;
pub use auth_helpers::*;
