//! Backend Error Module
//!
//! Error types for the server and their conversion into HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # HTTP Response Conversion
//!
//! `BackendError` implements `IntoResponse`, so handlers return it directly.
//! The body is always JSON:
//!
//! ```json
//! { "error": "Equipment not found", "status": 404 }
//! ```
//!
//! Validation failures add an `errors` object mapping field names to messages.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::BackendError;
