//! Authentication Module
//!
//! Accounts, password hashing, tokens and the `/api/auth` handlers.
//!
//! - **`users`** - the `users` table: every role lives in it
//! - **`passwords`** - bcrypt hashing and verification
//! - **`sessions`** - JWT creation and validation
//! - **`handlers`** - register, login and the caller's own account
//!
//! # Authentication Flow
//!
//! 1. **Register**: email, password and name → customer created → token returned
//! 2. **Login**: email and password verified → token returned
//! 3. **Protected routes**: `Authorization: Bearer <token>` checked by
//!    `middleware::auth_middleware`, which re-loads the account on every request
//!
//! Unknown emails and wrong passwords get the same 401 so accounts cannot be
//! enumerated. Deactivated accounts get 403.

/// User data model and database operations
pub mod users;

/// bcrypt password hashing
pub mod passwords;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::types::{AuthResponse, ChangePasswordRequest, LoginRequest, RegisterRequest};
pub use handlers::{change_password, get_me, get_navigation, login, register, update_me, upload_avatar};
