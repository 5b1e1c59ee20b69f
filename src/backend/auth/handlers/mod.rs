//! Authentication Handlers Module
//!
//! # Handlers
//!
//! - **`register`** - POST /api/auth/register - customer self sign-up
//! - **`login`** - POST /api/auth/login - email and password
//! - **`get_me`** / **`update_me`** - GET/PUT /api/auth/me
//! - **`change_password`** - PUT /api/auth/password
//! - **`upload_avatar`** - POST /api/auth/me/avatar
//! - **`get_navigation`** - GET /api/auth/navigation - sidebar and cards for the caller's role
//!
//! `register` and `login` are public; the rest sit behind `auth_middleware`.

/// Request and response types
pub mod types;

/// Register handler
pub mod register;

/// Login handler
pub mod login;

/// Current account handlers
pub mod me;

pub use types::{AuthResponse, ChangePasswordRequest, LoginRequest, RegisterRequest};

pub use login::login;
pub use me::{change_password, get_me, get_navigation, update_me, upload_avatar};
pub use register::register;
