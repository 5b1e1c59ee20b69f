//! Route Configuration Module
//!
//! - **`router`** - assembles the full application router and its layers
//! - **`api_routes`** - the `/api` endpoint table, split into public and
//!   protected routes
//!
//! # Route Organization
//!
//! 1. **Health** - `GET /` answers "API is running"
//! 2. **Public API** - register and login
//! 3. **Protected API** - everything else, behind `auth_middleware`
//! 4. **Uploads** - static files from `UPLOADS_DIR` under `/uploads`
//! 5. **Fallback** - JSON 404 for unknown routes
//!
//! Role checks happen inside the handlers; the middleware only establishes
//! who the caller is.

/// Main router creation
pub mod router;

/// API endpoint table
pub mod api_routes;

pub use router::create_router;
