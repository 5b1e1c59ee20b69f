//! Server Module
//!
//! Configuration, shared state and startup for the Axum server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs      - Module exports and documentation
//! ├── state.rs    - AppState and FromRef implementations
//! ├── config.rs   - Environment configuration and database connection
//! └── init.rs     - App creation, admin bootstrap, background tasks
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration**: `ServerConfig::from_env` reads the environment
//! 2. **Database**: connect and run migrations
//! 3. **Bootstrap**: seed the first admin account if configured
//! 4. **Background Tasks**: start the membership expiry sweep
//! 5. **Router**: assemble public and protected routes

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::ServerConfig;
pub use init::create_app;
pub use state::AppState;
