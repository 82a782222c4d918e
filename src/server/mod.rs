//! Server Module
//!
//! - **`config`** - environment-driven server configuration
//! - **`state`** - `AppState`, the state container handlers extract from
//! - **`init`** - application assembly

pub mod config;
pub mod init;
pub mod state;

pub use config::ServerConfig;
pub use init::create_app;
pub use state::AppState;
