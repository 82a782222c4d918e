//! Route Configuration
//!
//! - **`router`** - top-level router assembly (API routes, tracing layer,
//!   404 fallback)
//! - **`api_routes`** - the `/api` route table

pub mod api_routes;
pub mod router;

pub use router::create_router;
