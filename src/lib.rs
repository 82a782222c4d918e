//! treeforum - Forum Backend Library
//!
//! A discussion-forum backend: forums contain threads, threads contain posts
//! arranged in reply trees, users vote on threads.
//!
//! # Overview
//!
//! The interesting part is the post-tree engine in `store`:
//! - Materialized-path storage for reply forests
//! - Three traversal orders (flat, tree, parent-tree), each with
//!   forward/backward cursor pagination
//! - Atomic bulk insertion that preserves the tree-ordering invariants
//!
//! # Module Structure
//!
//! - **`model`** - Wire types shared by handlers and the store
//! - **`store`** - The storage engine: tables, path index, traversal
//! - **`error`** - Error taxonomy and HTTP conversion
//! - **`handlers`** - Axum HTTP handlers per resource
//! - **`routes`** - Route table and router assembly
//! - **`server`** - Configuration, application state, and assembly

pub mod error;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod server;
pub mod store;
