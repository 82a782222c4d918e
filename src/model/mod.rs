//! Wire Types
//!
//! Request and response bodies exchanged with API clients. Field names and
//! optionality follow the forum API: timestamps are RFC 3339, `isEdited` is
//! camel-cased, and absent optional fields are omitted from JSON output.
//!
//! # Module Structure
//!
//! - **`user`** - User profiles and profile updates
//! - **`forum`** - Forums and their aggregate counters
//! - **`thread`** - Threads, thread updates, and votes
//! - **`post`** - Posts, post batches, updates, and the `related` envelope
//! - **`status`** - Service-wide entity counts

pub mod forum;
pub mod post;
pub mod status;
pub mod thread;
pub mod user;

pub use forum::{Forum, NewForum};
pub use post::{NewPost, Post, PostFull, PostUpdate};
pub use status::Status;
pub use thread::{NewThread, Thread, ThreadUpdate, Vote};
pub use user::{NewUser, User, UserUpdate};
