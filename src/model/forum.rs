//! Forum types.

use serde::{Deserialize, Serialize};

/// A forum with its stored aggregate counters.
///
/// `posts` and `threads` are owned counters, incremented by the store in the
/// same critical section as the mutation that changes them; they are never
/// recomputed by scanning at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forum {
    pub title: String,
    /// Nickname of the forum owner, in its registered casing.
    pub user: String,
    pub slug: String,
    #[serde(default)]
    pub posts: i64,
    #[serde(default)]
    pub threads: i32,
}

/// Body of `POST /api/forum/create`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewForum {
    pub title: String,
    pub user: String,
    pub slug: String,
}
