//! Thread and vote types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::ThreadId;

/// A discussion thread inside a forum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    pub id: ThreadId,
    pub title: String,
    /// Nickname of the thread author, in its registered casing.
    pub author: String,
    pub forum: String,
    pub message: String,
    #[serde(default)]
    pub votes: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub created: DateTime<Utc>,
}

/// Body of `POST /api/forum/{slug}/create`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewThread {
    pub title: String,
    pub author: String,
    pub message: String,
    /// Client-supplied creation time; defaults to "now" when omitted.
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub slug: Option<String>,
}

/// Partial thread update. Missing fields keep their current values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThreadUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A user's voice on a thread. Re-voting replaces the previous voice, and the
/// thread tally moves by the difference.
#[derive(Debug, Clone, Deserialize)]
pub struct Vote {
    pub nickname: String,
    /// `1` or `-1`.
    pub voice: i32,
}
