//! Post types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Forum, Thread, User};
use crate::store::{PostId, ThreadId};

/// A single post inside a thread's reply tree.
///
/// `parent` is absent for top-level posts and immutable once set. `is_edited`
/// flips to `true` on the first content change and never resets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<PostId>,
    pub author: String,
    pub message: String,
    #[serde(rename = "isEdited", default)]
    pub is_edited: bool,
    pub forum: String,
    pub thread: ThreadId,
    pub created: DateTime<Utc>,
}

/// One element of a `POST /api/thread/{slug_or_id}/create` batch.
///
/// `parent` may reference an already-persisted post of the target thread or an
/// earlier element of the same batch (by its assigned id); `0` and absence
/// both mean "top-level".
#[derive(Debug, Clone, Deserialize)]
pub struct NewPost {
    #[serde(default)]
    pub parent: Option<PostId>,
    pub author: String,
    pub message: String,
}

/// Body of `POST /api/post/{id}/details`. A missing or unchanged message is a
/// no-op that does not mark the post edited.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostUpdate {
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of `GET /api/post/{id}/details`: the post plus any related
/// entities requested through the `related` query parameter.
#[derive(Debug, Clone, Serialize)]
pub struct PostFull {
    pub post: Post,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread: Option<Thread>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forum: Option<Forum>,
}
