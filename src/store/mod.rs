//! Storage Engine
//!
//! In-process storage for the whole forum: users, forums, threads, posts,
//! and votes. The centerpiece is the post-tree engine — materialized-path
//! storage (`path`), atomic bulk insertion (`posts`), and the three traversal
//! orders with cursor pagination (`traversal`). The remaining modules are the
//! collaborators those operations need: user, forum, and thread tables.
//!
//! # Concurrency
//!
//! `ForumStore` wraps one `Database` in `Arc<RwLock<...>>`. Every mutating
//! operation runs inside a single write-lock section, which gives batch
//! atomicity for free: a post batch either lands completely — rows, tree
//! index entries, and aggregate counters — or not at all, and a concurrent
//! insertion against the same thread either sees another batch's parents
//! fully persisted or not at all. Reads take the read lock and operate on a
//! consistent snapshot without blocking each other.
//!
//! Aggregate counters (`forum.posts`, `forum.threads`, `thread.votes`) are
//! incremented inside the owning critical section, never recomputed by
//! scanning at read time.
//!
//! # Ordering indexes
//!
//! Per thread the engine keeps two indexes next to the row table:
//!
//! - `in_order: Vec<PostId>` — creation order, which within a thread equals
//!   ascending id order; flat pagination is slicing over this vector.
//! - `by_path: BTreeMap<PostPath, PostId>` — depth-first tree order; tree and
//!   parent-tree pagination are range scans over this map.

pub mod forums;
pub mod path;
pub mod posts;
pub mod threads;
pub mod traversal;
pub mod users;

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::StoreError;
use crate::model::{Forum, Post, Status, Thread, User};

pub use path::PostPath;
pub use traversal::{PostQuery, PostSort};

/// Post identity: globally unique, strictly increasing in creation order.
pub type PostId = i64;
/// Thread identity.
pub type ThreadId = i32;

/// Outcome of an insert that may collide with existing state. `Exists`
/// carries what the caller reports in the conflict response.
#[derive(Debug, Clone)]
pub enum Created<T, E = T> {
    New(T),
    Exists(E),
}

/// Case-insensitive lookup key for nicknames, emails, and slugs. The
/// original casing is preserved on the stored record.
pub(crate) fn ci_key(value: &str) -> String {
    value.to_lowercase()
}

#[derive(Debug, Clone)]
pub(crate) struct ForumRecord {
    pub(crate) forum: Forum,
    /// Forum members: everyone who authored a thread or post here.
    /// Keyed by folded nickname (iteration order is the listing order),
    /// value is the registered casing. Set semantics make concurrent
    /// duplicate registration a no-op rather than an error.
    pub(crate) members: BTreeMap<String, String>,
    pub(crate) thread_ids: Vec<ThreadId>,
}

#[derive(Debug, Clone)]
pub(crate) struct ThreadRecord {
    pub(crate) thread: Thread,
    /// Post count aggregate, bumped by bulk insertion.
    pub(crate) posts: i64,
}

#[derive(Debug, Clone)]
pub(crate) struct PostRecord {
    pub(crate) post: Post,
    pub(crate) path: PostPath,
}

/// Tree and flat orderings for one thread's posts.
#[derive(Debug, Clone, Default)]
pub(crate) struct ThreadPosts {
    pub(crate) in_order: Vec<PostId>,
    pub(crate) by_path: BTreeMap<PostPath, PostId>,
}

/// All tables. Keys of the string-keyed maps are folded with [`ci_key`].
#[derive(Debug)]
pub(crate) struct Database {
    pub(crate) users: HashMap<String, User>,
    /// Folded email -> folded nickname, for the email uniqueness check.
    pub(crate) user_emails: HashMap<String, String>,
    pub(crate) forums: HashMap<String, ForumRecord>,
    pub(crate) threads: HashMap<ThreadId, ThreadRecord>,
    pub(crate) thread_slugs: HashMap<String, ThreadId>,
    pub(crate) posts: HashMap<PostId, PostRecord>,
    pub(crate) thread_index: HashMap<ThreadId, ThreadPosts>,
    /// (thread, folded nickname) -> voice.
    pub(crate) votes: HashMap<(ThreadId, String), i32>,
    pub(crate) next_post_id: PostId,
    pub(crate) next_thread_id: ThreadId,
}

impl Default for Database {
    fn default() -> Self {
        Self {
            users: HashMap::new(),
            user_emails: HashMap::new(),
            forums: HashMap::new(),
            threads: HashMap::new(),
            thread_slugs: HashMap::new(),
            posts: HashMap::new(),
            thread_index: HashMap::new(),
            votes: HashMap::new(),
            next_post_id: 1,
            next_thread_id: 1,
        }
    }
}

impl Database {
    /// Resolve a thread reference — a decimal id or a slug — to its id.
    pub(crate) fn resolve_thread_id(&self, slug_or_id: &str) -> Result<ThreadId, StoreError> {
        if let Ok(id) = slug_or_id.parse::<ThreadId>() {
            if self.threads.contains_key(&id) {
                return Ok(id);
            }
            return Err(StoreError::NotFoundThread);
        }
        self.thread_slugs
            .get(&ci_key(slug_or_id))
            .copied()
            .ok_or(StoreError::NotFoundThread)
    }
}

/// Handle to the storage engine. Cheap to clone; all clones share the same
/// underlying tables.
#[derive(Debug, Clone, Default)]
pub struct ForumStore {
    inner: Arc<RwLock<Database>>,
}

impl ForumStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the read lock. A poisoned lock surfaces as an internal error
    /// tagged with the calling operation, never as a panic or a retry.
    pub(crate) fn read(&self, op: &'static str) -> Result<RwLockReadGuard<'_, Database>, StoreError> {
        self.inner.read().map_err(|_| StoreError::Internal { op })
    }

    /// Take the write lock; see [`ForumStore::read`] for the poisoning policy.
    pub(crate) fn write(
        &self,
        op: &'static str,
    ) -> Result<RwLockWriteGuard<'_, Database>, StoreError> {
        self.inner.write().map_err(|_| StoreError::Internal { op })
    }

    /// Entity counts for the service status endpoint.
    pub fn status(&self) -> Result<Status, StoreError> {
        let db = self.read("status")?;
        Ok(Status {
            user: db.users.len() as i64,
            forum: db.forums.len() as i64,
            thread: db.threads.len() as i64,
            post: db.posts.len() as i64,
        })
    }

    /// Drop every table and reset id counters.
    pub fn clear(&self) -> Result<(), StoreError> {
        let mut db = self.write("clear")?;
        *db = Database::default();
        tracing::info!("store cleared");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::model::{NewForum, NewPost, NewThread, NewUser};
    use crate::store::{ForumStore, PostId};

    pub(crate) fn store_with_users(nicknames: &[&str]) -> ForumStore {
        let store = ForumStore::new();
        for nickname in nicknames {
            store
                .create_user(
                    nickname,
                    NewUser {
                        fullname: format!("User {nickname}"),
                        about: None,
                        email: format!("{nickname}@example.com"),
                    },
                )
                .unwrap();
        }
        store
    }

    /// Store with the given users, a forum `forum` owned by the first user,
    /// and an empty thread reachable by the returned slug.
    pub(crate) fn seeded_thread(nicknames: &[&str]) -> (ForumStore, String) {
        let store = store_with_users(nicknames);
        store
            .create_forum(NewForum {
                title: "Forum".to_string(),
                user: nicknames[0].to_string(),
                slug: "forum".to_string(),
            })
            .unwrap();
        store
            .create_thread(
                "forum",
                NewThread {
                    title: "Thread".to_string(),
                    author: nicknames[0].to_string(),
                    message: "opening".to_string(),
                    created: None,
                    slug: Some("thread".to_string()),
                },
            )
            .unwrap();
        (store, "thread".to_string())
    }

    pub(crate) fn simple_post(author: &str, parent: Option<PostId>) -> NewPost {
        NewPost {
            parent,
            author: author.to_string(),
            message: "post body".to_string(),
        }
    }

    impl ForumStore {
        /// Extra empty thread in the seeded forum, returned by slug.
        pub(crate) fn create_thread_for_test(&self, slug: &str) -> String {
            let owner = self.forum_by_slug("forum").unwrap().user;
            self.create_thread(
                "forum",
                NewThread {
                    title: "Other".to_string(),
                    author: owner,
                    message: "opening".to_string(),
                    created: None,
                    slug: Some(slug.to_string()),
                },
            )
            .unwrap();
            slug.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewUser;

    fn sample_user(n: &str) -> NewUser {
        NewUser {
            fullname: format!("User {n}"),
            about: None,
            email: format!("{n}@example.com"),
        }
    }

    #[test]
    fn test_status_counts_and_clear() {
        let store = ForumStore::new();
        store.create_user("alice", sample_user("alice")).unwrap();
        store.create_user("bob", sample_user("bob")).unwrap();

        let status = store.status().unwrap();
        assert_eq!(status.user, 2);
        assert_eq!(status.forum, 0);

        store.clear().unwrap();
        let status = store.status().unwrap();
        assert_eq!(status, Status::default());
    }

    #[test]
    fn test_resolve_thread_id_rejects_unknown() {
        let db = Database::default();
        assert_eq!(
            db.resolve_thread_id("42"),
            Err(StoreError::NotFoundThread)
        );
        assert_eq!(
            db.resolve_thread_id("no-such-slug"),
            Err(StoreError::NotFoundThread)
        );
    }
}
