//! Bulk post insertion and single-post operations.
//!
//! Insertion is two-phase under one write lock. Ids are unknown until
//! assignment but paths need them, so the batch's id range is reserved first
//! (`next_post_id .. next_post_id + n`) and paths are computed against those
//! planned ids before anything is written. Parents resolve against persisted
//! posts of the target thread or against an *earlier* row of the same batch;
//! forward and cross-thread references are `InvalidParent`. The validation
//! pass touches nothing, so a rejected batch leaves no trace — no rows, no
//! index entries, no counter movement.

use chrono::{DateTime, Utc};

use crate::error::StoreError;
use crate::model::{NewPost, Post, PostFull, PostUpdate};
use crate::store::{ci_key, ForumStore, PostId, PostPath, PostRecord};

/// One validated row, ready to persist.
struct PlannedPost {
    id: PostId,
    parent: Option<PostId>,
    path: PostPath,
    /// Registered casing of the author nickname.
    author: String,
    author_key: String,
    message: String,
}

impl ForumStore {
    /// Insert a batch of posts into a thread, in batch order.
    ///
    /// The thread must exist even for an empty batch (which is a valid
    /// no-op). On success every returned post carries its assigned id, the
    /// batch timestamp, and the thread/forum stamps; the thread and forum
    /// post counters move by the batch size and each distinct author becomes
    /// a forum member.
    pub fn create_posts(
        &self,
        slug_or_id: &str,
        batch: Vec<NewPost>,
    ) -> Result<Vec<Post>, StoreError> {
        let mut guard = self.write("create_posts")?;
        let db = &mut *guard;

        let thread_id = db.resolve_thread_id(slug_or_id)?;
        let forum_slug = db
            .threads
            .get(&thread_id)
            .map(|record| record.thread.forum.clone())
            .ok_or(StoreError::NotFoundThread)?;
        if batch.is_empty() {
            return Ok(Vec::new());
        }

        // Validation pass: plan ids and paths without mutating anything.
        let first_id = db.next_post_id;
        let mut planned: Vec<PlannedPost> = Vec::with_capacity(batch.len());
        for (offset, new_post) in batch.into_iter().enumerate() {
            let id = first_id + offset as PostId;
            let author_key = ci_key(&new_post.author);
            let author = db
                .users
                .get(&author_key)
                .map(|u| u.nickname.clone())
                .ok_or(StoreError::NotFoundUser {
                    nickname: new_post.author,
                })?;

            // Parent 0 and absent parent both mean top-level.
            let parent = new_post.parent.filter(|&p| p != 0);
            let path = match parent {
                None => PostPath::root(id),
                Some(parent_id) => {
                    let parent_path = if let Some(earlier) =
                        planned.iter().find(|p| p.id == parent_id)
                    {
                        earlier.path.clone()
                    } else {
                        let record = db
                            .posts
                            .get(&parent_id)
                            .ok_or(StoreError::InvalidParent)?;
                        if record.post.thread != thread_id {
                            return Err(StoreError::InvalidParent);
                        }
                        record.path.clone()
                    };
                    let path = parent_path.child(id);
                    debug_assert!(parent_path.is_ancestor_of(&path));
                    path
                }
            };
            debug_assert_eq!(path.post_id(), id);

            planned.push(PlannedPost {
                id,
                parent,
                path,
                author,
                author_key,
                message: new_post.message,
            });
        }

        // Mutation pass. One timestamp for the whole batch, clamped so
        // creation time never moves backwards within a thread.
        let mut created = Utc::now();
        if let Some(last) = db
            .thread_index
            .get(&thread_id)
            .and_then(|index| index.in_order.last())
            .and_then(|id| db.posts.get(id))
        {
            created = created.max(last.post.created);
        }

        let count = planned.len();
        let mut inserted = Vec::with_capacity(count);
        let index = db.thread_index.entry(thread_id).or_default();
        for row in planned {
            let post = Post {
                id: row.id,
                parent: row.parent,
                author: row.author.clone(),
                message: row.message,
                is_edited: false,
                forum: forum_slug.clone(),
                thread: thread_id,
                created,
            };
            index.in_order.push(row.id);
            index.by_path.insert(row.path.clone(), row.id);
            db.posts.insert(
                row.id,
                PostRecord {
                    post: post.clone(),
                    path: row.path,
                },
            );
            if let Some(forum) = db.forums.get_mut(&ci_key(&forum_slug)) {
                forum.members.insert(row.author_key, row.author);
            }
            inserted.push(post);
        }
        db.next_post_id = first_id + count as PostId;

        if let Some(record) = db.threads.get_mut(&thread_id) {
            record.posts += count as i64;
        }
        if let Some(forum) = db.forums.get_mut(&ci_key(&forum_slug)) {
            forum.forum.posts += count as i64;
        }

        tracing::debug!(thread = thread_id, count, "inserted post batch");
        Ok(inserted)
    }

    /// Look up one post, attaching the entities named by `related` tags
    /// (`user`, `thread`, `forum`).
    pub fn post_by_id(&self, id: PostId, related: &[String]) -> Result<PostFull, StoreError> {
        let db = self.read("post_by_id")?;
        let record = db.posts.get(&id).ok_or(StoreError::NotFound)?;

        let mut full = PostFull {
            post: record.post.clone(),
            author: None,
            thread: None,
            forum: None,
        };
        for tag in related {
            match tag.as_str() {
                "user" => full.author = db.users.get(&ci_key(&record.post.author)).cloned(),
                "thread" => {
                    full.thread = db
                        .threads
                        .get(&record.post.thread)
                        .map(|t| t.thread.clone())
                }
                "forum" => {
                    full.forum = db
                        .forums
                        .get(&ci_key(&record.post.forum))
                        .map(|f| f.forum.clone())
                }
                _ => {}
            }
        }
        Ok(full)
    }

    /// Update a post's message. A missing or unchanged message is a no-op
    /// that leaves the edited flag alone.
    pub fn update_post(&self, id: PostId, update: PostUpdate) -> Result<Post, StoreError> {
        let mut db = self.write("update_post")?;
        let record = db.posts.get_mut(&id).ok_or(StoreError::NotFound)?;
        if let Some(message) = update.message {
            if message != record.post.message {
                record.post.message = message;
                record.post.is_edited = true;
            }
        }
        Ok(record.post.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::{seeded_thread, simple_post};
    use assert_matches::assert_matches;

    #[test]
    fn test_path_prefix_invariant() {
        let (store, thread) = seeded_thread(&["a"]);
        let created = store
            .create_posts(
                &thread,
                vec![simple_post("a", None), simple_post("a", None)],
            )
            .unwrap();
        let root = created[0].id;

        let replies = store
            .create_posts(&thread, vec![simple_post("a", Some(root))])
            .unwrap();
        let reply = replies[0].id;

        let db = store.read("test").unwrap();
        let root_path = db.posts[&root].path.clone();
        let reply_path = db.posts[&reply].path.clone();
        assert_eq!(root_path.as_slice(), &[root]);
        assert_eq!(reply_path.as_slice(), &[root, reply]);
        assert!(root_path.is_ancestor_of(&reply_path));
    }

    #[test]
    fn test_ids_are_strictly_increasing_across_batches() {
        let (store, thread) = seeded_thread(&["a"]);
        let first = store
            .create_posts(&thread, vec![simple_post("a", None); 3])
            .unwrap();
        let second = store
            .create_posts(&thread, vec![simple_post("a", None); 2])
            .unwrap();

        let ids: Vec<_> = first.iter().chain(&second).map(|p| p.id).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_intra_batch_parent_resolves_in_batch_order() {
        let (store, thread) = seeded_thread(&["a"]);
        // The first row's id is predictable under the write lock: batches
        // reserve a contiguous range starting at the current counter.
        let created = store
            .create_posts(&thread, vec![simple_post("a", None)])
            .unwrap();
        let root = created[0].id;

        let batch = store
            .create_posts(
                &thread,
                vec![simple_post("a", Some(root)), simple_post("a", Some(root + 1))],
            )
            .unwrap();
        // Second row hangs off the first row of the same batch.
        assert_eq!(batch[1].parent, Some(batch[0].id));

        let db = store.read("test").unwrap();
        assert_eq!(
            db.posts[&batch[1].id].path.as_slice(),
            &[root, batch[0].id, batch[1].id]
        );
    }

    #[test]
    fn test_forward_intra_batch_parent_is_invalid() {
        let (store, thread) = seeded_thread(&["a"]);
        store
            .create_posts(&thread, vec![simple_post("a", None)])
            .unwrap();

        // Id 3 would be the *second* row of this batch; referencing it from
        // the first row is a forward reference and must be rejected whole.
        let err = store
            .create_posts(
                &thread,
                vec![simple_post("a", Some(3)), simple_post("a", None)],
            )
            .unwrap_err();
        assert_eq!(err, StoreError::InvalidParent);
        assert_eq!(store.status().unwrap().post, 1);
    }

    #[test]
    fn test_cross_thread_parent_rejected_without_partial_apply() {
        let (store, thread_a) = seeded_thread(&["a"]);
        let other = store.create_thread_for_test("other-thread");
        let foreign = store
            .create_posts(&other, vec![simple_post("a", None)])
            .unwrap()[0]
            .id;

        let err = store
            .create_posts(
                &thread_a,
                vec![simple_post("a", None), simple_post("a", Some(foreign))],
            )
            .unwrap_err();
        assert_eq!(err, StoreError::InvalidParent);
        // First row of the failed batch must not be visible.
        assert_eq!(
            store
                .thread_posts(&thread_a, crate::store::PostSort::Flat, Default::default())
                .unwrap()
                .len(),
            0
        );
    }

    #[test]
    fn test_unknown_author_names_nickname_and_aborts_batch() {
        let (store, thread) = seeded_thread(&["a"]);
        let err = store
            .create_posts(
                &thread,
                vec![simple_post("a", None), simple_post("ghost", None)],
            )
            .unwrap_err();
        assert_matches!(err, StoreError::NotFoundUser { nickname } if nickname == "ghost");
        assert_eq!(store.status().unwrap().post, 0);
    }

    #[test]
    fn test_empty_batch_requires_thread() {
        let (store, thread) = seeded_thread(&["a"]);
        assert_eq!(store.create_posts(&thread, Vec::new()).unwrap(), Vec::new());
        assert_eq!(
            store.create_posts("missing", Vec::new()).unwrap_err(),
            StoreError::NotFoundThread
        );
    }

    #[test]
    fn test_forum_aggregates_and_membership() {
        let (store, thread) = seeded_thread(&["a", "b"]);
        store
            .create_posts(
                &thread,
                vec![simple_post("a", None), simple_post("b", None), simple_post("a", None)],
            )
            .unwrap();

        let forum = store.forum_by_slug("forum").unwrap();
        assert_eq!(forum.posts, 3);
        let members = store.forum_users("forum", 10, None, false).unwrap();
        let nicknames: Vec<_> = members.iter().map(|u| u.nickname.as_str()).collect();
        assert_eq!(nicknames, vec!["a", "b"]);
    }

    #[test]
    fn test_update_message_flips_edited_once() {
        let (store, thread) = seeded_thread(&["a"]);
        let post = store
            .create_posts(&thread, vec![simple_post("a", None)])
            .unwrap()
            .remove(0);

        // Unchanged message: no edit flag.
        let same = store
            .update_post(
                post.id,
                PostUpdate {
                    message: Some(post.message.clone()),
                },
            )
            .unwrap();
        assert!(!same.is_edited);

        // Absent message: no-op.
        let same = store.update_post(post.id, PostUpdate::default()).unwrap();
        assert!(!same.is_edited);

        let changed = store
            .update_post(
                post.id,
                PostUpdate {
                    message: Some("rewritten".to_string()),
                },
            )
            .unwrap();
        assert!(changed.is_edited);
        assert_eq!(changed.message, "rewritten");
    }

    #[test]
    fn test_post_by_id_related() {
        let (store, thread) = seeded_thread(&["a"]);
        let post = store
            .create_posts(&thread, vec![simple_post("a", None)])
            .unwrap()
            .remove(0);

        let bare = store.post_by_id(post.id, &[]).unwrap();
        assert!(bare.author.is_none() && bare.thread.is_none() && bare.forum.is_none());

        let full = store
            .post_by_id(
                post.id,
                &["user".to_string(), "thread".to_string(), "forum".to_string()],
            )
            .unwrap();
        assert_eq!(full.author.unwrap().nickname, "a");
        assert_eq!(full.thread.unwrap().id, post.thread);
        assert_eq!(full.forum.unwrap().slug, "forum");

        assert_eq!(
            store.post_by_id(9999, &[]).unwrap_err(),
            StoreError::NotFound
        );
    }
}
