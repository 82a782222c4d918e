//! Thread table operations and vote tallying.
//!
//! Threads are addressed by numeric id or by slug interchangeably
//! (`slug_or_id` route parameters); `Database::resolve_thread_id` does the
//! disambiguation. Vote tallies are stored on the thread and moved by the
//! delta when a user re-votes, so re-casting the same voice is a no-op.

use chrono::Utc;

use crate::error::StoreError;
use crate::model::{NewThread, Thread, ThreadUpdate, Vote};
use crate::store::{ci_key, Created, ForumStore, ThreadRecord};

impl ForumStore {
    /// Create a thread in a forum. Bumps the forum's thread counter and
    /// registers the author as a forum member. A slug collision returns the
    /// existing thread.
    pub fn create_thread(
        &self,
        forum_slug: &str,
        new_thread: NewThread,
    ) -> Result<Created<Thread>, StoreError> {
        let mut db = self.write("create_thread")?;

        let forum_key = ci_key(forum_slug);
        let canonical_forum = db
            .forums
            .get(&forum_key)
            .map(|record| record.forum.slug.clone())
            .ok_or(StoreError::NotFoundForum)?;
        let author_key = ci_key(&new_thread.author);
        let author = db
            .users
            .get(&author_key)
            .map(|u| u.nickname.clone())
            .ok_or_else(|| StoreError::NotFoundUser {
                nickname: new_thread.author.clone(),
            })?;

        if let Some(slug) = &new_thread.slug {
            if let Some(id) = db.thread_slugs.get(&ci_key(slug)) {
                if let Some(existing) = db.threads.get(id) {
                    return Ok(Created::Exists(existing.thread.clone()));
                }
            }
        }

        let id = db.next_thread_id;
        db.next_thread_id += 1;

        let thread = Thread {
            id,
            title: new_thread.title,
            author: author.clone(),
            forum: canonical_forum,
            message: new_thread.message,
            votes: 0,
            slug: new_thread.slug,
            created: new_thread.created.unwrap_or_else(Utc::now),
        };
        if let Some(slug) = &thread.slug {
            db.thread_slugs.insert(ci_key(slug), id);
        }
        db.threads.insert(
            id,
            ThreadRecord {
                thread: thread.clone(),
                posts: 0,
            },
        );
        if let Some(record) = db.forums.get_mut(&forum_key) {
            record.forum.threads += 1;
            record.thread_ids.push(id);
            record.members.insert(author_key, author);
        }
        Ok(Created::New(thread))
    }

    pub fn thread_by_ref(&self, slug_or_id: &str) -> Result<Thread, StoreError> {
        let db = self.read("thread_by_ref")?;
        let id = db.resolve_thread_id(slug_or_id)?;
        db.threads
            .get(&id)
            .map(|record| record.thread.clone())
            .ok_or(StoreError::NotFoundThread)
    }

    /// Partial update of title and message.
    pub fn update_thread(
        &self,
        slug_or_id: &str,
        update: ThreadUpdate,
    ) -> Result<Thread, StoreError> {
        let mut db = self.write("update_thread")?;
        let id = db.resolve_thread_id(slug_or_id)?;
        let record = db
            .threads
            .get_mut(&id)
            .ok_or(StoreError::NotFoundThread)?;
        if let Some(title) = update.title {
            record.thread.title = title;
        }
        if let Some(message) = update.message {
            record.thread.message = message;
        }
        Ok(record.thread.clone())
    }

    /// Threads of a forum ordered by creation time (ties by id). The `since`
    /// cursor is inclusive, in the direction of the scan.
    pub fn forum_threads(
        &self,
        slug: &str,
        limit: usize,
        since: Option<chrono::DateTime<Utc>>,
        desc: bool,
    ) -> Result<Vec<Thread>, StoreError> {
        let db = self.read("forum_threads")?;
        let forum = db
            .forums
            .get(&ci_key(slug))
            .ok_or(StoreError::NotFoundForum)?;

        let mut threads: Vec<&Thread> = forum
            .thread_ids
            .iter()
            .filter_map(|id| db.threads.get(id))
            .map(|record| &record.thread)
            .collect();
        threads.sort_by_key(|t| (t.created, t.id));
        if desc {
            threads.reverse();
        }

        Ok(threads
            .into_iter()
            .filter(|t| match since {
                None => true,
                Some(cursor) if desc => t.created <= cursor,
                Some(cursor) => t.created >= cursor,
            })
            .take(limit)
            .cloned()
            .collect())
    }

    /// Upsert a user's voice on a thread and return the thread with its
    /// updated tally.
    pub fn vote(&self, slug_or_id: &str, vote: Vote) -> Result<Thread, StoreError> {
        let mut db = self.write("vote")?;
        let id = db.resolve_thread_id(slug_or_id)?;
        let voter_key = ci_key(&vote.nickname);
        if !db.users.contains_key(&voter_key) {
            return Err(StoreError::NotFoundUser {
                nickname: vote.nickname,
            });
        }

        let previous = db.votes.insert((id, voter_key), vote.voice).unwrap_or(0);
        let record = db
            .threads
            .get_mut(&id)
            .ok_or(StoreError::NotFoundThread)?;
        record.thread.votes += vote.voice - previous;
        Ok(record.thread.clone())
    }
}
