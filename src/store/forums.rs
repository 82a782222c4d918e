//! Forum table operations.

use crate::error::StoreError;
use crate::model::{Forum, NewForum};
use crate::store::{ci_key, Created, ForumRecord, ForumStore};

impl ForumStore {
    /// Create a forum. The owner nickname must resolve; its registered casing
    /// is what the stored forum carries. A slug collision returns the
    /// existing forum.
    pub fn create_forum(&self, new_forum: NewForum) -> Result<Created<Forum>, StoreError> {
        let mut db = self.write("create_forum")?;

        let owner = db
            .users
            .get(&ci_key(&new_forum.user))
            .map(|u| u.nickname.clone())
            .ok_or_else(|| StoreError::NotFoundUser {
                nickname: new_forum.user.clone(),
            })?;

        let slug_key = ci_key(&new_forum.slug);
        if let Some(existing) = db.forums.get(&slug_key) {
            return Ok(Created::Exists(existing.forum.clone()));
        }

        let forum = Forum {
            title: new_forum.title,
            user: owner,
            slug: new_forum.slug,
            posts: 0,
            threads: 0,
        };
        db.forums.insert(
            slug_key,
            ForumRecord {
                forum: forum.clone(),
                members: Default::default(),
                thread_ids: Vec::new(),
            },
        );
        Ok(Created::New(forum))
    }

    pub fn forum_by_slug(&self, slug: &str) -> Result<Forum, StoreError> {
        let db = self.read("forum_by_slug")?;
        db.forums
            .get(&ci_key(slug))
            .map(|record| record.forum.clone())
            .ok_or(StoreError::NotFoundForum)
    }
}
