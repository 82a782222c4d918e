//! Post traversal: three orderings with cursor pagination.
//!
//! All three modes are stateless queries over a thread's two indexes.
//!
//! - **Flat**: creation order. Within a thread this equals ascending id
//!   order, so the `since` cursor is a positional cut over the creation
//!   vector, exclusive in the scan direction.
//! - **Tree**: depth-first order, i.e. a range scan over the path index.
//!   The cursor bound is the `since` post's own path, exclusive.
//! - **Parent-tree**: pagination by whole top-level trees. Roots get a dense
//!   rank over their id (direction per `desc`); a page is `limit` complete
//!   trees, each emitted in ascending path order regardless of direction.
//!   With a cursor, the page starts with the remainder of the cursor's own
//!   tree (strictly past the cursor path) and continues with the next
//!   `limit` whole trees. Ranks are derived in one pass per query; they are
//!   never cached, since insertions keep shifting group sizes.
//!
//! The thread is resolved before scanning, so an empty thread yields an
//! empty page while a missing thread is `NotFoundThread`. A `since` id that
//! does not identify a post of this thread yields an empty page — under
//! concurrent reads a cursor may legitimately point past the snapshot.

use std::ops::Bound;

use crate::error::StoreError;
use crate::model::Post;
use crate::store::{Database, ForumStore, PostId, PostPath, ThreadId, ThreadPosts};

/// Traversal mode for `GET .../posts`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostSort {
    Flat,
    Tree,
    ParentTree,
}

impl PostSort {
    /// Map the `sort` query parameter; anything unrecognized is flat.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("tree") => Self::Tree,
            Some("parent_tree") => Self::ParentTree,
            _ => Self::Flat,
        }
    }
}

/// Window of a traversal query.
#[derive(Debug, Clone, Copy)]
pub struct PostQuery {
    /// Maximum rows for flat/tree, maximum whole trees for parent-tree.
    pub limit: usize,
    pub desc: bool,
    /// Id of an already-seen post, exclusive. `None` (or wire value `0`)
    /// means "from the start".
    pub since: Option<PostId>,
}

impl Default for PostQuery {
    fn default() -> Self {
        Self {
            limit: 1000,
            desc: false,
            since: None,
        }
    }
}

impl ForumStore {
    /// Posts of a thread in the requested order and window.
    pub fn thread_posts(
        &self,
        slug_or_id: &str,
        sort: PostSort,
        query: PostQuery,
    ) -> Result<Vec<Post>, StoreError> {
        let db = self.read("thread_posts")?;
        let thread_id = db.resolve_thread_id(slug_or_id)?;
        let Some(index) = db.thread_index.get(&thread_id) else {
            return Ok(Vec::new());
        };

        let ids = match sort {
            PostSort::Flat => flat_page(&db, index, thread_id, &query),
            PostSort::Tree => tree_page(&db, index, thread_id, &query),
            PostSort::ParentTree => parent_tree_page(&db, index, thread_id, &query),
        };

        Ok(ids
            .into_iter()
            .filter_map(|id| db.posts.get(&id).map(|record| record.post.clone()))
            .collect())
    }
}

/// The `since` post's path, provided it belongs to this thread.
fn cursor_path(db: &Database, thread_id: ThreadId, since: PostId) -> Option<PostPath> {
    db.posts
        .get(&since)
        .filter(|record| record.post.thread == thread_id)
        .map(|record| record.path.clone())
}

fn flat_page(
    db: &Database,
    index: &ThreadPosts,
    thread_id: ThreadId,
    query: &PostQuery,
) -> Vec<PostId> {
    let ids = &index.in_order;
    match (query.since, query.desc) {
        (None, false) => ids.iter().take(query.limit).copied().collect(),
        (None, true) => ids.iter().rev().take(query.limit).copied().collect(),
        (Some(since), desc) => {
            // The cursor must name a post of this thread, same as the other
            // sort modes.
            if cursor_path(db, thread_id, since).is_none() {
                return Vec::new();
            }
            if desc {
                let end = ids.partition_point(|&id| id < since);
                ids[..end].iter().rev().take(query.limit).copied().collect()
            } else {
                // `in_order` is ascending in id, so the exclusive cut is a
                // partition point.
                let start = ids.partition_point(|&id| id <= since);
                ids[start..].iter().take(query.limit).copied().collect()
            }
        }
    }
}

fn tree_page(
    db: &Database,
    index: &ThreadPosts,
    thread_id: ThreadId,
    query: &PostQuery,
) -> Vec<PostId> {
    match query.since {
        None => {
            if query.desc {
                index.by_path.values().rev().take(query.limit).copied().collect()
            } else {
                index.by_path.values().take(query.limit).copied().collect()
            }
        }
        Some(since) => {
            let Some(path) = cursor_path(db, thread_id, since) else {
                return Vec::new();
            };
            if query.desc {
                index
                    .by_path
                    .range(..path)
                    .rev()
                    .take(query.limit)
                    .map(|(_, &id)| id)
                    .collect()
            } else {
                index
                    .by_path
                    .range((Bound::Excluded(path), Bound::Unbounded))
                    .take(query.limit)
                    .map(|(_, &id)| id)
                    .collect()
            }
        }
    }
}

/// Append every post of one top-level tree in ascending path order.
fn collect_tree(index: &ThreadPosts, root: PostId, out: &mut Vec<PostId>) {
    out.extend(
        index
            .by_path
            .range(PostPath::root(root)..)
            .take_while(|(path, _)| path.top_level() == root)
            .map(|(_, &id)| id),
    );
}

fn parent_tree_page(
    db: &Database,
    index: &ThreadPosts,
    thread_id: ThreadId,
    query: &PostQuery,
) -> Vec<PostId> {
    // Dense rank input: top-level posts in ascending id order. Depth-one
    // paths come out of the path index already sorted by id.
    let mut ranked: Vec<PostId> = index
        .by_path
        .iter()
        .filter(|(path, _)| path.depth() == 1)
        .map(|(_, &id)| id)
        .collect();
    if query.desc {
        ranked.reverse();
    }

    let mut out = Vec::new();
    match query.since {
        None => {
            for &root in ranked.iter().take(query.limit) {
                collect_tree(index, root, &mut out);
            }
        }
        Some(since) => {
            let Some(path) = cursor_path(db, thread_id, since) else {
                return Vec::new();
            };
            let root = path.top_level();
            let Some(position) = ranked.iter().position(|&r| r == root) else {
                return Vec::new();
            };

            // Remainder of the cursor's own tree: entries after the cursor
            // path are contiguous until the next top-level id.
            out.extend(
                index
                    .by_path
                    .range((Bound::Excluded(path), Bound::Unbounded))
                    .take_while(|(p, _)| p.top_level() == root)
                    .map(|(_, &id)| id),
            );
            for &next in ranked[position + 1..].iter().take(query.limit) {
                collect_tree(index, next, &mut out);
            }
        }
    }
    out
}
