//! Materialized post paths.
//!
//! Every post stores the full chain of ancestor ids ending in its own id:
//! a top-level post has path `[id]`, a reply to parent `P` has path
//! `P.path ++ [id]`. Paths are assigned once, at insertion, and never change;
//! there is no re-parenting and no rebalancing.
//!
//! The derived lexicographic order on the id sequence is exactly the
//! depth-first tree order: a parent sorts before each of its descendants
//! (a strict prefix sorts before any extension), and siblings sort by id,
//! which is creation order. The tree traversal mode is therefore a plain
//! range scan over a map keyed by `PostPath`, with no pointer chasing.

use crate::store::PostId;

/// Ancestor ids in root-to-leaf order, ending with the post's own id.
///
/// Invariant: never empty. Descendant-of is equivalent to proper-prefix-of.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PostPath(Vec<PostId>);

impl PostPath {
    /// Path of a top-level post.
    pub fn root(id: PostId) -> Self {
        Self(vec![id])
    }

    /// Path of a reply: this path extended with the child's id.
    pub fn child(&self, id: PostId) -> Self {
        let mut ids = Vec::with_capacity(self.0.len() + 1);
        ids.extend_from_slice(&self.0);
        ids.push(id);
        Self(ids)
    }

    /// The post this path belongs to (last element).
    pub fn post_id(&self) -> PostId {
        self.0.last().copied().unwrap_or(0)
    }

    /// Id of the top-level ancestor (first element). Parent-tree pagination
    /// groups whole trees by this id.
    pub fn top_level(&self) -> PostId {
        self.0.first().copied().unwrap_or(0)
    }

    /// Number of ids in the path; `1` for a top-level post.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Whether `self` is a proper prefix of `other`, i.e. `other` is a
    /// descendant of `self`.
    pub fn is_ancestor_of(&self, other: &PostPath) -> bool {
        self.0.len() < other.0.len() && other.0[..self.0.len()] == self.0[..]
    }

    pub fn as_slice(&self) -> &[PostId] {
        &self.0
    }
}
