//! Application state.
//!
//! `AppState` is the central state container handlers extract with
//! `State(state)`. The storage engine handle is cheap to clone and
//! internally synchronized, so the state itself is a plain `Clone` struct.

use crate::store::ForumStore;

#[derive(Clone)]
pub struct AppState {
    /// Handle to the storage engine; all clones share the same tables.
    pub store: ForumStore,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            store: ForumStore::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
