//! Service status counters.

use serde::{Deserialize, Serialize};

/// Entity counts for `GET /api/service/status`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub user: i64,
    pub forum: i64,
    pub thread: i64,
    pub post: i64,
}
