use serde::{Deserialize, Serialize};

/// Rating entity - one user's like on one post.
///
/// The pair is the identity: there is no surrogate key, and the store
/// enforces at most one row per pair. Existence is binary, no magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: i64,
    pub post_id: i64,
}
