use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post entity - a piece of content owned by exactly one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub owner_id: i64,
}

/// A post together with its like count. The count is recomputed on read via
/// an aggregate join, never stored on the post row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostWithLikes {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub owner_id: i64,
    pub likes: i64,
}

impl PostWithLikes {
    pub fn from_post(post: Post, likes: i64) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            published: post.published,
            created_at: post.created_at,
            owner_id: post.owner_id,
            likes,
        }
    }
}

/// A post pending insertion. The owner is always the resolved caller; there
/// is deliberately no way to supply one from the outside.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub published: bool,
    pub owner_id: i64,
}

impl NewPost {
    pub fn new(owner_id: i64, title: String, content: String, published: bool) -> Self {
        Self {
            title,
            content,
            published,
            owner_id,
        }
    }
}

/// Partial update of a post's mutable fields. `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub published: Option<bool>,
}

impl PostUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.published.is_none()
    }
}

/// Which slice of the posts table a listing sees.
#[derive(Debug, Clone)]
pub enum PostFilter {
    /// Published posts only, optionally narrowed by a case-sensitive title
    /// substring. This is the public view.
    Published { title_contains: Option<String> },
    /// Every post of one owner, published or not. Only ever applied with the
    /// caller as owner.
    OwnedBy(i64),
}

/// Listing window. Results are always ordered by creation time descending.
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub limit: u64,
    pub skip: u64,
}

impl Default for Page {
    fn default() -> Self {
        Self { limit: 10, skip: 0 }
    }
}

impl Page {
    pub fn new(limit: Option<u64>, skip: Option<u64>) -> Self {
        let default = Self::default();
        Self {
            limit: limit.unwrap_or(default.limit),
            skip: skip.unwrap_or(default.skip),
        }
    }
}
