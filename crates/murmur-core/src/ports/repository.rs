use async_trait::async_trait;

use crate::domain::{NewPost, NewUser, Page, Post, PostFilter, PostUpdate, PostWithLikes, User};
use crate::error::RepoError;

/// Credential store: user identity plus hashed password.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. A duplicate email surfaces as
    /// [`RepoError::Constraint`], backed by the store's unique index.
    async fn insert(&self, user: NewUser) -> Result<User, RepoError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Post store: CRUD plus filtered, paginated, like-count-aggregated listing.
///
/// Every mutation is a single atomic statement or an explicit transaction
/// and returns the post-mutation state for response assembly.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError>;

    /// Fetch one post with its like count aggregated on read.
    async fn find_with_likes(&self, id: i64) -> Result<Option<PostWithLikes>, RepoError>;

    /// List posts matching `filter`, newest first, within `page`.
    async fn list(&self, filter: PostFilter, page: Page)
    -> Result<Vec<PostWithLikes>, RepoError>;

    /// The most recently created published post, if any.
    async fn latest_published(&self) -> Result<Option<PostWithLikes>, RepoError>;

    /// Apply a partial update. Fails with [`RepoError::NotFound`] if the row
    /// is gone.
    async fn update(&self, id: i64, changes: PostUpdate) -> Result<Post, RepoError>;

    /// Flip the published flag inside one transactional boundary and return
    /// the resulting row.
    async fn toggle_published(&self, id: i64) -> Result<Post, RepoError>;

    /// Delete a post. Fails with [`RepoError::NotFound`] if no row matched.
    async fn delete(&self, id: i64) -> Result<(), RepoError>;
}

/// Rating store, keyed by the (user, post) pair.
#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Insert a rating row. The store's uniqueness constraint on the pair is
    /// the final backstop against concurrent duplicates; a violation
    /// surfaces as [`RepoError::Constraint`].
    async fn insert(&self, user_id: i64, post_id: i64) -> Result<(), RepoError>;

    async fn exists(&self, user_id: i64, post_id: i64) -> Result<bool, RepoError>;

    /// Delete a rating row. Returns `false` when no row existed; the single
    /// delete statement doubles as the existence check.
    async fn delete(&self, user_id: i64, post_id: i64) -> Result<bool, RepoError>;
}
