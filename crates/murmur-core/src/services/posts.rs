//! Post visibility and ownership policy.
//!
//! Two distinct disclosure rules apply here. On get-by-id, another user's
//! unpublished post answers `NotFound`, never `Forbidden`: private posts
//! must be indistinguishable from absent ones. On update/delete/toggle, a
//! foreign post answers `Forbidden`: the caller already knows the id from
//! their own attempted action, so existence is not a secret.

use std::sync::Arc;

use crate::domain::{NewPost, Page, PostFilter, PostUpdate, PostWithLikes};
use crate::error::{DomainError, RepoError};
use crate::ports::{PostRepository, UserRepository};
use crate::services::resolve_caller;

const UNAUTHORIZED_ACTION: &str = "unauthorized action";

pub struct PostService {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { posts, users }
    }

    /// Public listing: published posts only, newest first, optionally
    /// narrowed by a case-sensitive title substring.
    pub async fn list(
        &self,
        search: Option<String>,
        page: Page,
    ) -> Result<Vec<PostWithLikes>, DomainError> {
        let filter = PostFilter::Published {
            title_contains: search,
        };
        Ok(self.posts.list(filter, page).await?)
    }

    /// Authenticated listing of the caller's own posts, unpublished ones
    /// included.
    pub async fn list_mine(
        &self,
        caller_id: i64,
        page: Page,
    ) -> Result<Vec<PostWithLikes>, DomainError> {
        let caller = resolve_caller(self.users.as_ref(), caller_id).await?;
        Ok(self.posts.list(PostFilter::OwnedBy(caller.id), page).await?)
    }

    /// The most recently created published post.
    pub async fn latest(&self) -> Result<PostWithLikes, DomainError> {
        self.posts
            .latest_published()
            .await?
            .ok_or_else(|| DomainError::NotFound("no published posts".to_string()))
    }

    /// Get one post by id, applying the leakage-avoidance rule.
    pub async fn get(&self, caller_id: i64, id: i64) -> Result<PostWithLikes, DomainError> {
        let caller = resolve_caller(self.users.as_ref(), caller_id).await?;

        let post = self
            .posts
            .find_with_likes(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;

        if !post.published && post.owner_id != caller.id {
            return Err(DomainError::post_not_found(id));
        }
        Ok(post)
    }

    /// Create a post owned by the caller. There is no way for the request
    /// to supply a different owner.
    pub async fn create(
        &self,
        caller_id: i64,
        title: String,
        content: String,
        published: bool,
    ) -> Result<PostWithLikes, DomainError> {
        let caller = resolve_caller(self.users.as_ref(), caller_id).await?;

        if title.trim().is_empty() {
            return Err(DomainError::Validation("title must not be empty".into()));
        }
        if content.trim().is_empty() {
            return Err(DomainError::Validation("content must not be empty".into()));
        }

        let post = self
            .posts
            .insert(NewPost::new(caller.id, title, content, published))
            .await?;
        Ok(PostWithLikes::from_post(post, 0))
    }

    /// Partially update a post. Only the owner may mutate it.
    pub async fn update(
        &self,
        caller_id: i64,
        id: i64,
        changes: PostUpdate,
    ) -> Result<PostWithLikes, DomainError> {
        self.ensure_owned(caller_id, id).await?;

        if changes.is_empty() {
            return Err(DomainError::Validation("no fields to update".into()));
        }

        match self.posts.update(id, changes).await {
            Ok(_) => self.fetch_with_likes(id).await,
            // The row vanished between the ownership check and the write.
            Err(RepoError::NotFound) => Err(DomainError::post_not_found(id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a post. Only the owner may delete it.
    pub async fn delete(&self, caller_id: i64, id: i64) -> Result<(), DomainError> {
        self.ensure_owned(caller_id, id).await?;

        match self.posts.delete(id).await {
            Ok(()) => Ok(()),
            Err(RepoError::NotFound) => Err(DomainError::post_not_found(id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Flip the published flag. The flip is a single atomic row mutation in
    /// the store, so concurrent toggles serialize.
    pub async fn toggle_publish(
        &self,
        caller_id: i64,
        id: i64,
    ) -> Result<PostWithLikes, DomainError> {
        self.ensure_owned(caller_id, id).await?;

        match self.posts.toggle_published(id).await {
            Ok(_) => self.fetch_with_likes(id).await,
            Err(RepoError::NotFound) => Err(DomainError::post_not_found(id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Shared precondition for mutations: the post exists (`NotFound`
    /// otherwise) and belongs to the caller (`Forbidden` otherwise), in that
    /// order.
    async fn ensure_owned(&self, caller_id: i64, id: i64) -> Result<(), DomainError> {
        let caller = resolve_caller(self.users.as_ref(), caller_id).await?;

        let post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;

        if post.owner_id != caller.id {
            return Err(DomainError::Forbidden(UNAUTHORIZED_ACTION));
        }
        Ok(())
    }

    async fn fetch_with_likes(&self, id: i64) -> Result<PostWithLikes, DomainError> {
        self.posts
            .find_with_likes(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))
    }
}
