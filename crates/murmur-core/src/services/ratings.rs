//! The rating engine.
//!
//! A state machine per (user, post) pair with two states, no-rating and
//! rated. The pre-checks here give precise errors; the store's uniqueness
//! constraint on the pair is the final backstop, so two concurrent adds
//! yield exactly one success and one `Conflict`.

use std::sync::Arc;

use crate::error::{DomainError, RepoError};
use crate::ports::{PostRepository, RatingRepository, UserRepository};
use crate::services::resolve_caller;

pub struct RatingService {
    ratings: Arc<dyn RatingRepository>,
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
}

impl RatingService {
    pub fn new(
        ratings: Arc<dyn RatingRepository>,
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            ratings,
            posts,
            users,
        }
    }

    /// Transition no-rating -> rated.
    ///
    /// Preconditions, in order: the post exists and is published (an
    /// unpublished post answers `NotFound`, same leakage rule as get-by-id);
    /// the caller is not the owner; no rating exists for the pair yet.
    pub async fn add(&self, caller_id: i64, post_id: i64) -> Result<(), DomainError> {
        let caller = resolve_caller(self.users.as_ref(), caller_id).await?;

        let post = self
            .posts
            .find_by_id(post_id)
            .await?
            .filter(|p| p.published)
            .ok_or_else(|| DomainError::post_not_found(post_id))?;

        if post.owner_id == caller.id {
            return Err(DomainError::Forbidden("cannot rate own post"));
        }

        if self.ratings.exists(caller.id, post_id).await? {
            return Err(DomainError::Conflict("rating already exist".to_string()));
        }

        // A concurrent add can still race past the exists() pre-check; the
        // composite-key constraint in the store settles it.
        self.ratings
            .insert(caller.id, post_id)
            .await
            .map_err(|e| match e {
                RepoError::Constraint(_) => {
                    DomainError::Conflict("rating already exist".to_string())
                }
                other => other.into(),
            })
    }

    /// Transition rated -> no-rating.
    ///
    /// The post must exist; the delete statement's affected-row count is the
    /// existence check for the rating itself.
    pub async fn remove(&self, caller_id: i64, post_id: i64) -> Result<(), DomainError> {
        let caller = resolve_caller(self.users.as_ref(), caller_id).await?;

        self.posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(post_id))?;

        let removed = self.ratings.delete(caller.id, post_id).await?;
        if !removed {
            return Err(DomainError::NotFound("rating does not exist".to_string()));
        }
        Ok(())
    }
}
