//! In-memory fakes for service tests.
//!
//! `MemStore` implements all three repository ports over one shared state so
//! the like-count aggregate sees the same rows as the rating store. It
//! mimics the store contracts the services rely on: unique email, composite
//! rating key, cascade deletes, affected-row signalling.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeDelta, Utc};

use crate::domain::{
    NewPost, NewUser, Page, Post, PostFilter, PostUpdate, PostWithLikes, Rating, User,
};
use crate::error::RepoError;
use crate::ports::{
    AuthError, PasswordService, PostRepository, RatingRepository, TokenService, UserRepository,
};

#[derive(Default)]
struct State {
    users: Vec<User>,
    posts: Vec<Post>,
    ratings: Vec<Rating>,
}

#[derive(Clone, Default)]
pub(crate) struct MemStore {
    state: Arc<Mutex<State>>,
    next_id: Arc<AtomicI64>,
}

impl MemStore {
    fn fresh_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub(crate) async fn seed_user(&self, email: &str) -> i64 {
        let user = UserRepository::insert(
            self,
            NewUser::new(email.to_string(), "argon2::seeded".to_string()),
        )
        .await
        .expect("seed user");
        user.id
    }

    pub(crate) async fn seed_post(&self, owner_id: i64, title: &str, published: bool) -> i64 {
        let post = PostRepository::insert(
            self,
            NewPost::new(owner_id, title.to_string(), "content".to_string(), published),
        )
        .await
        .expect("seed post");
        post.id
    }

    pub(crate) async fn remove_user(&self, id: i64) {
        let mut state = self.state.lock().unwrap();
        state.users.retain(|u| u.id != id);
    }

    pub(crate) fn user_count(&self) -> usize {
        self.state.lock().unwrap().users.len()
    }

    pub(crate) async fn rating_count(&self, post_id: i64) -> usize {
        let state = self.state.lock().unwrap();
        state.ratings.iter().filter(|r| r.post_id == post_id).count()
    }

    fn likes_of(state: &State, post_id: i64) -> i64 {
        state.ratings.iter().filter(|r| r.post_id == post_id).count() as i64
    }
}

#[async_trait]
impl UserRepository for MemStore {
    async fn insert(&self, user: NewUser) -> Result<User, RepoError> {
        let id = self.fresh_id();
        let mut state = self.state.lock().unwrap();
        if state.users.iter().any(|u| u.email == user.email) {
            return Err(RepoError::Constraint(format!(
                "duplicate email: {}",
                user.email
            )));
        }
        let user = User {
            id,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl PostRepository for MemStore {
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        let id = self.fresh_id();
        let mut state = self.state.lock().unwrap();
        let post = Post {
            id,
            title: post.title,
            content: post.content,
            published: post.published,
            // Spread timestamps so newest-first ordering is deterministic.
            created_at: Utc::now() + TimeDelta::seconds(id),
            owner_id: post.owner_id,
        };
        state.posts.push(post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let state = self.state.lock().unwrap();
        Ok(state.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn find_with_likes(&self, id: i64) -> Result<Option<PostWithLikes>, RepoError> {
        let state = self.state.lock().unwrap();
        Ok(state.posts.iter().find(|p| p.id == id).map(|p| {
            PostWithLikes::from_post(p.clone(), Self::likes_of(&state, p.id))
        }))
    }

    async fn list(
        &self,
        filter: PostFilter,
        page: Page,
    ) -> Result<Vec<PostWithLikes>, RepoError> {
        let state = self.state.lock().unwrap();
        let mut rows: Vec<&Post> = state
            .posts
            .iter()
            .filter(|p| match &filter {
                PostFilter::Published { title_contains } => {
                    p.published
                        && title_contains
                            .as_deref()
                            .is_none_or(|needle| p.title.contains(needle))
                }
                PostFilter::OwnedBy(owner_id) => p.owner_id == *owner_id,
            })
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(rows
            .into_iter()
            .skip(page.skip as usize)
            .take(page.limit as usize)
            .map(|p| PostWithLikes::from_post(p.clone(), Self::likes_of(&state, p.id)))
            .collect())
    }

    async fn latest_published(&self) -> Result<Option<PostWithLikes>, RepoError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .posts
            .iter()
            .filter(|p| p.published)
            .max_by_key(|p| p.created_at)
            .map(|p| PostWithLikes::from_post(p.clone(), Self::likes_of(&state, p.id))))
    }

    async fn update(&self, id: i64, changes: PostUpdate) -> Result<Post, RepoError> {
        let mut state = self.state.lock().unwrap();
        let post = state
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;
        if let Some(title) = changes.title {
            post.title = title;
        }
        if let Some(content) = changes.content {
            post.content = content;
        }
        if let Some(published) = changes.published {
            post.published = published;
        }
        Ok(post.clone())
    }

    async fn toggle_published(&self, id: i64) -> Result<Post, RepoError> {
        let mut state = self.state.lock().unwrap();
        let post = state
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;
        post.published = !post.published;
        Ok(post.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut state = self.state.lock().unwrap();
        let before = state.posts.len();
        state.posts.retain(|p| p.id != id);
        if state.posts.len() == before {
            return Err(RepoError::NotFound);
        }
        // Cascade, as the schema's foreign keys do.
        state.ratings.retain(|r| r.post_id != id);
        Ok(())
    }
}

#[async_trait]
impl RatingRepository for MemStore {
    async fn insert(&self, user_id: i64, post_id: i64) -> Result<(), RepoError> {
        let mut state = self.state.lock().unwrap();
        if state
            .ratings
            .iter()
            .any(|r| r.user_id == user_id && r.post_id == post_id)
        {
            return Err(RepoError::Constraint(format!(
                "duplicate rating: ({user_id}, {post_id})"
            )));
        }
        state.ratings.push(Rating { user_id, post_id });
        Ok(())
    }

    async fn exists(&self, user_id: i64, post_id: i64) -> Result<bool, RepoError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .ratings
            .iter()
            .any(|r| r.user_id == user_id && r.post_id == post_id))
    }

    async fn delete(&self, user_id: i64, post_id: i64) -> Result<bool, RepoError> {
        let mut state = self.state.lock().unwrap();
        let before = state.ratings.len();
        state
            .ratings
            .retain(|r| !(r.user_id == user_id && r.post_id == post_id));
        Ok(state.ratings.len() != before)
    }
}

/// Reversible stand-in for the one-way hash, good enough to assert that the
/// stored value is never the plaintext.
pub(crate) struct FakePasswords;

impl PasswordService for FakePasswords {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(format!("argon2::{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        Ok(hash == format!("argon2::{password}"))
    }
}

pub(crate) struct FakeTokens;

impl FakeTokens {
    pub(crate) fn decode_subject(&self, token: &str) -> i64 {
        self.verify(token).expect("fake token subject")
    }
}

impl TokenService for FakeTokens {
    fn issue(&self, user_id: i64) -> Result<String, AuthError> {
        Ok(format!("token-{user_id}"))
    }

    fn verify(&self, token: &str) -> Result<i64, AuthError> {
        token
            .strip_prefix("token-")
            .and_then(|sub| sub.parse().ok())
            .ok_or(AuthError::InvalidToken)
    }

    fn expires_in(&self) -> u64 {
        1800
    }
}
