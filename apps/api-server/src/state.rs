//! Shared application state: domain services wired to their Postgres and
//! JWT adapters.

use std::sync::Arc;

use murmur_core::ports::{PasswordService, PostRepository, RatingRepository, TokenService, UserRepository};
use murmur_core::services::{AuthService, PostService, RatingService};
use murmur_infra::auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
use murmur_infra::database::{
    DbConn, PostgresPostRepository, PostgresRatingRepository, PostgresUserRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub posts: Arc<PostService>,
    pub ratings: Arc<RatingService>,
    /// Also held directly for the request identity extractor.
    pub tokens: Arc<dyn TokenService>,
}

impl AppState {
    pub fn new(db: DbConn, jwt: JwtConfig) -> Self {
        let users: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(db.clone()));
        let posts: Arc<dyn PostRepository> = Arc::new(PostgresPostRepository::new(db.clone()));
        let ratings: Arc<dyn RatingRepository> = Arc::new(PostgresRatingRepository::new(db));

        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(jwt));
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

        Self {
            auth: Arc::new(AuthService::new(
                users.clone(),
                passwords,
                tokens.clone(),
            )),
            posts: Arc::new(PostService::new(posts.clone(), users.clone())),
            ratings: Arc::new(RatingService::new(ratings, posts, users)),
            tokens,
        }
    }
}
