//! Domain services - the business rules behind the HTTP surface.
//!
//! Services operate purely through the ports in [`crate::ports`], so the
//! visibility, ownership, and rating rules are testable without a database
//! or an HTTP stack.

mod auth;
mod posts;
mod ratings;

#[cfg(test)]
pub(crate) mod testkit;

pub use auth::{AuthService, IssuedToken};
pub use posts::PostService;
pub use ratings::RatingService;

use crate::domain::User;
use crate::error::DomainError;
use crate::ports::UserRepository;

/// Re-resolve a verified token subject against the credential store.
///
/// Token verification is pure, so a user deleted after issuance still holds
/// a cryptographically valid token. Every service confirms the subject still
/// exists and fails `Unauthenticated` otherwise.
pub(crate) async fn resolve_caller(
    users: &dyn UserRepository,
    user_id: i64,
) -> Result<User, DomainError> {
    users
        .find_by_id(user_id)
        .await?
        .ok_or(DomainError::Unauthenticated)
}
