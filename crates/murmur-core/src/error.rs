//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business rule failures surfaced to callers.
///
/// Every variant except `Internal` is terminal for the request and maps to a
/// single HTTP status at the edge. `NotFound` deliberately covers both truly
/// absent resources and resources hidden by the visibility policy, so a
/// non-owner cannot distinguish the two.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),

    #[error("couldn't verify credentials")]
    Unauthenticated,

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// The standard not-found message for a post id, shared by every path
    /// that must not leak whether the post exists.
    pub fn post_not_found(id: i64) -> Self {
        DomainError::NotFound(format!("post was not found (id: {id})"))
    }

    pub fn user_not_found(id: i64) -> Self {
        DomainError::NotFound(format!("user was not found (id: {id})"))
    }
}

/// Repository-level errors, produced at the storage boundary.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("database connection failed: {0}")]
    Connection(String),

    #[error("query execution failed: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    /// Uniqueness or foreign-key violation reported by the store. This is
    /// the backstop for races that slip past application-level pre-checks.
    #[error("constraint violation: {0}")]
    Constraint(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => DomainError::NotFound("resource not found".to_string()),
            RepoError::Constraint(msg) => DomainError::Conflict(msg),
            RepoError::Connection(msg) | RepoError::Query(msg) => DomainError::Internal(msg),
        }
    }
}
