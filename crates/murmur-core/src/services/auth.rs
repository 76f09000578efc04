//! Registration, login, and user lookup.

use std::sync::Arc;

use crate::domain::{NewUser, User, validate_email, validate_password};
use crate::error::{DomainError, RepoError};
use crate::ports::{PasswordService, TokenService, UserRepository};

/// One generic message for every credential failure. Responses must not
/// reveal whether the email exists or the password was wrong.
const INVALID_CREDENTIALS: &str = "invalid credentials";

/// A freshly issued bearer token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
}

/// Account registration and credential verification.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Register a new account. Email format and password policy are checked
    /// before any hashing work; a duplicate email is a `Conflict` backed by
    /// the store's unique index.
    pub async fn register(&self, email: String, password: String) -> Result<User, DomainError> {
        validate_email(&email)?;
        validate_password(&password)?;

        let password_hash = self
            .passwords
            .hash(&password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        self.users
            .insert(NewUser::new(email.clone(), password_hash))
            .await
            .map_err(|e| match e {
                RepoError::Constraint(_) => {
                    DomainError::Conflict(format!("email already registered: {email}"))
                }
                other => other.into(),
            })
    }

    /// Exchange credentials for a bearer token.
    ///
    /// Unknown email and wrong password fail identically; the caller cannot
    /// tell which check rejected them.
    pub async fn login(&self, email: &str, password: &str) -> Result<IssuedToken, DomainError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            return Err(DomainError::Forbidden(INVALID_CREDENTIALS));
        };

        let valid = self
            .passwords
            .verify(password, &user.password_hash)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        if !valid {
            return Err(DomainError::Forbidden(INVALID_CREDENTIALS));
        }

        let access_token = self
            .tokens
            .issue(user.id)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok(IssuedToken {
            access_token,
            token_type: "bearer",
            expires_in: self.tokens.expires_in(),
        })
    }

    /// Public user lookup by id.
    pub async fn get_user(&self, id: i64) -> Result<User, DomainError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(id))
    }
}
