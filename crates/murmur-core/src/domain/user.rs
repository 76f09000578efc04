use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Symbols accepted by the password policy.
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*()-_=+[]{};:,.<>?/|~";

/// User entity - a registered account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A user pending insertion. The id and creation timestamp are assigned by
/// the store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    /// Build a new user record from an already-validated email and an opaque
    /// password hash. Validation happens before hashing, in
    /// [`validate_email`] and [`validate_password`].
    pub fn new(email: String, password_hash: String) -> Self {
        Self {
            email,
            password_hash,
        }
    }
}

/// Check that an email is plausibly well-formed: a non-empty local part, a
/// single `@`, a domain containing a dot, and no whitespace.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    let mut parts = email.split('@');
    let (local, domain) = (parts.next().unwrap_or(""), parts.next().unwrap_or(""));

    let well_formed = parts.next().is_none()
        && !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace);

    if well_formed {
        Ok(())
    } else {
        Err(DomainError::Validation(format!(
            "invalid email address: {email}"
        )))
    }
}

/// Enforce the password complexity policy before any hashing occurs:
/// minimum 8 characters, at least one uppercase letter, one lowercase
/// letter, one digit, and one symbol from [`PASSWORD_SYMBOLS`].
pub fn validate_password(password: &str) -> Result<(), DomainError> {
    let rules: [(&str, bool); 5] = [
        ("at least 8 characters", password.chars().count() >= 8),
        (
            "an uppercase letter",
            password.chars().any(|c| c.is_ascii_uppercase()),
        ),
        (
            "a lowercase letter",
            password.chars().any(|c| c.is_ascii_lowercase()),
        ),
        ("a digit", password.chars().any(|c| c.is_ascii_digit())),
        (
            "a symbol",
            password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)),
        ),
    ];

    for (requirement, satisfied) in rules {
        if !satisfied {
            return Err(DomainError::Validation(format!(
                "password must contain {requirement}"
            )));
        }
    }
    Ok(())
}
