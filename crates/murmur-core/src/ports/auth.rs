//! Authentication ports: signed-token and password-hashing capabilities.

/// Token service for issuing and verifying signed identity tokens.
///
/// Tokens are opaque to the rest of the system: they bind a user id to an
/// absolute expiry and nothing else. Verification is pure CPU with no side
/// effects and no revocation list.
pub trait TokenService: Send + Sync {
    /// Issue a signed token whose subject is the given user id.
    fn issue(&self, user_id: i64) -> Result<String, AuthError>;

    /// Verify a token and return its subject.
    ///
    /// Tampered payloads, wrong algorithms, expired tokens, and missing or
    /// malformed subject claims are all rejected with the same opaque error,
    /// so callers cannot tell which check failed.
    fn verify(&self, token: &str) -> Result<i64, AuthError>;

    /// Token lifetime in seconds, for response assembly.
    fn expires_in(&self) -> u64;
}

/// Password hashing service - an opaque one-way hash + verify capability.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password with a salted, computationally expensive
    /// algorithm.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a stored hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Single variant for every token verification failure. Deliberately
    /// carries no cause: surfacing which check failed would leak it.
    #[error("invalid token")]
    InvalidToken,

    #[error("missing authorization header")]
    MissingAuth,

    #[error("hashing error: {0}")]
    Hashing(String),
}
