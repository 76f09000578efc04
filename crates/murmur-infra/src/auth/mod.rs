//! Authentication implementations.

mod jwt;
mod password;

pub use jwt::{JwtConfig, JwtTokenService, UnsupportedAlgorithm};
pub use password::Argon2PasswordService;
