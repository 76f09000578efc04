//! JWT token service implementation.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use murmur_core::ports::{AuthError, TokenService};

/// JWT token service configuration. Secret and algorithm come from the
/// environment, never from data rows.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: Algorithm,
    pub expiration_minutes: i64,
}

/// Raised at startup when the configured algorithm is not an HMAC variant.
#[derive(Debug, thiserror::Error)]
#[error("unsupported JWT algorithm: {0} (expected HS256, HS384, or HS512)")]
pub struct UnsupportedAlgorithm(String);

impl JwtConfig {
    /// Build a config, restricting the algorithm to the HMAC family the
    /// shared-secret keys below support.
    pub fn new(
        secret: String,
        algorithm: &str,
        expiration_minutes: i64,
    ) -> Result<Self, UnsupportedAlgorithm> {
        let algorithm = match algorithm {
            "HS256" => Algorithm::HS256,
            "HS384" => Algorithm::HS384,
            "HS512" => Algorithm::HS512,
            other => return Err(UnsupportedAlgorithm(other.to_string())),
        };
        Ok(Self {
            secret,
            algorithm,
            expiration_minutes,
        })
    }
}

/// Internal JWT claims structure for serialization.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // user id
    exp: i64,    // expiration timestamp
    iat: i64,    // issued at
}

/// JWT-based token service.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: JwtConfig,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            encoding_key,
            decoding_key,
            config,
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user_id: i64) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + TimeDelta::minutes(self.config.expiration_minutes);

        let claims = Claims {
            sub: user_id.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::new(self.config.algorithm),
            &claims,
            &self.encoding_key,
        )
        .map_err(|e| AuthError::Hashing(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<i64, AuthError> {
        // Every failure collapses to the same opaque error: signature,
        // expiry, algorithm, and claim problems must be indistinguishable.
        let validation = Validation::new(self.config.algorithm);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| AuthError::InvalidToken)?;

        token_data
            .claims
            .sub
            .parse()
            .map_err(|_| AuthError::InvalidToken)
    }

    fn expires_in(&self) -> u64 {
        (self.config.expiration_minutes.max(0) as u64) * 60
    }
}
