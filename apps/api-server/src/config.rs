//! Application configuration loaded from the environment.

use murmur_infra::auth::JwtConfig;
use murmur_infra::database::DatabaseConfig;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
    #[error(transparent)]
    Jwt(#[from] murmur_infra::auth::UnsupportedAlgorithm),
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database = DatabaseConfig {
            url: require("DATABASE_URL")?,
            max_connections: parse_or("DB_MAX_CONNECTIONS", 100)?,
            min_connections: parse_or("DB_MIN_CONNECTIONS", 10)?,
            connect_timeout_secs: parse_or("DB_CONNECT_TIMEOUT_SECS", 10)?,
            connect_attempts: parse_or("DB_CONNECT_ATTEMPTS", 5)?,
        };

        let jwt = JwtConfig::new(
            require("JWT_SECRET")?,
            &env_or("JWT_ALGORITHM", "HS256"),
            parse_or("JWT_EXPIRATION_MINUTES", 30)?,
        )?;

        Ok(Self {
            host: env_or("HOST", "127.0.0.1"),
            port: parse_or("PORT", 8080)?,
            database,
            jwt,
        })
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::Missing(name))
}

fn parse_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}
