//! # Murmur Infra
//!
//! Infrastructure implementations of the `murmur-core` ports: PostgreSQL
//! repositories over SeaORM, the JWT token service, and the argon2 password
//! service.

pub mod auth;
pub mod database;
