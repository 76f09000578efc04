//! Database connection management and repositories.

mod connection;
pub mod entity;
mod repos;

pub use connection::{DatabaseConfig, connect};
pub use sea_orm::DbConn;
pub use repos::{PostgresPostRepository, PostgresRatingRepository, PostgresUserRepository};

#[cfg(test)]
mod tests;
