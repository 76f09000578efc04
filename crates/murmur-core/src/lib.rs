//! # Murmur Core
//!
//! The domain layer of the Murmur posting service.
//! This crate contains pure business logic with zero infrastructure
//! dependencies: entities, the error taxonomy, the ports implemented by
//! infrastructure, and the services enforcing visibility, ownership, and
//! rating rules.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
