//! # bp-auth
//!
//! Password hashing for BrightPath accounts. Hashes are bcrypt in the modular
//! crypt format (`$2b$...`), so rows written by other bcrypt implementations
//! verify unchanged.

pub mod error;
pub mod password;

pub use error::AuthError;
pub use password::{hash_password, verify_password};

/// Lowest cost accepted by bcrypt; suitable for tests only.
pub const MIN_COST: u32 = 4;
