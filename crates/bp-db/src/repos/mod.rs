//! Repository methods, one module per entity or operation family.
//!
//! Every module adds an `impl SchoolService` block.

pub mod account;
pub mod announcement;
pub mod assignment;
pub mod auth;
pub mod parent;
pub mod release;
pub mod report;
pub mod result;
pub mod student;
pub mod subject;

/// Message for duplicate emails across `users`.
pub const EMAIL_TAKEN: &str = "Email already registered";
