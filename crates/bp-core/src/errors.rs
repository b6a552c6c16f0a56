//! Cross-cutting error types for BrightPath.
//!
//! Store errors (`DatabaseError`), configuration errors, and upstream API
//! errors are defined in their own crates. The HTTP status mapping lives in
//! `bp-server`, where all crate errors converge.

use thiserror::Error;

/// Errors raised while checking request payloads.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A loosely-typed payload is missing required keys or carries bad values.
    #[error("{0}")]
    Validation(String),
}
