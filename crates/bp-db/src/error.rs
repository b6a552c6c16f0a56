//! Database error types for bp-db.

use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A required lookup matched no rows.
    #[error("{0}")]
    NotFound(String),

    /// A uniqueness rule was violated (e.g. a duplicate email).
    #[error("{0}")]
    Conflict(String),

    /// Input referenced rows that do not exist or was otherwise unusable.
    #[error("{0}")]
    Validation(String),

    /// A SQL query failed or returned malformed data.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Password hashing failed.
    #[error(transparent)]
    Auth(#[from] bp_auth::AuthError),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    /// Classify a failed write. Constraint violations become [`Self::Conflict`]
    /// (carrying `conflict`) or [`Self::Validation`]; anything else stays a
    /// libSQL error.
    ///
    /// Matches on message text because local and remote connections report
    /// constraint failures through different error variants.
    #[must_use]
    pub fn from_write(err: libsql::Error, conflict: &str) -> Self {
        let text = err.to_string();
        if text.contains("UNIQUE constraint failed")
            || text.contains("PRIMARY KEY constraint failed")
        {
            Self::Conflict(conflict.to_string())
        } else if text.contains("FOREIGN KEY constraint failed") {
            Self::Validation("Referenced student, subject, or teacher does not exist".into())
        } else {
            Self::LibSql(err)
        }
    }
}
