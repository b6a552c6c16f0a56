//! # bp-db
//!
//! libSQL storage for BrightPath: accounts, students, subjects, parents,
//! results, the per-term release gate, and announcements.
//!
//! `SchoolDb` owns the connection and schema. `SchoolService` hosts every
//! repository method (one `impl` block per module under [`repos`]) and feeds
//! rows fetched wholesale into the pure passes of `bp_core::aggregate`.
//!
//! A remote Turso database is used when `database.url` and
//! `database.auth_token` are configured, otherwise a local file.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
pub mod updates;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;

pub use service::{SchoolService, SchoolSettings};

/// Database handle: a libSQL database and one shared connection.
pub struct SchoolDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    remote: bool,
}

impl SchoolDb {
    /// Open a local database at `path` (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        Self::init(db, false).await
    }

    /// Open a remote libSQL database over HTTP.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection cannot be established or
    /// migrations fail.
    pub async fn open_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await?;
        Self::init(db, true).await
    }

    async fn init(db: libsql::Database, remote: bool) -> Result<Self, DatabaseError> {
        let conn = db.connect()?;

        // Foreign keys are per-connection in SQLite.
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let school_db = Self { db, conn, remote };
        school_db.run_migrations().await?;
        Ok(school_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Whether this handle talks to a remote database.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        self.remote
    }
}
