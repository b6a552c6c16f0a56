//! Service layer hosting all repository methods.
//!
//! `SchoolService` wraps `SchoolDb` together with the school-level settings
//! the repositories need (grade list, password policy). All repo methods are
//! implemented as `impl SchoolService` in [`crate::repos`].

use bp_config::{DatabaseConfig, SchoolConfig};

use crate::SchoolDb;
use crate::error::DatabaseError;

/// School-level settings consulted by repository methods.
#[derive(Debug, Clone)]
pub struct SchoolSettings {
    /// Grade labels reported by the coverage summary, in order.
    pub grades: Vec<String>,
    /// Password for admin-created parent logins without one.
    pub default_parent_password: String,
    /// bcrypt work factor for new hashes.
    pub bcrypt_cost: u32,
}

impl From<&SchoolConfig> for SchoolSettings {
    fn from(config: &SchoolConfig) -> Self {
        Self {
            grades: config.grades.clone(),
            default_parent_password: config.default_parent_password.clone(),
            bcrypt_cost: config.bcrypt_cost,
        }
    }
}

impl Default for SchoolSettings {
    fn default() -> Self {
        Self::from(&SchoolConfig::default())
    }
}

pub struct SchoolService {
    db: SchoolDb,
    settings: SchoolSettings,
}

impl SchoolService {
    /// Open the configured database: remote when `url` and `auth_token` are
    /// set, otherwise the local file at `local_path`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or migrated.
    pub async fn connect(
        database: &DatabaseConfig,
        school: &SchoolConfig,
    ) -> Result<Self, DatabaseError> {
        let db = if database.is_remote() {
            tracing::info!(url = %database.url, "opening remote database");
            SchoolDb::open_remote(&database.url, &database.auth_token).await?
        } else {
            tracing::info!(path = %database.local_path, "opening local database");
            SchoolDb::open_local(&database.local_path).await?
        };
        Ok(Self::from_db(db, SchoolSettings::from(school)))
    }

    /// Create from an existing `SchoolDb` (for testing).
    #[must_use]
    pub const fn from_db(db: SchoolDb, settings: SchoolSettings) -> Self {
        Self { db, settings }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &SchoolDb {
        &self.db
    }

    #[must_use]
    pub const fn settings(&self) -> &SchoolSettings {
        &self.settings
    }

    /// Hash a password off the async runtime; bcrypt is CPU-bound.
    pub(crate) async fn hash_password(&self, plain: &str) -> Result<String, DatabaseError> {
        let plain = plain.to_string();
        let cost = self.settings.bcrypt_cost;
        tokio::task::spawn_blocking(move || bp_auth::hash_password(&plain, cost))
            .await
            .map_err(|e| DatabaseError::Other(e.into()))?
            .map_err(DatabaseError::from)
    }

    pub(crate) async fn verify_password(
        &self,
        plain: &str,
        stored_hash: &str,
    ) -> Result<bool, DatabaseError> {
        let plain = plain.to_string();
        let stored_hash = stored_hash.to_string();
        tokio::task::spawn_blocking(move || bp_auth::verify_password(&plain, &stored_hash))
            .await
            .map_err(|e| DatabaseError::Other(e.into()))
    }

    /// Run an `INSERT ... RETURNING id` and return the new id. Constraint
    /// violations are classified with [`DatabaseError::from_write`].
    pub(crate) async fn insert_returning_id(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
        conflict: &str,
    ) -> Result<i64, DatabaseError> {
        let mut rows = self
            .db
            .conn()
            .query(sql, params)
            .await
            .map_err(|e| DatabaseError::from_write(e, conflict))?;
        let row = rows
            .next()
            .await
            .map_err(|e| DatabaseError::from_write(e, conflict))?
            .ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<i64>(0)?)
    }

    /// Run an `UPDATE`/`DELETE`/`INSERT` and return the affected row count.
    pub(crate) async fn execute_write(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
        conflict: &str,
    ) -> Result<u64, DatabaseError> {
        self.db
            .conn()
            .execute(sql, params)
            .await
            .map_err(|e| DatabaseError::from_write(e, conflict))
    }

    /// Run a single-column `SELECT` and return the first row's integer id.
    pub(crate) async fn query_id(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<Option<i64>, DatabaseError> {
        let mut rows = self.db.conn().query(sql, params).await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row.get::<i64>(0)?)),
            None => Ok(None),
        }
    }
}
