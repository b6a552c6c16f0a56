//! Release gate: one row per term controlling result visibility.

use std::collections::HashMap;

use chrono::Utc;

use bp_core::entities::ResultRelease;

use crate::error::DatabaseError;
use crate::helpers::parse_datetime;
use crate::service::SchoolService;

fn row_to_release(row: &libsql::Row) -> Result<ResultRelease, DatabaseError> {
    Ok(ResultRelease {
        term: row.get(0)?,
        released: row.get::<i64>(1)? != 0,
        released_at: parse_datetime(&row.get::<String>(2)?)?,
        updated_by: row.get::<Option<i64>>(3)?,
    })
}

impl SchoolService {
    /// Open or close a term. A single upsert keyed on `term`; `released_at`
    /// records every change.
    pub async fn set_release(
        &self,
        term: &str,
        released: bool,
        admin_id: Option<i64>,
    ) -> Result<ResultRelease, DatabaseError> {
        let now = Utc::now();
        self.db()
            .conn()
            .execute(
                "INSERT INTO result_release (term, released, released_at, updated_by)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(term) DO UPDATE SET
                    released = excluded.released,
                    released_at = excluded.released_at,
                    updated_by = excluded.updated_by",
                libsql::params![term, i64::from(released), now.to_rfc3339(), admin_id],
            )
            .await?;

        tracing::info!(term, released, admin_id = ?admin_id, "release gate changed");
        self.get_release(term)
            .await?
            .ok_or(DatabaseError::NoResult)
    }

    pub async fn get_release(&self, term: &str) -> Result<Option<ResultRelease>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT term, released, released_at, updated_by FROM result_release
                 WHERE term = ?1",
                [term],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_release(&row)?)),
            None => Ok(None),
        }
    }

    /// Term to released flag, for every term that has a gate row.
    pub async fn release_flags(&self) -> Result<HashMap<String, bool>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query("SELECT term, released FROM result_release", ())
            .await?;
        let mut flags = HashMap::new();
        while let Some(row) = rows.next().await? {
            flags.insert(row.get::<String>(0)?, row.get::<i64>(1)? != 0);
        }
        Ok(flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_service;

    #[tokio::test]
    async fn missing_term_has_no_gate_row() {
        let svc = test_service().await;
        assert!(svc.get_release("2025-T1").await.unwrap().is_none());
        assert!(svc.release_flags().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn toggle_keeps_one_row_and_latest_state() {
        let svc = test_service().await;
        let opened = svc.set_release("2025-T1", true, Some(1)).await.unwrap();
        assert!(opened.released);

        let stale = "2020-01-01T00:00:00+00:00";
        svc.db()
            .conn()
            .execute("UPDATE result_release SET released_at = ?1", [stale])
            .await
            .unwrap();

        let closed = svc.set_release("2025-T1", false, None).await.unwrap();
        assert!(!closed.released);
        assert_eq!(closed.updated_by, None);
        assert!(closed.released_at > parse_datetime(stale).unwrap());
        assert!(closed.released_at >= opened.released_at);

        let mut rows = svc
            .db()
            .conn()
            .query("SELECT COUNT(*) FROM result_release", ())
            .await
            .unwrap();
        let count: i64 = rows.next().await.unwrap().unwrap().get(0).unwrap();
        assert_eq!(count, 1);
        assert_eq!(svc.release_flags().await.unwrap().get("2025-T1"), Some(&false));
    }
}
