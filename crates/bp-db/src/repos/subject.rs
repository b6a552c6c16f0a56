//! Subject repository.

use std::collections::HashMap;

use bp_core::entities::Subject;
use bp_core::requests::NewSubject;

use crate::error::DatabaseError;
use crate::helpers::get_opt_string;
use crate::service::SchoolService;
use crate::updates::{SetClauses, SubjectUpdate};

const SELECT_COLS: &str = "id, name, description";

fn row_to_subject(row: &libsql::Row) -> Result<Subject, DatabaseError> {
    Ok(Subject {
        id: row.get(0)?,
        name: row.get(1)?,
        description: get_opt_string(row, 2)?,
    })
}

fn not_found(id: i64) -> DatabaseError {
    DatabaseError::NotFound(format!("Subject {id} not found"))
}

impl SchoolService {
    pub async fn create_subject(&self, subject: &NewSubject) -> Result<Subject, DatabaseError> {
        let id = self
            .insert_returning_id(
                "INSERT INTO subjects (name, description) VALUES (?1, ?2) RETURNING id",
                libsql::params![subject.name.as_str(), subject.description.as_deref()],
                "Subject already exists",
            )
            .await?;
        tracing::info!(subject_id = id, name = %subject.name, "subject created");
        Ok(Subject {
            id,
            name: subject.name.clone(),
            description: subject.description.clone(),
        })
    }

    pub async fn get_subject(&self, id: i64) -> Result<Subject, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM subjects WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or_else(|| not_found(id))?;
        row_to_subject(&row)
    }

    pub async fn list_subjects(&self) -> Result<Vec<Subject>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM subjects ORDER BY id"), ())
            .await?;

        let mut subjects = Vec::new();
        while let Some(row) = rows.next().await? {
            subjects.push(row_to_subject(&row)?);
        }
        Ok(subjects)
    }

    pub async fn update_subject(
        &self,
        id: i64,
        update: SubjectUpdate,
    ) -> Result<Subject, DatabaseError> {
        let mut sets = SetClauses::default();
        if let Some(name) = update.name {
            sets.push("name", name);
        }
        if let Some(description) = update.description {
            sets.push_nullable("description", description);
        }
        if sets.is_empty() {
            return self.get_subject(id).await;
        }

        let (sql, params) = sets.into_update("subjects", vec![("id", id.into())]);
        let changed = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if changed == 0 {
            return Err(not_found(id));
        }
        self.get_subject(id).await
    }

    /// Delete a subject. Its results, enrolments, and teacher links cascade.
    pub async fn delete_subject(&self, id: i64) -> Result<(), DatabaseError> {
        let deleted = self
            .db()
            .conn()
            .execute("DELETE FROM subjects WHERE id = ?1", [id])
            .await?;
        if deleted == 0 {
            return Err(not_found(id));
        }
        tracing::info!(subject_id = id, "subject deleted");
        Ok(())
    }

    pub(crate) async fn subject_exists(&self, id: i64) -> Result<bool, DatabaseError> {
        Ok(self
            .query_id("SELECT id FROM subjects WHERE id = ?1", [id])
            .await?
            .is_some())
    }

    /// Subject id to display name.
    pub async fn subject_names(&self) -> Result<HashMap<i64, String>, DatabaseError> {
        Ok(self
            .list_subjects()
            .await?
            .into_iter()
            .map(|s| (s.id, s.name))
            .collect())
    }
}
