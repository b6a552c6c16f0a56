//! Teacher-to-subject assignments.

use bp_core::requests::TeacherSubjectLink;
use bp_core::responses::Assignment;

use crate::error::DatabaseError;
use crate::service::SchoolService;

impl SchoolService {
    pub async fn assign_subject(&self, link: TeacherSubjectLink) -> Result<(), DatabaseError> {
        self.execute_write(
            "INSERT INTO teacher_subjects (teacher_id, subject_id) VALUES (?1, ?2)",
            libsql::params![link.teacher_id, link.subject_id],
            "Subject already assigned to this teacher",
        )
        .await?;
        tracing::info!(
            teacher_id = link.teacher_id,
            subject_id = link.subject_id,
            "subject assigned"
        );
        Ok(())
    }

    /// Every assignment whose teacher and subject both still exist, by name.
    pub async fn list_assignments(&self) -> Result<Vec<Assignment>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT u.name, s.name FROM teacher_subjects ts
                 JOIN users u ON u.id = ts.teacher_id
                 JOIN subjects s ON s.id = ts.subject_id
                 ORDER BY u.id, s.id",
                (),
            )
            .await?;

        let mut assignments = Vec::new();
        while let Some(row) = rows.next().await? {
            assignments.push(Assignment {
                teacher: row.get(0)?,
                subject: row.get(1)?,
            });
        }
        Ok(assignments)
    }
}
