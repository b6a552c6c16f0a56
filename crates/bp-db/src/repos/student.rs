//! Student repository: CRUD, subject enrolment, and listing with subjects.

use std::collections::HashMap;

use chrono::Utc;

use bp_core::entities::Student;
use bp_core::requests::{NewStudent, StudentSubjectLink};
use bp_core::responses::StudentWithSubjects;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_optional_date};
use crate::service::SchoolService;
use crate::updates::{SetClauses, StudentUpdate};

pub(crate) const SELECT_COLS: &str = "id, reg_no, name, gender, date_of_birth, grade, created_at";

pub(crate) fn row_to_student(row: &libsql::Row) -> Result<Student, DatabaseError> {
    row_to_student_at(row, 0)
}

/// Parse [`SELECT_COLS`] starting at column `offset`.
pub(crate) fn row_to_student_at(row: &libsql::Row, offset: i32) -> Result<Student, DatabaseError> {
    Ok(Student {
        id: row.get(offset)?,
        reg_no: get_opt_string(row, offset + 1)?,
        name: row.get(offset + 2)?,
        gender: get_opt_string(row, offset + 3)?,
        date_of_birth: parse_optional_date(get_opt_string(row, offset + 4)?.as_deref())?,
        grade: row.get(offset + 5)?,
        created_at: parse_datetime(&row.get::<String>(offset + 6)?)?,
    })
}

fn not_found(id: i64) -> DatabaseError {
    DatabaseError::NotFound(format!("Student {id} not found"))
}

fn date_param(date: Option<chrono::NaiveDate>) -> Option<String> {
    date.map(|d| d.format("%Y-%m-%d").to_string())
}

impl SchoolService {
    /// Create a student. The registration number is assigned by the store.
    pub async fn create_student(&self, student: &NewStudent) -> Result<Student, DatabaseError> {
        let id = self
            .insert_returning_id(
                "INSERT INTO students (name, gender, date_of_birth, grade, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5) RETURNING id",
                libsql::params![
                    student.name.as_str(),
                    student.gender.as_deref(),
                    date_param(student.date_of_birth),
                    student.grade.as_str(),
                    Utc::now().to_rfc3339()
                ],
                "Student already exists",
            )
            .await?;
        let created = self.get_student(id).await?;
        tracing::info!(student_id = id, reg_no = ?created.reg_no, "student created");
        Ok(created)
    }

    pub async fn get_student(&self, id: i64) -> Result<Student, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM students WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or_else(|| not_found(id))?;
        row_to_student(&row)
    }

    /// Look up a student by registration (admission) number.
    pub async fn find_student_by_reg_no(
        &self,
        reg_no: &str,
    ) -> Result<Option<Student>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM students WHERE reg_no = ?1"),
                [reg_no],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_student(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn list_students(&self) -> Result<Vec<Student>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM students ORDER BY id"), ())
            .await?;

        let mut students = Vec::new();
        while let Some(row) = rows.next().await? {
            students.push(row_to_student(&row)?);
        }
        Ok(students)
    }

    pub async fn list_students_with_subjects(
        &self,
    ) -> Result<Vec<StudentWithSubjects>, DatabaseError> {
        let mut subjects = self.subjects_by_student().await?;
        Ok(self
            .list_students()
            .await?
            .into_iter()
            .map(|student| StudentWithSubjects {
                subjects: subjects.remove(&student.id).unwrap_or_default(),
                student,
            })
            .collect())
    }

    /// Student id to the names of the subjects they take.
    pub(crate) async fn subjects_by_student(
        &self,
    ) -> Result<HashMap<i64, Vec<String>>, DatabaseError> {
        let mut map: HashMap<i64, Vec<String>> = HashMap::new();
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT ss.student_id, s.name FROM student_subjects ss
                 JOIN subjects s ON s.id = ss.subject_id
                 ORDER BY s.id",
                (),
            )
            .await?;
        while let Some(row) = rows.next().await? {
            map.entry(row.get::<i64>(0)?)
                .or_default()
                .push(row.get::<String>(1)?);
        }
        Ok(map)
    }

    /// Enrol a student in a subject.
    pub async fn enroll_student(&self, link: StudentSubjectLink) -> Result<(), DatabaseError> {
        self.execute_write(
            "INSERT INTO student_subjects (student_id, subject_id) VALUES (?1, ?2)",
            libsql::params![link.student_id, link.subject_id],
            "Student is already enrolled in this subject",
        )
        .await?;
        tracing::info!(
            student_id = link.student_id,
            subject_id = link.subject_id,
            "student enrolled"
        );
        Ok(())
    }

    pub async fn update_student(
        &self,
        id: i64,
        update: StudentUpdate,
    ) -> Result<Student, DatabaseError> {
        let mut sets = SetClauses::default();
        if let Some(name) = update.name {
            sets.push("name", name);
        }
        if let Some(gender) = update.gender {
            sets.push_nullable("gender", gender);
        }
        if let Some(date_of_birth) = update.date_of_birth {
            sets.push_nullable("date_of_birth", date_param(date_of_birth));
        }
        if let Some(grade) = update.grade {
            sets.push("grade", grade);
        }
        if sets.is_empty() {
            return self.get_student(id).await;
        }

        let (sql, params) = sets.into_update("students", vec![("id", id.into())]);
        let changed = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if changed == 0 {
            return Err(not_found(id));
        }
        self.get_student(id).await
    }

    /// Delete a student. Results, compiled results, and links cascade.
    pub async fn delete_student(&self, id: i64) -> Result<(), DatabaseError> {
        let deleted = self
            .db()
            .conn()
            .execute("DELETE FROM students WHERE id = ?1", [id])
            .await?;
        if deleted == 0 {
            return Err(not_found(id));
        }
        tracing::info!(student_id = id, "student deleted");
        Ok(())
    }
}
