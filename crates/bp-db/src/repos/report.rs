//! Result reporting: term compilation, coverage summary, class results, and
//! the release-gated student performance view.
//!
//! Each operation fetches rows wholesale and hands them to the pure passes
//! in `bp_core::aggregate`.

use std::collections::HashMap;

use chrono::Utc;

use bp_core::aggregate;
use bp_core::entities::CompiledResult;
use bp_core::responses::{ClassSubjectSummary, GradeCoverage, Performance};

use crate::error::DatabaseError;
use crate::helpers::get_number;
use crate::service::SchoolService;

impl SchoolService {
    /// Compile per-student totals and averages for `term` and upsert them.
    ///
    /// Re-running overwrites the previous compilation. There is no atomicity
    /// across the upsert loop.
    pub async fn compile_results(&self, term: &str) -> Result<Vec<CompiledResult>, DatabaseError> {
        let rows = self.results_for_term(term).await?;
        if rows.is_empty() {
            return Err(DatabaseError::NotFound(
                "No marks found for this term.".into(),
            ));
        }

        let compiled = aggregate::compile_term(term, &rows);
        let compiled_at = Utc::now().to_rfc3339();
        for result in &compiled {
            self.db()
                .conn()
                .execute(
                    "INSERT INTO compiled_results (student_id, term, total_marks, average, compiled_at)
                     VALUES (?1, ?2, ?3, ?4, ?5)
                     ON CONFLICT(student_id, term) DO UPDATE SET
                        total_marks = excluded.total_marks,
                        average = excluded.average,
                        compiled_at = excluded.compiled_at",
                    libsql::params![
                        result.student_id,
                        result.term.as_str(),
                        result.total_marks,
                        result.average,
                        compiled_at.as_str()
                    ],
                )
                .await?;
        }

        tracing::info!(term, students = compiled.len(), rows = rows.len(), "results compiled");
        Ok(compiled)
    }

    /// Stored compilation for `term`, ordered by student.
    pub async fn compiled_results(&self, term: &str) -> Result<Vec<CompiledResult>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT student_id, term, total_marks, average FROM compiled_results
                 WHERE term = ?1 ORDER BY student_id",
                [term],
            )
            .await?;

        let mut compiled = Vec::new();
        while let Some(row) = rows.next().await? {
            compiled.push(CompiledResult {
                student_id: row.get(0)?,
                term: row.get(1)?,
                total_marks: get_number(&row, 2)?,
                average: get_number(&row, 3)?,
            });
        }
        Ok(compiled)
    }

    /// Upload coverage for every configured grade in `term`.
    pub async fn results_summary(&self, term: &str) -> Result<Vec<GradeCoverage>, DatabaseError> {
        let total_subjects = self.list_subjects().await?.len();
        let students = self.list_students().await?;
        let rows = self.results_for_term(term).await?;
        tracing::debug!(
            term,
            total_subjects,
            students = students.len(),
            rows = rows.len(),
            "summarising coverage"
        );
        Ok(aggregate::coverage_summary(
            &self.settings().grades,
            total_subjects,
            &students,
            &rows,
        ))
    }

    /// Per-subject submissions for `grade` across every term.
    pub async fn class_results(
        &self,
        grade: &str,
    ) -> Result<Vec<ClassSubjectSummary>, DatabaseError> {
        let rows = self.all_results().await?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let students = self.list_students().await?;
        let subjects = self.subject_names().await?;
        let teachers = self.teacher_names().await?;
        Ok(aggregate::class_results(
            grade, &students, &rows, &subjects, &teachers,
        ))
    }

    /// A student's results in released terms only. Terms without a gate row
    /// are closed.
    pub async fn student_performance(&self, student_id: i64) -> Result<Performance, DatabaseError> {
        let rows = self.results_for_student(student_id).await?;
        if rows.is_empty() {
            return Ok(aggregate::released_performance(
                &rows,
                &HashMap::new(),
                &HashMap::new(),
            ));
        }
        let released = self.release_flags().await?;
        let subjects = self.subject_names().await?;
        Ok(aggregate::released_performance(&rows, &released, &subjects))
    }
}
