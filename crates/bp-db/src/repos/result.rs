//! Raw exam results: single and bulk inserts, term/student scans, and the
//! admin results view.

use chrono::Utc;

use bp_core::entities::ExamResult;
use bp_core::requests::ResultInput;
use bp_core::responses::ResultView;

use crate::error::DatabaseError;
use crate::helpers::{get_number, parse_datetime};
use crate::service::SchoolService;

const SELECT_COLS: &str =
    "id, student_id, subject_id, teacher_id, term, exam_type, marks, created_at";

fn row_to_result(row: &libsql::Row) -> Result<ExamResult, DatabaseError> {
    Ok(ExamResult {
        id: row.get(0)?,
        student_id: row.get(1)?,
        subject_id: row.get(2)?,
        teacher_id: row.get(3)?,
        term: row.get(4)?,
        exam_type: row.get(5)?,
        marks: get_number(row, 6)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

impl SchoolService {
    pub async fn add_result(&self, input: &ResultInput) -> Result<ExamResult, DatabaseError> {
        let now = Utc::now();
        let id = self
            .insert_returning_id(
                "INSERT INTO results (student_id, subject_id, teacher_id, term, exam_type, marks, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) RETURNING id",
                libsql::params![
                    input.student_id,
                    input.subject_id,
                    input.teacher_id,
                    input.term.as_str(),
                    input.exam_type.as_str(),
                    input.marks,
                    now.to_rfc3339()
                ],
                "Result already exists",
            )
            .await?;
        tracing::debug!(
            result_id = id,
            student_id = input.student_id,
            subject_id = input.subject_id,
            term = %input.term,
            "result recorded"
        );
        Ok(ExamResult {
            id,
            student_id: input.student_id,
            subject_id: input.subject_id,
            teacher_id: input.teacher_id,
            term: input.term.clone(),
            exam_type: input.exam_type.clone(),
            marks: input.marks,
            created_at: now,
        })
    }

    /// Insert results one by one. A failure stops the loop; rows already
    /// written stay written.
    pub async fn add_results(
        &self,
        inputs: &[ResultInput],
    ) -> Result<Vec<ExamResult>, DatabaseError> {
        let mut inserted = Vec::with_capacity(inputs.len());
        for input in inputs {
            inserted.push(self.add_result(input).await?);
        }
        tracing::info!(count = inserted.len(), "bulk results recorded");
        Ok(inserted)
    }

    async fn query_results(
        &self,
        filter: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<Vec<ExamResult>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM results {filter} ORDER BY id"),
                params,
            )
            .await?;

        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(row_to_result(&row)?);
        }
        Ok(results)
    }

    pub async fn results_for_term(&self, term: &str) -> Result<Vec<ExamResult>, DatabaseError> {
        self.query_results("WHERE term = ?1", [term]).await
    }

    pub async fn results_for_student(
        &self,
        student_id: i64,
    ) -> Result<Vec<ExamResult>, DatabaseError> {
        self.query_results("WHERE student_id = ?1", [student_id])
            .await
    }

    /// Every result across all terms.
    pub async fn all_results(&self) -> Result<Vec<ExamResult>, DatabaseError> {
        self.query_results("", ()).await
    }

    /// Raw results, optionally for one term, with display names. Missing
    /// students read as "Unknown"/"N/A"; missing subjects and teachers as "Unknown".
    pub async fn view_results(&self, term: Option<&str>) -> Result<Vec<ResultView>, DatabaseError> {
        let sql = format!(
            "SELECT COALESCE(st.name, 'Unknown'), COALESCE(st.reg_no, 'N/A'),
                    COALESCE(st.grade, 'N/A'), COALESCE(sb.name, 'Unknown'),
                    COALESCE(u.name, 'Unknown'), r.marks, r.term, r.exam_type
             FROM results r
             LEFT JOIN students st ON st.id = r.student_id
             LEFT JOIN subjects sb ON sb.id = r.subject_id
             LEFT JOIN users u ON u.id = r.teacher_id AND u.role = 'teacher'
             {}
             ORDER BY r.id",
            if term.is_some() { "WHERE r.term = ?1" } else { "" }
        );
        let params: Vec<libsql::Value> = term.map(Into::into).into_iter().collect();
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;

        let mut views = Vec::new();
        while let Some(row) = rows.next().await? {
            views.push(ResultView {
                student_name: row.get(0)?,
                student_reg: row.get(1)?,
                grade: row.get(2)?,
                subject: row.get(3)?,
                teacher: row.get(4)?,
                marks: get_number(&row, 5)?,
                term: row.get(6)?,
                exam_type: row.get(7)?,
            });
        }
        Ok(views)
    }
}
