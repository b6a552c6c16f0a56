use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One mark for a student in a subject, term, and exam.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ExamResult {
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub term: String,
    pub exam_type: String,
    pub marks: f64,
    pub created_at: DateTime<Utc>,
}

/// Per-student totals for a term, recomputed wholesale by compilation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CompiledResult {
    pub student_id: i64,
    pub term: String,
    pub total_marks: f64,
    pub average: f64,
}
