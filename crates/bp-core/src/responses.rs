//! JSON view types returned by the HTTP surface.
//!
//! These are joins and projections over entities: a student with subject
//! names, a parent with children, a result row with display names, and the
//! outputs of the aggregation passes in [`crate::aggregate`].

use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Student;
use crate::enums::{CoverageStatus, PerformanceOutcome, Role};

/// Response from `/login`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LoginResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// A student joined with the names of the subjects they take.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StudentWithSubjects {
    #[serde(flatten)]
    pub student: Student,
    pub subjects: Vec<String>,
}

/// A child as shown inside a parent listing (internal ids hidden).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ChildSummary {
    pub reg_no: Option<String>,
    pub name: String,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub grade: String,
    pub subjects: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ParentWithChildren {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub children: Vec<ChildSummary>,
}

/// A student linked to a parent, as returned by `/parents/{id}/students`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LinkedStudent {
    pub reg_no: Option<String>,
    pub name: String,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub grade: String,
    pub created_at: DateTime<Utc>,
}

impl From<Student> for LinkedStudent {
    fn from(s: Student) -> Self {
        Self {
            reg_no: s.reg_no,
            name: s.name,
            gender: s.gender,
            date_of_birth: s.date_of_birth,
            grade: s.grade,
            created_at: s.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TeacherWithSubjects {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub created_at: DateTime<Utc>,
    pub subjects: Vec<String>,
}

/// A teacher/subject pairing by display name.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Assignment {
    pub teacher: String,
    pub subject: String,
}

/// A raw result row with display names, for the admin results view.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ResultView {
    pub student_name: String,
    pub student_reg: String,
    pub grade: String,
    pub subject: String,
    pub teacher: String,
    pub marks: f64,
    pub term: String,
    pub exam_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PerformanceEntry {
    pub subject: String,
    pub marks: f64,
    pub term: String,
    pub exam_type: String,
}

/// Released results for one student.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Performance {
    pub entries: Vec<PerformanceEntry>,
    pub outcome: PerformanceOutcome,
}

/// Upload coverage of one grade for one term.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct GradeCoverage {
    #[serde(rename = "class")]
    pub grade: String,
    pub total_subjects: usize,
    pub uploaded: usize,
    pub pending: usize,
    pub status: CoverageStatus,
}

/// Per-subject submissions and average for one grade.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ClassSubjectSummary {
    pub subject: String,
    pub teacher: String,
    pub uploaded: usize,
    /// Students in the grade with no row for this subject.
    pub pending: usize,
    pub average_marks: Option<f64>,
}
