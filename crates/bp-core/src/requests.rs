//! Request payloads accepted by the HTTP surface.
//!
//! Strongly-typed payloads reject missing keys at deserialization. The result
//! uploads mirror the loosely-typed bodies teachers send: every key is
//! optional on the wire, and `validate()` turns them into a [`ResultInput`]
//! or a [`CoreError::Validation`].

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

const MISSING_FIELDS: &str = "Missing required fields";

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `/add-admin` and `/add-teacher`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TeacherSignup {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub department: Option<String>,
    /// Subject ids to link in `teacher_subjects`.
    #[serde(default)]
    pub subjects: Vec<i64>,
    #[serde(default)]
    pub grades: Vec<String>,
}

impl TeacherSignup {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the email is not a plausible address.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_email(&self.email)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    pub grade: String,
}

/// Body of `/add-parent`. Without a password the configured default is used.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewParent {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Parent self-signup keyed by the child's admission (registration) number.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ParentSignup {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub admission_no: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewSubject {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TeacherSubjectLink {
    pub teacher_id: i64,
    pub subject_id: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StudentSubjectLink {
    pub student_id: i64,
    pub subject_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewAnnouncement {
    pub message: String,
    #[serde(default)]
    pub posted_by: Option<String>,
}

/// A validated result row ready for insertion.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ResultInput {
    pub student_id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub term: String,
    pub exam_type: String,
    pub marks: f64,
}

/// Body of `/add-result`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct NewResult {
    pub student_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub term: Option<String>,
    pub exam_type: Option<String>,
    pub marks: Option<f64>,
}

impl NewResult {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if any key is absent.
    pub fn validate(self) -> Result<ResultInput, CoreError> {
        match self {
            Self {
                student_id: Some(student_id),
                subject_id: Some(subject_id),
                teacher_id: Some(teacher_id),
                term: Some(term),
                exam_type: Some(exam_type),
                marks: Some(marks),
            } => Ok(ResultInput {
                student_id,
                subject_id,
                teacher_id,
                term,
                exam_type,
                marks,
            }),
            _ => Err(CoreError::Validation(MISSING_FIELDS.into())),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct BulkResultEntry {
    pub student_id: Option<i64>,
    pub marks: Option<f64>,
}

/// Body of `/add-results-bulk`: one subject/exam, many students.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct BulkResults {
    pub term: Option<String>,
    pub exam_type: Option<String>,
    pub teacher_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub results: Option<Vec<BulkResultEntry>>,
}

impl BulkResults {
    /// Expand into one input per complete entry. Entries missing
    /// `student_id` or `marks` are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if a shared key is absent or the
    /// entry list is empty.
    pub fn validate(self) -> Result<Vec<ResultInput>, CoreError> {
        let (Some(term), Some(exam_type), Some(teacher_id), Some(subject_id), Some(entries)) = (
            self.term,
            self.exam_type,
            self.teacher_id,
            self.subject_id,
            self.results,
        ) else {
            return Err(CoreError::Validation(format!("{MISSING_FIELDS}.")));
        };
        if entries.is_empty() {
            return Err(CoreError::Validation(
                "Results list must contain at least one entry.".into(),
            ));
        }
        Ok(entries
            .into_iter()
            .filter_map(|entry| {
                Some(ResultInput {
                    student_id: entry.student_id?,
                    subject_id,
                    teacher_id,
                    term: term.clone(),
                    exam_type: exam_type.clone(),
                    marks: entry.marks?,
                })
            })
            .collect())
    }
}

/// Query of `/admin/release-results`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReleaseParams {
    pub term: String,
    pub released: bool,
    #[serde(default)]
    pub admin_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TermParams {
    pub term: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TermFilter {
    #[serde(default)]
    pub term: Option<String>,
}

/// Body of the tutor endpoints. Each endpoint reads the key it needs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TutorRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub concept: Option<String>,
}

impl TutorRequest {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] naming the missing key.
    pub fn require_text(&self) -> Result<&str, CoreError> {
        self.text
            .as_deref()
            .ok_or_else(|| CoreError::Validation("missing field `text`".into()))
    }

    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] naming the missing key.
    pub fn require_concept(&self) -> Result<&str, CoreError> {
        self.concept
            .as_deref()
            .ok_or_else(|| CoreError::Validation("missing field `concept`".into()))
    }
}

/// Minimal address check: one `@` with a non-empty local part and a dotted domain.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] if the address is malformed.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    let valid = email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && !domain.contains('@')
            && domain
                .split_once('.')
                .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
    });
    if valid {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "'{email}' is not a valid email address"
        )))
    }
}
