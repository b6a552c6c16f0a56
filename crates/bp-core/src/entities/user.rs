use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Role;

/// A login account: admin, teacher, or admin-created parent.
///
/// `department` is only meaningful for teachers.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub department: Option<String>,
    pub created_at: DateTime<Utc>,
}
