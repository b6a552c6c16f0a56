use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An enrolled student. `reg_no` is assigned by the store on insert.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Student {
    pub id: i64,
    pub reg_no: Option<String>,
    pub name: String,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub grade: String,
    pub created_at: DateTime<Utc>,
}
