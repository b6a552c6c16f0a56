use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A notice posted by an admin. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Announcement {
    pub id: i64,
    pub message: String,
    pub posted_by: String,
    pub created_at: DateTime<Utc>,
}
