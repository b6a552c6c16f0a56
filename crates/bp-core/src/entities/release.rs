use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Per-term visibility gate. A term without a row is treated as unreleased.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ResultRelease {
    pub term: String,
    pub released: bool,
    pub released_at: DateTime<Utc>,
    pub updated_by: Option<i64>,
}
