use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Subject {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}
