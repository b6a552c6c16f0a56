use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::double_option;

/// Registration numbers are store-assigned and cannot be updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub gender: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_of_birth: Option<Option<NaiveDate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
}
