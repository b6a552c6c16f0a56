use serde::{Deserialize, Serialize};

use super::double_option;

/// Update for admin and teacher accounts. A new `password` is re-hashed
/// before storage; the role cannot be changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub department: Option<Option<String>>,
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
}
