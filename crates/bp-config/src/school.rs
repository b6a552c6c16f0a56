//! School-level settings: grade enumeration and account defaults.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_grades() -> Vec<String> {
    (1..=9).map(|i| format!("Grade {i}")).collect()
}

fn default_parent_password() -> String {
    "12345".to_string()
}

const fn default_bcrypt_cost() -> u32 {
    12
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SchoolConfig {
    /// Grade labels reported by the coverage summary, in display order.
    #[serde(default = "default_grades")]
    pub grades: Vec<String>,

    /// Password given to admin-created parent logins when none is supplied.
    #[serde(default = "default_parent_password")]
    pub default_parent_password: String,

    /// bcrypt work factor for new password hashes.
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl Default for SchoolConfig {
    fn default() -> Self {
        Self {
            grades: default_grades(),
            default_parent_password: default_parent_password(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

impl SchoolConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an empty or blank grade list,
    /// or a bcrypt cost outside `4..=31`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grades.is_empty() || self.grades.iter().any(|g| g.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "school.grades".into(),
                reason: "must list at least one non-blank grade label".into(),
            });
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                field: "school.bcrypt_cost".into(),
                reason: format!("{} is outside 4..=31", self.bcrypt_cost),
            });
        }
        Ok(())
    }
}
