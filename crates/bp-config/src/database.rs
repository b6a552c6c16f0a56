//! libSQL store configuration.

use serde::{Deserialize, Serialize};

fn default_local_path() -> String {
    "brightpath.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Remote database URL (e.g., `libsql://school-org.turso.io`). Empty means local.
    #[serde(default)]
    pub url: String,

    /// Auth token for the remote database.
    #[serde(default)]
    pub auth_token: String,

    /// Path of the local database file used when no remote is configured.
    #[serde(default = "default_local_path")]
    pub local_path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            auth_token: String::new(),
            local_path: default_local_path(),
        }
    }
}

impl DatabaseConfig {
    /// Check if the remote store has the minimum required fields.
    pub fn is_remote(&self) -> bool {
        !self.url.is_empty() && !self.auth_token.is_empty()
    }
}
