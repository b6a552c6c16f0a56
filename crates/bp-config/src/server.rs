//! HTTP server configuration.

use serde::{Deserialize, Serialize};

fn default_bind() -> String {
    "127.0.0.1:8000".to_string()
}

fn default_cors_allowed_origins() -> Vec<String> {
    vec![
        "http://127.0.0.1:5500".to_string(),
        "http://localhost:5500".to_string(),
        "https://brightpath-six.vercel.app".to_string(),
    ]
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Socket address to listen on.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Exact `Origin` values allowed to call the API from a browser.
    #[serde(default = "default_cors_allowed_origins")]
    pub cors_allowed_origins: Vec<String>,

    /// Fallback `tracing` filter when `BRIGHTPATH_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            cors_allowed_origins: default_cors_allowed_origins(),
            log_level: default_log_level(),
        }
    }
}
