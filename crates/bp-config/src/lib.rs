//! # bp-config
//!
//! Layered configuration loading for BrightPath using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`BRIGHTPATH_*` prefix, `__` as separator)
//! 2. Working-directory `brightpath.toml`
//! 3. User-level `~/.config/brightpath/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `BRIGHTPATH_DATABASE__URL` -> `database.url`,
//! `BRIGHTPATH_LLM__API_KEY` -> `llm.api_key`, and so on.
//!
//! ```no_run
//! use bp_config::BrightConfig;
//!
//! let config = BrightConfig::load_with_dotenv().expect("config");
//! if config.database.is_remote() {
//!     println!("Remote store: {}", config.database.url);
//! }
//! ```

mod database;
mod error;
mod llm;
mod school;
mod server;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use llm::LlmConfig;
pub use school::SchoolConfig;
pub use server::ServerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BrightConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub school: SchoolConfig,
}

impl BrightConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source fails to parse and
    /// [`ConfigError::InvalidValue`] when the merged values fail validation.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration after reading a `.env` file, if one exists.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Extract and validate a config from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from("brightpath.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("BRIGHTPATH_").split("__"))
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.school.validate()?;
        if self.server.bind.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "server.bind".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("brightpath").join("config.toml"))
    }

    /// Walks up from `CARGO_MANIFEST_DIR` (if set) looking for `.env`, then
    /// falls back to the current directory. Missing files are ignored.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
