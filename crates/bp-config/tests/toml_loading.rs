//! TOML loading through figment, sandboxed with `figment::Jail`.

use bp_config::{BrightConfig, ConfigError};
use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;

fn from_file(path: &str) -> Figment {
    Figment::from(Serialized::defaults(BrightConfig::default())).merge(Toml::file(path))
}

#[test]
fn loads_database_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
url = "libsql://school.turso.io"
auth_token = "turso-token"
"#,
        )?;

        let config: BrightConfig = from_file("config.toml").extract()?;
        assert_eq!(config.database.url, "libsql://school.turso.io");
        assert_eq!(config.database.auth_token, "turso-token");
        assert_eq!(config.database.local_path, "brightpath.db");
        assert!(config.database.is_remote());
        Ok(())
    });
}

#[test]
fn loads_full_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[llm]
api_key = "sk-test"
model = "gpt-4o-mini"
timeout_secs = 10

[server]
bind = "0.0.0.0:9000"
cors_allowed_origins = ["http://localhost:3000"]
log_level = "debug"

[school]
grades = ["Form 1", "Form 2"]
default_parent_password = "changeme"
bcrypt_cost = 4
"#,
        )?;

        let config = BrightConfig::from_figment(&from_file("config.toml"))
            .map_err(|e| e.to_string())?;
        assert!(config.llm.is_configured());
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.timeout_secs, 10);
        assert_eq!(config.server.bind, "0.0.0.0:9000");
        assert_eq!(config.server.cors_allowed_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.server.log_level, "debug");
        assert_eq!(config.school.grades, vec!["Form 1", "Form 2"]);
        assert_eq!(config.school.default_parent_password, "changeme");
        assert_eq!(config.school.bcrypt_cost, 4);
        Ok(())
    });
}

#[test]
fn local_brightpath_toml_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "brightpath.toml",
            r#"
[database]
local_path = "school.db"
"#,
        )?;

        let config = BrightConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.database.local_path, "school.db");
        Ok(())
    });
}

#[test]
fn empty_grade_list_fails_validation() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r"
[school]
grades = []
",
        )?;

        let err = BrightConfig::from_figment(&from_file("config.toml"))
            .expect_err("empty grades should be rejected");
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        Ok(())
    });
}
