//! Integration tests for layered settings loading.
//!
//! Loading reads process environment (`XDG_CONFIG_HOME`, `ORGUNIT_*`), so every test
//! runs `#[serial]` inside an `IsolatedEnv` that points the global config directory at
//! an empty temp dir and clears the `ORGUNIT_*` overrides.

use std::env;
use std::fs;
use std::path::PathBuf;

use serial_test::serial;
use tempfile::TempDir;

use orgunit::{OrgUnitError, OrganizationalUnit, Settings};

const ISOLATED_VARS: [&str; 4] = [
    "XDG_CONFIG_HOME",
    "ORGUNIT_BASE_ALIAS",
    "ORGUNIT_DELIMITER",
    "ORGUNIT_ROOTED_PATHS",
];

/// Scoped environment for settings loading; restores the previous values on drop.
struct IsolatedEnv {
    config_home: TempDir,
    saved: Vec<(&'static str, Option<String>)>,
}

impl IsolatedEnv {
    fn new() -> Self {
        let saved = ISOLATED_VARS
            .iter()
            .map(|name| (*name, env::var(name).ok()))
            .collect();
        let config_home = TempDir::new().unwrap();
        for name in &ISOLATED_VARS[1..] {
            env::remove_var(name);
        }
        env::set_var("XDG_CONFIG_HOME", config_home.path());
        Self { config_home, saved }
    }

    fn set(&self, name: &str, value: &str) {
        env::set_var(name, value);
    }
}

impl Drop for IsolatedEnv {
    fn drop(&mut self) {
        for (name, value) in &self.saved {
            match value {
                Some(value) => env::set_var(name, value),
                None => env::remove_var(name),
            }
        }
    }
}

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("orgunit.toml");
    fs::write(&path, content).expect("write config file");
    path
}

#[test]
#[serial]
fn given_no_config_file_when_load_then_uses_defaults() {
    let _env = IsolatedEnv::new();

    let settings = Settings::load(None).expect("load defaults");

    assert_eq!(settings, Settings::default());
}

#[test]
#[serial]
fn given_config_file_when_load_then_overrides_defaults() {
    let _env = IsolatedEnv::new();
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
base_alias = "Root"
delimiter = "/"
rooted_paths = true
"#,
    );

    // Act
    let settings = Settings::load(Some(&path)).expect("load settings");
    let config = settings.to_config().expect("valid settings");

    // Assert
    assert_eq!(settings.base_alias, "Root");
    assert_eq!(config.base_alias(), "root");
    assert_eq!(config.delimiter(), '/');
    assert!(config.accepts_rooted_paths());

    let unit = OrganizationalUnit::parse("root/a/b", &config).unwrap();
    assert_eq!(unit.nodes(), ["a", "b"]);
}

#[test]
#[serial]
fn given_partial_config_file_when_load_then_keeps_remaining_defaults() {
    let _env = IsolatedEnv::new();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "delimiter = \"|\"\n");

    let settings = Settings::load(Some(&path)).expect("load settings");

    assert_eq!(settings.delimiter, "|");
    assert_eq!(settings.base_alias, "core");
    assert!(!settings.rooted_paths);
}

#[test]
#[serial]
fn given_missing_explicit_file_when_load_then_config_error() {
    let _env = IsolatedEnv::new();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.toml");

    let result = Settings::load(Some(&path));

    assert!(matches!(result, Err(OrgUnitError::InvalidConfig { .. })));
}

#[test]
#[serial]
fn given_malformed_file_when_load_then_config_error() {
    let _env = IsolatedEnv::new();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "delimiter = [\n");

    assert!(Settings::load(Some(&path)).is_err());
}

#[test]
#[serial]
fn given_alias_containing_delimiter_when_to_config_then_rejected() {
    let _env = IsolatedEnv::new();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "base_alias = \"a.b\"\n");

    let settings = Settings::load(Some(&path)).expect("file itself is valid");

    let err = settings.to_config().unwrap_err();
    assert!(err.to_string().contains("must not contain the delimiter"));
}

#[test]
#[serial]
fn given_loaded_settings_when_to_toml_then_reloadable() {
    let _env = IsolatedEnv::new();
    let dir = TempDir::new().unwrap();
    let original = Settings {
        base_alias: "hq".to_string(),
        delimiter: "/".to_string(),
        rooted_paths: false,
    };
    let path = write_config(&dir, &original.to_toml().unwrap());

    let reloaded = Settings::load(Some(&path)).unwrap();

    assert_eq!(reloaded, original);
}

#[test]
#[serial]
fn given_env_vars_when_load_then_override_file_layer() {
    // Arrange
    let env = IsolatedEnv::new();
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
base_alias = "hq"
delimiter = "|"
rooted_paths = false
"#,
    );
    env.set("ORGUNIT_BASE_ALIAS", "Root");
    env.set("ORGUNIT_DELIMITER", "/");
    env.set("ORGUNIT_ROOTED_PATHS", "true");

    // Act
    let settings = Settings::load(Some(&path)).expect("load settings");

    // Assert
    assert_eq!(
        settings,
        Settings {
            base_alias: "Root".to_string(),
            delimiter: "/".to_string(),
            rooted_paths: true,
        }
    );
    let config = settings.to_config().unwrap();
    let unit = OrganizationalUnit::parse("ROOT/a/b", &config).unwrap();
    assert_eq!(unit.nodes(), ["a", "b"]);
}

#[test]
#[serial]
fn given_single_env_var_when_load_then_other_fields_keep_file_values() {
    let env = IsolatedEnv::new();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "base_alias = \"hq\"\ndelimiter = \"|\"\n");
    env.set("ORGUNIT_DELIMITER", ":");

    let settings = Settings::load(Some(&path)).unwrap();

    assert_eq!(settings.base_alias, "hq");
    assert_eq!(settings.delimiter, ":");
    assert!(!settings.rooted_paths);
}

#[cfg(target_os = "linux")]
#[test]
#[serial]
fn given_global_config_file_when_load_then_explicit_file_wins() {
    let env = IsolatedEnv::new();
    let global_dir = env.config_home.path().join("orgunit");
    fs::create_dir_all(&global_dir).unwrap();
    fs::write(
        global_dir.join("orgunit.toml"),
        "base_alias = \"global\"\ndelimiter = \"/\"\n",
    )
    .unwrap();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "delimiter = \"|\"\n");

    let global_only = Settings::load(None).unwrap();
    let layered = Settings::load(Some(&path)).unwrap();

    assert_eq!(global_only.base_alias, "global");
    assert_eq!(global_only.delimiter, "/");
    assert_eq!(layered.base_alias, "global");
    assert_eq!(layered.delimiter, "|");
}
