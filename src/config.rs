//! Configuration for parsing and rendering organizational units
//!
//! Every parse call either receives an explicit [`OrgUnitConfig`] or falls back to the
//! process-wide default. The default is meant to be configured once at startup (via
//! [`OrgUnitConfig::set_default`], [`OrgUnitConfig::install`] or [`Settings::apply`])
//! and only read afterwards. Callers must serialize any later reconfiguration themselves.
//!
//! `Settings::load` precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/orgunit/orgunit.toml`
//! 3. Explicit config file passed by the caller
//! 4. Environment variables: `ORGUNIT_*` prefix

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, RwLock};

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{OrgUnitError, OrgUnitResult};

/// Delimiter placed between nodes when none is configured.
pub const DEFAULT_DELIMITER: char = '.';

/// Alias of the base (root) unit when none is configured.
pub const DEFAULT_BASE_ALIAS: &str = "core";

/// Rules for splitting, validating and rendering organizational units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgUnitConfig {
    delimiter: char,
    /// Always stored lowercase
    base_alias: String,
    rooted_paths: bool,
}

impl Default for OrgUnitConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_ALIAS, DEFAULT_DELIMITER)
    }
}

impl OrgUnitConfig {
    /// Create a standalone config. The alias is case-folded before storage.
    pub fn new(base_alias: &str, delimiter: char) -> Self {
        Self {
            delimiter,
            base_alias: base_alias.to_lowercase(),
            rooted_paths: false,
        }
    }

    /// Accept a leading base alias segment, so `core.region.city` parses as `region.city`.
    pub fn with_rooted_paths(mut self, enabled: bool) -> Self {
        self.rooted_paths = enabled;
        self
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn base_alias(&self) -> &str {
        &self.base_alias
    }

    pub fn accepts_rooted_paths(&self) -> bool {
        self.rooted_paths
    }

    /// Case-insensitive match of the trimmed text against the base alias.
    pub fn is_base_alias(&self, text: &str) -> bool {
        text.trim().to_lowercase() == self.base_alias
    }

    /// Reject configs that could never round-trip a unit.
    ///
    /// - the delimiter must not be whitespace
    /// - the alias must not be blank
    /// - the alias must not contain the delimiter
    pub fn validate(&self) -> OrgUnitResult<()> {
        if self.delimiter.is_whitespace() {
            return Err(OrgUnitError::invalid_config(format!(
                "delimiter must not be whitespace, got {:?}",
                self.delimiter
            )));
        }
        if self.base_alias.trim().is_empty() {
            return Err(OrgUnitError::invalid_config("base alias must not be empty"));
        }
        if self.base_alias.contains(self.delimiter) {
            return Err(OrgUnitError::invalid_config(format!(
                "base alias '{}' must not contain the delimiter '{}'",
                self.base_alias, self.delimiter
            )));
        }
        Ok(())
    }

    /// Snapshot of the process-wide default config.
    pub fn global() -> Arc<OrgUnitConfig> {
        let guard = default_holder()
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&*guard)
    }

    /// Overwrite the process-wide default.
    ///
    /// Omitted arguments reset to the compiled defaults rather than keeping their
    /// current value; rooted paths are switched off. The result is not validated;
    /// go through [`Settings::apply`] to reject unusable configs.
    pub fn set_default(base_alias: Option<&str>, delimiter: Option<char>) {
        Self::install(Self::new(
            base_alias.unwrap_or(DEFAULT_BASE_ALIAS),
            delimiter.unwrap_or(DEFAULT_DELIMITER),
        ));
    }

    /// Replace the process-wide default with a fully built config.
    ///
    /// Not validated; see [`OrgUnitConfig::validate`].
    pub fn install(config: OrgUnitConfig) {
        info!(
            delimiter = %config.delimiter,
            base_alias = %config.base_alias,
            rooted_paths = config.rooted_paths,
            "installing default organizational unit config"
        );
        let mut guard = default_holder()
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Arc::new(config);
    }
}

fn default_holder() -> &'static RwLock<Arc<OrgUnitConfig>> {
    static DEFAULT_CONFIG: OnceLock<RwLock<Arc<OrgUnitConfig>>> = OnceLock::new();
    DEFAULT_CONFIG.get_or_init(|| RwLock::new(Arc::new(OrgUnitConfig::default())))
}

/// Serializable settings, loaded in layers and validated into an [`OrgUnitConfig`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Alias of the base unit (default: "core")
    pub base_alias: String,
    /// Single-character node delimiter (default: ".")
    pub delimiter: String,
    /// Strip a leading base alias segment while parsing (default: false)
    pub rooted_paths: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_alias: DEFAULT_BASE_ALIAS.to_string(),
            delimiter: DEFAULT_DELIMITER.to_string(),
            rooted_paths: false,
        }
    }
}

impl From<&OrgUnitConfig> for Settings {
    fn from(config: &OrgUnitConfig) -> Self {
        Self {
            base_alias: config.base_alias.clone(),
            delimiter: config.delimiter.to_string(),
            rooted_paths: config.rooted_paths,
        }
    }
}

/// Get the XDG config directory for orgunit.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "orgunit").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("orgunit.toml"))
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit TOML file; must exist when given
    pub fn load(config_file: Option<&Path>) -> OrgUnitResult<Self> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("base_alias", defaults.base_alias)
            .map_err(config_err)?
            .set_default("delimiter", defaults.delimiter)
            .map_err(config_err)?
            .set_default("rooted_paths", defaults.rooted_paths)
            .map_err(config_err)?;

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!(path = %global_path.display(), "loading global config");
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        if let Some(path) = config_file {
            debug!(path = %path.display(), "loading explicit config");
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("ORGUNIT")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = builder.build().map_err(config_err)?;
        config.try_deserialize().map_err(config_err)
    }

    /// Validate into an [`OrgUnitConfig`].
    pub fn to_config(&self) -> OrgUnitResult<OrgUnitConfig> {
        let mut chars = self.delimiter.chars();
        let delimiter = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => {
                return Err(OrgUnitError::invalid_config(format!(
                    "delimiter must be a single character, got '{}'",
                    self.delimiter
                )))
            }
        };
        let config =
            OrgUnitConfig::new(&self.base_alias, delimiter).with_rooted_paths(self.rooted_paths);
        config.validate()?;
        Ok(config)
    }

    /// Validate and install as the process-wide default.
    pub fn apply(&self) -> OrgUnitResult<OrgUnitConfig> {
        let config = self.to_config()?;
        OrgUnitConfig::install(config.clone());
        Ok(config)
    }

    /// Show the effective settings as TOML.
    pub fn to_toml(&self) -> OrgUnitResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| OrgUnitError::invalid_config(format!("serialize config: {e}")))
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# orgunit configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/orgunit/orgunit.toml
#   Explicit: file passed to Settings::load
#   Env:      ORGUNIT_* environment variables

# Alias that stands for the base (root) unit, compared case-insensitively
# base_alias = "core"

# Single character placed between nodes
# delimiter = "."

# Drop a leading base alias segment ("core.region" parses as "region")
# rooted_paths = false
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> OrgUnitError {
    OrgUnitError::invalid_config(e.to_string())
}
