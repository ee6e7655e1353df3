//! Configuration resolution and path discovery.
//!
//! Resolution order: CLI arguments → environment variables → XDG paths → /etc → defaults.

use crate::validate::{ConfigError, ConfigResult};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Where a configuration value (or the config file itself) came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigSource {
    /// Explicitly provided via CLI argument.
    CliArgument,

    /// Set via environment variable.
    Environment,

    /// Read from a config file (see `ClientConfig::file_source`).
    ConfigFile,

    /// Found in XDG config directory.
    XdgConfig,

    /// Found in /etc/staffdesk/.
    SystemConfig,

    /// Using built-in defaults.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::CliArgument => write!(f, "CLI argument"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::ConfigFile => write!(f, "config file"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::SystemConfig => write!(f, "system config"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// Environment variable names.
pub const ENV_CONFIG_PATH: &str = "STAFFDESK_CONFIG";
pub const ENV_API_URL: &str = "STAFFDESK_API_URL";
pub const ENV_TIMEOUT: &str = "STAFFDESK_TIMEOUT";
pub const ENV_DATA_DIR: &str = "STAFFDESK_DATA_DIR";
pub const ENV_EXPORT_DIR: &str = "STAFFDESK_EXPORT_DIR";

/// Standard config file name.
pub const CONFIG_FILENAME: &str = "config.json";

/// Application name for XDG directories.
pub const APP_NAME: &str = "staffdesk";

/// Directories searched for an implicit config file, plus the data dir fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPaths {
    /// `$XDG_CONFIG_HOME/staffdesk` (or platform equivalent).
    pub xdg_config: Option<PathBuf>,
    /// `/etc/staffdesk`.
    pub system_config: PathBuf,
    /// `$XDG_DATA_HOME/staffdesk` (or platform equivalent).
    pub data_dir: Option<PathBuf>,
}

impl SearchPaths {
    /// The platform locations.
    pub fn system() -> Self {
        Self {
            xdg_config: xdg_config_dir(),
            system_config: system_config_dir(),
            data_dir: dirs::data_dir().map(|d| d.join(APP_NAME)),
        }
    }

    /// Search paths rooted under one directory, for tests and sandboxes.
    pub fn rooted(root: &Path) -> Self {
        Self {
            xdg_config: Some(root.join("config").join(APP_NAME)),
            system_config: root.join("etc").join(APP_NAME),
            data_dir: Some(root.join("data").join(APP_NAME)),
        }
    }
}

/// Locate the config file.
///
/// Resolution order:
/// 1. Explicit CLI path (must exist)
/// 2. `STAFFDESK_CONFIG` (must exist)
/// 3. XDG config directory (`~/.config/staffdesk/config.json`)
/// 4. System config (`/etc/staffdesk/config.json`)
/// 5. None, built-in defaults apply
///
/// An explicit path that does not exist is an error rather than a silent
/// fallback to the next layer.
pub fn resolve_config_file(
    cli_path: Option<&Path>,
    env: &dyn Fn(&str) -> Option<String>,
    search: &SearchPaths,
) -> ConfigResult<(Option<PathBuf>, ConfigSource)> {
    // 1. CLI argument
    if let Some(path) = cli_path {
        return explicit(path.to_path_buf(), ConfigSource::CliArgument);
    }

    // 2. Environment variable
    if let Some(env_path) = env(ENV_CONFIG_PATH).filter(|v| !v.trim().is_empty()) {
        return explicit(PathBuf::from(env_path), ConfigSource::Environment);
    }

    // 3. XDG config directory
    if let Some(dir) = &search.xdg_config {
        let path = dir.join(CONFIG_FILENAME);
        if path.is_file() {
            return Ok((Some(path), ConfigSource::XdgConfig));
        }
    }

    // 4. System config
    let system_path = search.system_config.join(CONFIG_FILENAME);
    if system_path.is_file() {
        return Ok((Some(system_path), ConfigSource::SystemConfig));
    }

    // 5. Built-in default
    Ok((None, ConfigSource::BuiltinDefault))
}

fn explicit(path: PathBuf, source: ConfigSource) -> ConfigResult<(Option<PathBuf>, ConfigSource)> {
    if path.is_file() {
        Ok((Some(path), source))
    } else {
        Err(ConfigError::NotFound {
            path: path.display().to_string(),
            source_kind: source,
        })
    }
}

/// Get the XDG config directory for staffdesk.
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

/// Get the system config directory.
pub fn system_config_dir() -> PathBuf {
    PathBuf::from("/etc").join(APP_NAME)
}
