//! The resolved client configuration.

use crate::resolve::{
    resolve_config_file, ConfigSource, SearchPaths, APP_NAME, ENV_API_URL, ENV_DATA_DIR,
    ENV_EXPORT_DIR, ENV_TIMEOUT,
};
use crate::validate::{validate_api_url, validate_timeout, ConfigError, ConfigResult};
use crate::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// On-disk `config.json`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub export_dir: Option<PathBuf>,
}

impl ConfigFile {
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

/// Values given on the command line. `None` means "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub config_path: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub data_dir: Option<PathBuf>,
    pub export_dir: Option<PathBuf>,
}

/// Fully resolved client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientConfig {
    /// Backend base URL without a trailing slash.
    pub api_url: String,
    pub timeout_secs: u64,
    /// Holds the session file.
    pub data_dir: PathBuf,
    /// Default destination for exported PDFs.
    pub export_dir: PathBuf,

    /// Config file that was read, if any.
    pub file: Option<PathBuf>,
    pub file_source: ConfigSource,
    pub api_url_source: ConfigSource,
    pub timeout_source: ConfigSource,
    pub data_dir_source: ConfigSource,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            data_dir: fallback_data_dir(None),
            export_dir: PathBuf::from("."),
            file: None,
            file_source: ConfigSource::BuiltinDefault,
            api_url_source: ConfigSource::BuiltinDefault,
            timeout_source: ConfigSource::BuiltinDefault,
            data_dir_source: ConfigSource::BuiltinDefault,
        }
    }
}

impl ClientConfig {
    /// Resolve against the process environment and platform directories.
    pub fn resolve(overrides: &ConfigOverrides) -> ConfigResult<Self> {
        let env = |key: &str| std::env::var(key).ok();
        Self::resolve_with(overrides, &env, &SearchPaths::system())
    }

    /// Resolve with an explicit environment lookup and search paths.
    ///
    /// For each value: CLI override → environment variable → config file →
    /// built-in default. Empty environment values count as unset.
    pub fn resolve_with(
        overrides: &ConfigOverrides,
        env: &dyn Fn(&str) -> Option<String>,
        search: &SearchPaths,
    ) -> ConfigResult<Self> {
        let env_value = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let (file, file_source) =
            resolve_config_file(overrides.config_path.as_deref(), env, search)?;
        let file_config = match &file {
            Some(path) => ConfigFile::from_file(path)?,
            None => ConfigFile::default(),
        };

        let (raw_url, api_url_source) = layered(
            overrides.api_url.clone(),
            env_value(ENV_API_URL),
            file_config.api_url.clone(),
        );
        let api_url = validate_api_url(raw_url.as_deref().unwrap_or(DEFAULT_API_URL))?;

        let env_timeout = match env_value(ENV_TIMEOUT) {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| {
                ConfigError::InvalidValue {
                    field: ENV_TIMEOUT.to_string(),
                    message: format!("'{}' is not a number of seconds", raw),
                }
            })?),
            None => None,
        };
        let (timeout, timeout_source) =
            layered(overrides.timeout_secs, env_timeout, file_config.timeout_secs);
        let timeout_secs = validate_timeout(timeout.unwrap_or(DEFAULT_TIMEOUT_SECS))?;

        let (data_dir, data_dir_source) = layered(
            overrides.data_dir.clone(),
            env_value(ENV_DATA_DIR).map(PathBuf::from),
            file_config.data_dir.clone(),
        );
        let data_dir = data_dir.unwrap_or_else(|| fallback_data_dir(search.data_dir.clone()));

        let (export_dir, _) = layered(
            overrides.export_dir.clone(),
            env_value(ENV_EXPORT_DIR).map(PathBuf::from),
            file_config.export_dir.clone(),
        );
        let export_dir = export_dir.unwrap_or_else(|| PathBuf::from("."));

        let config = Self {
            api_url,
            timeout_secs,
            data_dir,
            export_dir,
            file,
            file_source,
            api_url_source,
            timeout_source,
            data_dir_source,
        };
        debug!(
            api_url = %config.api_url,
            api_url_source = %config.api_url_source,
            file_source = %config.file_source,
            "resolved client config"
        );
        Ok(config)
    }

    /// Join an endpoint path (starting with `/`) onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }
}

fn layered<T>(cli: Option<T>, env: Option<T>, file: Option<T>) -> (Option<T>, ConfigSource) {
    if cli.is_some() {
        (cli, ConfigSource::CliArgument)
    } else if env.is_some() {
        (env, ConfigSource::Environment)
    } else if file.is_some() {
        (file, ConfigSource::ConfigFile)
    } else {
        (None, ConfigSource::BuiltinDefault)
    }
}

fn fallback_data_dir(platform: Option<PathBuf>) -> PathBuf {
    platform
        .or_else(|| dirs::data_dir().map(|d| d.join(APP_NAME)))
        .unwrap_or_else(|| PathBuf::from(format!(".{}", APP_NAME)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::CONFIG_FILENAME;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn write_xdg(search: &SearchPaths, body: &str) {
        let dir = search.xdg_config.clone().unwrap();
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(CONFIG_FILENAME), body).unwrap();
    }

    #[test]
    fn test_builtin_defaults() {
        let temp = TempDir::new().unwrap();
        let search = SearchPaths::rooted(temp.path());
        let config =
            ClientConfig::resolve_with(&ConfigOverrides::default(), &env_from(&[]), &search)
                .unwrap();
        assert_eq!(config.api_url, "http://localhost:4000");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.api_url_source, ConfigSource::BuiltinDefault);
        assert_eq!(config.file_source, ConfigSource::BuiltinDefault);
        assert_eq!(config.data_dir, search.data_dir.unwrap());
    }

    #[test]
    fn test_cli_beats_env_beats_file() {
        let temp = TempDir::new().unwrap();
        let search = SearchPaths::rooted(temp.path());
        write_xdg(&search, r#"{"api_url": "http://file:1", "timeout_secs": 10}"#);
        let env = env_from(&[(ENV_API_URL, "http://env:2")]);

        let from_env =
            ClientConfig::resolve_with(&ConfigOverrides::default(), &env, &search).unwrap();
        assert_eq!(from_env.api_url, "http://env:2");
        assert_eq!(from_env.api_url_source, ConfigSource::Environment);
        assert_eq!(from_env.timeout_secs, 10);
        assert_eq!(from_env.timeout_source, ConfigSource::ConfigFile);
        assert_eq!(from_env.file_source, ConfigSource::XdgConfig);

        let overrides = ConfigOverrides {
            api_url: Some("http://cli:3/".into()),
            ..Default::default()
        };
        let from_cli = ClientConfig::resolve_with(&overrides, &env, &search).unwrap();
        assert_eq!(from_cli.api_url, "http://cli:3");
        assert_eq!(from_cli.api_url_source, ConfigSource::CliArgument);
    }

    #[test]
    fn test_empty_env_value_ignored() {
        let temp = TempDir::new().unwrap();
        let search = SearchPaths::rooted(temp.path());
        let env = env_from(&[(ENV_API_URL, "  ")]);
        let config =
            ClientConfig::resolve_with(&ConfigOverrides::default(), &env, &search).unwrap();
        assert_eq!(config.api_url_source, ConfigSource::BuiltinDefault);
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        let temp = TempDir::new().unwrap();
        let search = SearchPaths::rooted(temp.path());
        let overrides = ConfigOverrides {
            timeout_secs: Some(0),
            ..Default::default()
        };
        let err = ClientConfig::resolve_with(&overrides, &env_from(&[]), &search).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));

        let env = env_from(&[(ENV_TIMEOUT, "soon")]);
        assert!(ClientConfig::resolve_with(&ConfigOverrides::default(), &env, &search).is_err());
    }

    #[test]
    fn test_unknown_file_key_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let search = SearchPaths::rooted(temp.path());
        write_xdg(&search, r#"{"api": "http://x"}"#);
        let err = ClientConfig::resolve_with(&ConfigOverrides::default(), &env_from(&[]), &search)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_data_dir_from_env() {
        let temp = TempDir::new().unwrap();
        let search = SearchPaths::rooted(temp.path());
        let custom = temp.path().join("session-here");
        let custom_str = custom.display().to_string();
        let env = env_from(&[(ENV_DATA_DIR, custom_str.as_str())]);
        let config =
            ClientConfig::resolve_with(&ConfigOverrides::default(), &env, &search).unwrap();
        assert_eq!(config.data_dir, custom);
        assert_eq!(config.data_dir_source, ConfigSource::Environment);
    }

    #[test]
    fn test_endpoint_join() {
        let config = ClientConfig::default();
        assert_eq!(
            config.endpoint("/api/ai/reports"),
            "http://localhost:4000/api/ai/reports"
        );
    }
}
