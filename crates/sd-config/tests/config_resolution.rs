//! Config resolution against the real process environment.
//!
//! Covers:
//! - `STAFFDESK_CONFIG` pointing at a file outside the search paths
//! - CLI `--config` winning over `STAFFDESK_CONFIG`
//! - Env values layered over file values

use sd_config::resolve::{ENV_API_URL, ENV_CONFIG_PATH, ENV_DATA_DIR, ENV_TIMEOUT};
use sd_config::{ClientConfig, ConfigOverrides, ConfigSource};
use std::env;
use std::fs;
use std::sync::{Mutex, OnceLock};
use tempfile::TempDir;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

struct EnvGuard {
    keys: Vec<String>,
    saved: Vec<Option<String>>,
}

impl EnvGuard {
    fn new(keys: &[&str]) -> Self {
        let saved = keys.iter().map(|k| env::var(k).ok()).collect();
        let guard = Self {
            keys: keys.iter().map(|k| k.to_string()).collect(),
            saved,
        };
        for key in keys {
            env::remove_var(key);
        }
        guard
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (idx, key) in self.keys.iter().enumerate() {
            match self.saved.get(idx).and_then(|v| v.as_ref()) {
                Some(val) => env::set_var(key, val),
                None => env::remove_var(key),
            }
        }
    }
}

fn with_env_lock<T>(f: impl FnOnce() -> T) -> T {
    let _guard = ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .expect("env lock poisoned");
    f()
}

const KEYS: &[&str] = &[ENV_API_URL, ENV_CONFIG_PATH, ENV_DATA_DIR, ENV_TIMEOUT];

#[test]
fn test_env_config_path_is_read() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(KEYS);
        let temp = TempDir::new().expect("temp dir");
        let file = temp.path().join("staffdesk.json");
        fs::write(&file, r#"{"api_url": "http://backend.internal:8080", "timeout_secs": 5}"#)
            .expect("write config");
        env::set_var(ENV_CONFIG_PATH, &file);

        let config = ClientConfig::resolve(&ConfigOverrides::default()).expect("resolve");
        assert_eq!(config.file_source, ConfigSource::Environment);
        assert_eq!(config.file.as_deref(), Some(file.as_path()));
        assert_eq!(config.api_url, "http://backend.internal:8080");
        assert_eq!(config.api_url_source, ConfigSource::ConfigFile);
        assert_eq!(config.timeout_secs, 5);
    });
}

#[test]
fn test_cli_config_over_env_config() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(KEYS);
        let temp = TempDir::new().expect("temp dir");
        let env_file = temp.path().join("env.json");
        let cli_file = temp.path().join("cli.json");
        fs::write(&env_file, r#"{"api_url": "http://env-file:1"}"#).expect("write env config");
        fs::write(&cli_file, r#"{"api_url": "http://cli-file:2"}"#).expect("write cli config");
        env::set_var(ENV_CONFIG_PATH, &env_file);

        let overrides = ConfigOverrides {
            config_path: Some(cli_file.clone()),
            ..Default::default()
        };
        let config = ClientConfig::resolve(&overrides).expect("resolve");
        assert_eq!(config.file_source, ConfigSource::CliArgument);
        assert_eq!(config.api_url, "http://cli-file:2");
    });
}

#[test]
fn test_env_api_url_over_file() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(KEYS);
        let temp = TempDir::new().expect("temp dir");
        let file = temp.path().join("staffdesk.json");
        fs::write(&file, r#"{"api_url": "http://file:1"}"#).expect("write config");
        env::set_var(ENV_CONFIG_PATH, &file);
        env::set_var(ENV_API_URL, "https://env.example.com/");

        let config = ClientConfig::resolve(&ConfigOverrides::default()).expect("resolve");
        assert_eq!(config.api_url, "https://env.example.com");
        assert_eq!(config.api_url_source, ConfigSource::Environment);
    });
}

#[test]
fn test_missing_env_config_path_fails() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(KEYS);
        let temp = TempDir::new().expect("temp dir");
        env::set_var(ENV_CONFIG_PATH, temp.path().join("absent.json"));

        let err = ClientConfig::resolve(&ConfigOverrides::default()).expect_err("missing file");
        assert!(err.to_string().contains("does not exist"));
    });
}
