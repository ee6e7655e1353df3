//! Configuration errors and value validation.

use crate::resolve::ConfigSource;
use thiserror::Error;

/// Validation result type.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file {path} (from {source_kind}) does not exist")]
    NotFound {
        path: String,
        source_kind: ConfigSource,
    },

    #[error("cannot read config file {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("cannot parse config file {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl ConfigError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ConfigError::NotFound { .. } => 50,
            ConfigError::Io { .. } => 51,
            ConfigError::Parse { .. } => 52,
            ConfigError::InvalidValue { .. } => 53,
        }
    }
}

/// Smallest accepted request timeout, in seconds.
pub const MIN_TIMEOUT_SECS: u64 = 1;
/// Largest accepted request timeout, in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 300;

/// Check and normalise a backend base URL.
///
/// The scheme must be `http` or `https` and a host must follow it. Trailing
/// slashes are removed so endpoint paths can be appended directly.
pub fn validate_api_url(raw: &str) -> ConfigResult<String> {
    let url = raw.trim().trim_end_matches('/');
    let rest = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
        .ok_or_else(|| invalid("api_url", format!("'{}' must start with http:// or https://", raw)))?;

    let host = rest.split(['/', '?', '#']).next().unwrap_or("");
    if host.is_empty() || host.contains(char::is_whitespace) {
        return Err(invalid("api_url", format!("'{}' has no host", raw)));
    }

    Ok(url.to_string())
}

pub fn validate_timeout(secs: u64) -> ConfigResult<u64> {
    if !(MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&secs) {
        return Err(invalid(
            "timeout_secs",
            format!(
                "{} is outside {}..={}",
                secs, MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS
            ),
        ));
    }
    Ok(secs)
}

fn invalid(field: &str, message: String) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_normalised() {
        assert_eq!(
            validate_api_url("http://localhost:4000/").unwrap(),
            "http://localhost:4000"
        );
        assert_eq!(
            validate_api_url(" https://staff.example.com/base ").unwrap(),
            "https://staff.example.com/base"
        );
    }

    #[test]
    fn test_url_rejects_other_schemes() {
        let err = validate_api_url("ftp://host").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert_eq!(err.code(), 53);
        assert!(validate_api_url("localhost:4000").is_err());
    }

    #[test]
    fn test_url_requires_host() {
        assert!(validate_api_url("http://").is_err());
        assert!(validate_api_url("https:///api").is_err());
    }

    #[test]
    fn test_timeout_bounds() {
        assert!(validate_timeout(0).is_err());
        assert_eq!(validate_timeout(1).unwrap(), 1);
        assert_eq!(validate_timeout(300).unwrap(), 300);
        assert!(validate_timeout(301).is_err());
    }
}
