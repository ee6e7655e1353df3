//! Logging configuration.
//!
//! Supports configuration via:
//! - Environment variables (STAFFDESK_LOG, RUST_LOG, STAFFDESK_LOG_FORMAT)
//! - CLI flags (-v, -q, --no-color)

use serde::{Deserialize, Serialize};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// `fmt` text lines on stderr (default).
    #[default]
    Human,
    /// One JSON object per event on stderr.
    Jsonl,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(LogFormat::Human),
            "jsonl" | "json" => Ok(LogFormat::Jsonl),
            _ => Err(format!("unknown log format: {}", s)),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Human => write!(f, "human"),
            LogFormat::Jsonl => write!(f, "jsonl"),
        }
    }
}

/// Log level filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    /// Default: failures that were logged and skipped, such as a history refresh.
    #[default]
    Warn,
    Error,
    Off,
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" | "none" | "quiet" => Ok(LogLevel::Off),
            _ => Err(format!("unknown log level: {}", s)),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
            LogLevel::Off => write!(f, "off"),
        }
    }
}

/// Environment variable holding a level or a full filter directive.
pub const ENV_LOG: &str = "STAFFDESK_LOG";
/// Environment variable selecting `human` or `jsonl`.
pub const ENV_LOG_FORMAT: &str = "STAFFDESK_LOG_FORMAT";

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Output format.
    pub format: LogFormat,
    /// Minimum log level.
    pub level: LogLevel,
    /// Raw filter directive such as `sd_core=debug,ureq=warn`, used as is.
    pub filter: Option<String>,
    /// Whether to include timestamps in human output.
    pub timestamps: bool,
    /// ANSI colors in human output when stderr is a terminal.
    pub color: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            format: LogFormat::Human,
            level: LogLevel::Warn,
            filter: None,
            timestamps: false,
            color: true,
        }
    }
}

impl LogConfig {
    /// Create config from the process environment and CLI overrides.
    pub fn from_env(cli_level: Option<LogLevel>, cli_format: Option<LogFormat>) -> Self {
        let env = |key: &str| std::env::var(key).ok();
        Self::from_lookup(&env, cli_level, cli_format)
    }

    /// `STAFFDESK_LOG` takes precedence over `RUST_LOG`; a value that is not a
    /// plain level is kept as a filter directive. CLI overrides win over both.
    pub fn from_lookup(
        env: &dyn Fn(&str) -> Option<String>,
        cli_level: Option<LogLevel>,
        cli_format: Option<LogFormat>,
    ) -> Self {
        let mut config = LogConfig::default();

        let raw = env(ENV_LOG)
            .or_else(|| env("RUST_LOG"))
            .filter(|v| !v.trim().is_empty());
        if let Some(val) = raw {
            match val.parse::<LogLevel>() {
                Ok(level) => config.level = level,
                Err(_) => config.filter = Some(val),
            }
        }

        if let Some(val) = env(ENV_LOG_FORMAT) {
            if let Ok(format) = val.parse::<LogFormat>() {
                config.format = format;
            }
        }

        if let Some(level) = cli_level {
            config.level = level;
            config.filter = None;
        }
        if let Some(format) = cli_format {
            config.format = format;
        }

        config
    }

    /// Set log format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set log level.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Enable timestamps in human output.
    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.timestamps = enabled;
        self
    }

    pub fn with_color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }
}
