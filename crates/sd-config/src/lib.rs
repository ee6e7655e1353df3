//! Staffdesk client configuration loading and validation.
//!
//! This crate provides:
//! - The typed `config.json` file model
//! - Config resolution (CLI → env → XDG → /etc → defaults) with provenance
//! - Validation of the resolved values

pub mod client;
pub mod resolve;
pub mod validate;

pub use client::{ClientConfig, ConfigFile, ConfigOverrides};
pub use resolve::{resolve_config_file, ConfigSource, SearchPaths};
pub use validate::{ConfigError, ConfigResult};

/// Backend base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:4000";

/// Request timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
