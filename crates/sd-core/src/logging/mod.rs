//! Logging setup for the staffdesk CLI.
//!
//! - stdout carries command payloads (Markdown or JSON)
//! - stderr carries log output, human-readable or JSON lines
//!
//! Every run gets a `run-<12 hex>` id attached to a root span so JSON lines
//! from one invocation can be grouped.

pub mod config;

pub use config::{LogConfig, LogFormat, LogLevel};

use std::io::IsTerminal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Crates whose events pass the default filter.
const LOG_TARGETS: &[&str] = &["staffdesk", "sd_core", "sd_config", "sd_report", "sd_common"];

/// Filter directive for `level` across the staffdesk crates.
pub fn filter_directive(level: LogLevel) -> String {
    LOG_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the global subscriber. Call once, before any logging.
///
/// An explicit `STAFFDESK_LOG`/`RUST_LOG` filter string wins over `config.level`.
/// A second call is ignored.
pub fn init_logging(config: &LogConfig) {
    let filter = config
        .filter
        .as_deref()
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new(filter_directive(config.level)));

    let result = match config.format {
        LogFormat::Human => {
            let use_ansi = config.color && std::io::stderr().is_terminal();
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(use_ansi);

            if config.timestamps {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer)
                    .try_init()
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer.without_time())
                    .try_init()
            }
        }
        LogFormat::Jsonl => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(true)
                    .with_span_list(false),
            )
            .try_init(),
    };
    if result.is_err() {
        tracing::debug!("logging already initialized");
    }
}

/// Generate a unique run ID for this invocation.
pub fn generate_run_id() -> String {
    let uuid = uuid::Uuid::new_v4().simple().to_string();
    format!("run-{}", &uuid[..12])
}

/// Shorten a string for a log field.
pub fn truncate_for_log(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let head: String = s.chars().take(max_chars).collect();
    format!("{}...(truncated)", head)
}
