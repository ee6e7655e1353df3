//! Error types for the staffdesk client.
//!
//! Every failure a page can hit falls into one of four buckets:
//! - transport failures (backend unreachable, timeout)
//! - non-success HTTP statuses
//! - payloads that cannot be decoded at all
//! - client-side validation (a required field is missing)
//!
//! Each error carries a stable code and a category so the CLI can pick an
//! exit code, and a fixed Korean message for the inline banner.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for staffdesk operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Backend could not be reached.
    Network,
    /// Backend answered with a non-success status or an unreadable body.
    Backend,
    /// Input rejected before any request was sent.
    Validation,
    /// Local session file problems.
    Session,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Network => write!(f, "network"),
            ErrorCategory::Backend => write!(f, "backend"),
            ErrorCategory::Validation => write!(f, "validation"),
            ErrorCategory::Session => write!(f, "session"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for staffdesk.
#[derive(Error, Debug)]
pub enum Error {
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("{method} {url} returned HTTP {status}{}", status_suffix(.message))]
    Status {
        method: String,
        url: String,
        status: u16,
        /// `message` field of the error body, when the backend sent one.
        message: Option<String>,
    },

    #[error("unexpected response from {url}: {reason}")]
    Decode { url: String, reason: String },

    #[error("{0}")]
    Validation(String),

    #[error("not logged in")]
    NotLoggedIn,

    #[error("session file {path} is corrupted: {reason}")]
    SessionCorrupted { path: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

fn status_suffix(message: &Option<String>) -> String {
    match message {
        Some(m) => format!(": {}", m),
        None => String::new(),
    }
}

impl Error {
    /// Stable error code.
    ///
    /// - 10-19: network
    /// - 20-29: backend
    /// - 30-39: validation
    /// - 40-49: session
    /// - 60-69: I/O
    pub fn code(&self) -> u32 {
        match self {
            Error::Transport { .. } => 10,
            Error::Status { .. } => 20,
            Error::Decode { .. } => 21,
            Error::Validation(_) => 30,
            Error::NotLoggedIn => 40,
            Error::SessionCorrupted { .. } => 41,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Transport { .. } => ErrorCategory::Network,
            Error::Status { .. } | Error::Decode { .. } => ErrorCategory::Backend,
            Error::Validation(_) => ErrorCategory::Validation,
            Error::NotLoggedIn | Error::SessionCorrupted { .. } => ErrorCategory::Session,
            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
        }
    }

    /// HTTP status, if the backend answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message the backend put in its error body.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Error::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::Transport { .. } => "서버 연결에 실패했습니다.",
            Error::Status { .. } => "요청이 거부되었습니다.",
            Error::Decode { .. } => "응답을 해석할 수 없습니다.",
            Error::Validation(_) => "입력값을 확인하세요.",
            Error::NotLoggedIn => "로그인이 필요합니다.",
            Error::SessionCorrupted { .. } => "세션 정보가 손상되었습니다.",
            Error::Io(_) | Error::Json(_) => "파일 처리 중 오류가 발생했습니다.",
        }
    }

    /// Remediation hint printed under the headline.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::Transport { .. } => {
                "Check that the backend is running and --api-url / STAFFDESK_API_URL points at it."
            }
            Error::Status { .. } => "The backend rejected the request. Check its logs for details.",
            Error::Decode { .. } => "The backend returned an unexpected payload. Check API versions.",
            Error::Validation(_) => "Fill in the required field and try again.",
            Error::NotLoggedIn => "Run 'staffdesk login' first.",
            Error::SessionCorrupted { .. } => "Run 'staffdesk logout' and log in again.",
            Error::Io(_) | Error::Json(_) => "Check disk space and permissions, then retry.",
        }
    }
}
