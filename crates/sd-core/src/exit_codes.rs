//! Exit codes for the staffdesk CLI.
//!
//! Scripts can branch on the code without parsing output.
//!
//! Exit code ranges:
//! - 0-2: Success/operational outcomes
//! - 10-19: User/environment errors (recoverable by user action)
//! - 20-29: Backend and internal errors

use sd_common::{Error, ErrorCategory};
use sd_config::ConfigError;
use sd_report::ReportError;

/// Exit codes for staffdesk commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    // ========================================================================
    // Success / Operational Outcomes (0-2)
    // ========================================================================
    /// Command completed.
    Clean = 0,

    /// Some items failed while the rest completed (e.g. one server probe of many).
    PartialFail = 1,

    /// The user declined a confirmation prompt; nothing was changed.
    Declined = 2,

    // ========================================================================
    // User / Environment Errors (10-19)
    // ========================================================================
    /// Invalid arguments or a missing required field.
    ArgsError = 10,

    /// Configuration could not be resolved.
    ConfigError = 11,

    /// Not logged in, or the session file is unreadable.
    SessionError = 12,

    /// The backend refused the request (login rejected, registration rejected).
    Rejected = 13,

    /// Backend unreachable.
    NetworkError = 14,

    // ========================================================================
    // Backend / Internal Errors (20-29)
    // ========================================================================
    /// Backend returned an error status or an unreadable body.
    BackendError = 20,

    /// I/O error.
    IoError = 21,

    /// PDF export failed.
    ExportError = 22,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Clean | ExitCode::Declined)
    }

    /// Codes 10-19 can be resolved by user action.
    pub fn is_user_error(self) -> bool {
        (10..20).contains(&(self as i32))
    }

    /// Check if this exit code indicates any error requiring attention.
    pub fn is_error(self) -> bool {
        (self as i32) >= 10
    }

    /// Get the error code name as a string constant (for JSON output).
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK",
            ExitCode::PartialFail => "ERR_PARTIAL",
            ExitCode::Declined => "OK_DECLINED",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::ConfigError => "ERR_CONFIG",
            ExitCode::SessionError => "ERR_SESSION",
            ExitCode::Rejected => "ERR_REJECTED",
            ExitCode::NetworkError => "ERR_NETWORK",
            ExitCode::BackendError => "ERR_BACKEND",
            ExitCode::IoError => "ERR_IO",
            ExitCode::ExportError => "ERR_EXPORT",
        }
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err.category() {
            ErrorCategory::Network => ExitCode::NetworkError,
            ErrorCategory::Backend => ExitCode::BackendError,
            ErrorCategory::Validation => ExitCode::ArgsError,
            ErrorCategory::Session => ExitCode::SessionError,
            ErrorCategory::Io => ExitCode::IoError,
        }
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(err: &ConfigError) -> Self {
        match err {
            ConfigError::Io { .. } => ExitCode::IoError,
            _ => ExitCode::ConfigError,
        }
    }
}

impl From<&ReportError> for ExitCode {
    fn from(err: &ReportError) -> Self {
        match err {
            ReportError::NothingToExport => ExitCode::ArgsError,
            _ => ExitCode::ExportError,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges() {
        assert!(ExitCode::Clean.is_success());
        assert!(!ExitCode::PartialFail.is_error());
        assert!(ExitCode::NetworkError.is_user_error());
        assert!(ExitCode::BackendError.is_error());
        assert!(!ExitCode::BackendError.is_user_error());
    }

    #[test]
    fn test_error_mapping() {
        let transport = Error::Transport {
            url: "u".into(),
            reason: "refused".into(),
        };
        assert_eq!(ExitCode::from(&transport), ExitCode::NetworkError);
        assert_eq!(
            ExitCode::from(&Error::Validation("x".into())),
            ExitCode::ArgsError
        );
        assert_eq!(ExitCode::from(&Error::NotLoggedIn), ExitCode::SessionError);
        assert_eq!(
            ExitCode::from(&ReportError::Export { reason: "r".into() }),
            ExitCode::ExportError
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(ExitCode::ExportError.to_string(), "ERR_EXPORT (22)");
    }
}
