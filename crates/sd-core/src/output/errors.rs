//! Structured CLI errors.
//!
//! A failed command prints a headline, the underlying detail and, when the
//! user can do something about it, a remediation hint. With `--format json`
//! the same fields go to stderr as one JSON object.

use crate::exit_codes::ExitCode;
use crate::session::CONNECTION_FAILED_MESSAGE;
use sd_common::{Error, ErrorCategory};
use sd_config::ConfigError;
use sd_report::{ReportError, EXPORT_FAILED_MESSAGE};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CliError {
    /// Stable code name, e.g. `ERR_NETWORK`.
    pub code: &'static str,
    #[serde(skip)]
    pub exit: ExitCode,
    pub headline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl CliError {
    pub fn new(exit: ExitCode, headline: impl Into<String>) -> Self {
        Self {
            code: exit.code_name(),
            exit,
            headline: headline.into(),
            detail: None,
            remediation: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_remediation(mut self, hint: impl Into<String>) -> Self {
        self.remediation = Some(hint.into());
        self
    }

    /// Use `headline` in place of the generic one, keeping the rest.
    pub fn titled(mut self, headline: impl Into<String>) -> Self {
        let previous = std::mem::replace(&mut self.headline, headline.into());
        if self.detail.is_none() && previous != self.headline {
            self.detail = Some(previous);
        }
        self
    }

    /// Multi-line text for the terminal.
    pub fn render_text(&self) -> String {
        let mut out = format!("오류: {}\n", self.headline);
        if let Some(detail) = &self.detail {
            out.push_str(&format!("  {}\n", detail));
        }
        if let Some(hint) = &self.remediation {
            out.push_str(&format!("  → {}\n", hint));
        }
        out
    }

    pub fn render_json(&self) -> String {
        serde_json::json!({ "error": self }).to_string()
    }
}

impl From<&Error> for CliError {
    fn from(err: &Error) -> Self {
        let exit = ExitCode::from(err);
        let base = CliError::new(exit, err.to_string());
        match err.category() {
            ErrorCategory::Network => base
                .titled(CONNECTION_FAILED_MESSAGE)
                .with_remediation("--api-url 또는 STAFFDESK_API_URL 로 백엔드 주소를 확인하세요."),
            ErrorCategory::Session => match err {
                Error::NotLoggedIn => CliError::new(exit, "로그인이 필요합니다.")
                    .with_remediation("staffdesk login --username <ID> 로 로그인하세요."),
                _ => base.with_remediation("staffdesk logout 으로 세션을 초기화한 뒤 다시 로그인하세요."),
            },
            ErrorCategory::Backend => match err.status() {
                Some(status) => base.titled(format!("서버 오류 (HTTP {})", status)),
                None => base.titled("서버 응답을 해석할 수 없습니다."),
            },
            ErrorCategory::Validation | ErrorCategory::Io => base,
        }
    }
}

impl From<Error> for CliError {
    fn from(err: Error) -> Self {
        CliError::from(&err)
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::new(ExitCode::from(&err), "설정을 불러올 수 없습니다.")
            .with_detail(err.to_string())
            .with_remediation("staffdesk config show 로 적용된 설정을 확인하세요.")
    }
}

impl From<ReportError> for CliError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::NothingToExport => {
                CliError::new(ExitCode::from(&err), "내보낼 보고서가 없습니다.")
            }
            other => CliError::new(ExitCode::from(&other), EXPORT_FAILED_MESSAGE)
                .with_detail(other.to_string()),
        }
    }
}
