//! Error types for report export.

use thiserror::Error;

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Message shown to the user when an export fails for any reason.
pub const EXPORT_FAILED_MESSAGE: &str = "PDF 생성 중 오류가 발생했습니다.";

/// Errors that can occur during report export.
///
/// Formatting itself is total and never fails; only the export path does.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Export failed; `reason` carries the underlying cause for logs.
    #[error("PDF 생성 중 오류가 발생했습니다.")]
    Export { reason: String },

    /// PDF object model or content encoding error.
    #[error("PDF error: {0}")]
    PdfError(#[from] lopdf::Error),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// The page has nothing to export.
    #[error("no report to export")]
    NothingToExport,
}

impl ReportError {
    /// Underlying cause, for logging next to the user-facing message.
    pub fn reason(&self) -> String {
        match self {
            ReportError::Export { reason } => reason.clone(),
            other => other.to_string(),
        }
    }
}
