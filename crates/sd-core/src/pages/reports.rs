//! AI report page.
//!
//! ```text
//! Idle ──generate──▶ Generating ──ok──▶ Ready { report, stats }
//!   ▲                    │
//!   └──────failure───────┘ (error message set)
//!
//! Idle | Ready | Viewing ──view(id)──▶ Viewing { report }
//! ```
//!
//! A generated report is saved to history under an automatic title and the
//! history list is re-fetched; neither step can undo the generation. Export
//! is only possible from Ready or Viewing and leaves the state alone.

use crate::api::ApiClient;
use chrono::{DateTime, Local, NaiveDate};
use sd_common::report::auto_title;
use sd_common::{
    GeneratedReport, RecordId, Report, ReportSummary, Result, SaveReportRequest, SavedReport,
    StatsSnapshot,
};
use sd_report::pdf::export_file_name;
use sd_report::{
    export_pdf, render_report_page, PdfInput, PdfLayout, ReportError, ReportGenerator,
    ReportPageView, ReportTheme,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Shown inline when generation fails for any reason.
pub const GENERATE_FAILED_MESSAGE: &str = "보고서 생성에 실패했습니다.";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq)]
pub enum ReportState {
    Idle,
    Generating,
    /// A fresh report with the stats that came with it.
    Ready {
        report: Report,
        stats: Option<StatsSnapshot>,
    },
    /// A report from history. Historical stats are not kept.
    Viewing { report: Report },
}

impl ReportState {
    pub fn name(&self) -> &'static str {
        match self {
            ReportState::Idle => "idle",
            ReportState::Generating => "generating",
            ReportState::Ready { .. } => "ready",
            ReportState::Viewing { .. } => "viewing",
        }
    }

    pub fn report(&self) -> Option<&Report> {
        match self {
            ReportState::Ready { report, .. } | ReportState::Viewing { report } => Some(report),
            _ => None,
        }
    }

    pub fn stats(&self) -> Option<&StatsSnapshot> {
        match self {
            ReportState::Ready { stats, .. } => stats.as_ref(),
            _ => None,
        }
    }

    pub fn can_export(&self) -> bool {
        self.report().is_some()
    }
}

pub fn list_reports(api: &ApiClient) -> Result<Vec<ReportSummary>> {
    api.get("/api/ai/reports", &[])
}

/// Fetch one saved report; its id is taken from the path.
pub fn fetch_report(api: &ApiClient, id: RecordId) -> Result<Report> {
    let mut report: Report = api.get(&format!("/api/ai/reports/{}", id), &[])?;
    report.id = Some(id);
    Ok(report)
}

pub fn save_report(api: &ApiClient, title: &str, content: &str) -> Result<SavedReport> {
    api.post(
        "/api/ai/reports",
        &SaveReportRequest {
            title: title.to_string(),
            content: content.to_string(),
        },
    )
}

#[derive(Debug, Clone)]
pub struct ReportPage {
    state: ReportState,
    history: Vec<ReportSummary>,
    selected: Option<RecordId>,
    error: Option<String>,
    generator: ReportGenerator,
}

impl Default for ReportPage {
    fn default() -> Self {
        Self::new(ReportGenerator::default_config())
    }
}

impl ReportPage {
    pub fn new(generator: ReportGenerator) -> Self {
        Self {
            state: ReportState::Idle,
            history: Vec::new(),
            selected: None,
            error: None,
            generator,
        }
    }

    pub fn state(&self) -> &ReportState {
        &self.state
    }

    pub fn history(&self) -> &[ReportSummary] {
        &self.history
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn transition(&mut self, next: ReportState) {
        debug!(from = self.state.name(), to = next.name(), "report state");
        self.state = next;
    }

    /// Re-fetch history. On failure the current list stays.
    pub fn refresh_history(&mut self, api: &ApiClient) -> Result<()> {
        match list_reports(api) {
            Ok(items) => {
                self.history = items;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to fetch report history");
                Err(err)
            }
        }
    }

    /// Request a new report, then save it and refresh history.
    ///
    /// Any generation failure, transport or status, ends in Idle with
    /// [`GENERATE_FAILED_MESSAGE`]. Save and history failures are logged only.
    pub fn generate(&mut self, api: &ApiClient, now: DateTime<Local>) -> Result<()> {
        self.error = None;
        self.transition(ReportState::Generating);

        let generated: GeneratedReport = match api.post_empty("/api/ai/report") {
            Ok(generated) => generated,
            Err(err) => {
                warn!(error = %err, "report generation failed");
                self.error = Some(GENERATE_FAILED_MESSAGE.to_string());
                self.transition(ReportState::Idle);
                return Err(err);
            }
        };

        let title = auto_title(now);
        let id = match save_report(api, &title, &generated.report) {
            Ok(saved) => {
                info!(id = ?saved.id, %title, "report saved");
                saved.id
            }
            Err(err) => {
                warn!(error = %err, "failed to save generated report");
                None
            }
        };
        self.selected = id;

        let report = Report {
            id,
            title,
            content: generated.report,
            generated_at: Some(now.format(TIMESTAMP_FORMAT).to_string()),
        };
        self.transition(ReportState::Ready {
            report,
            stats: generated.stats,
        });

        // Non-fatal.
        let _ = self.refresh_history(api);
        Ok(())
    }

    /// Show a saved report. On failure nothing changes.
    pub fn view(&mut self, api: &ApiClient, id: RecordId) -> Result<()> {
        let report = fetch_report(api, id).map_err(|err| {
            warn!(id, error = %err, "failed to fetch report");
            err
        })?;
        self.selected = Some(id);
        self.error = None;
        self.transition(ReportState::Viewing { report });
        Ok(())
    }

    /// Assembled markup of the current report.
    pub fn report_html(&self) -> Option<String> {
        self.state
            .report()
            .map(|report| self.generator.assemble_report(report))
    }

    /// The standalone report page for the current state.
    pub fn page_html(&self, theme: ReportTheme) -> String {
        let report_html = self.report_html();
        let view = ReportPageView {
            theme,
            generated_at: self
                .state
                .report()
                .and_then(|r| r.generated_at.clone()),
            stats: self.state.stats(),
            report_html: report_html.as_deref(),
            history: &self.history,
            selected: self.selected,
            error: self.error.as_deref(),
        };
        render_report_page(&view)
    }

    /// File name the current report exports to.
    ///
    /// A fresh report gets the date-stamped default; a history report its title.
    pub fn export_name(&self, today: NaiveDate) -> Option<String> {
        match &self.state {
            ReportState::Ready { .. } => Some(export_file_name(None, today)),
            ReportState::Viewing { report } => {
                Some(export_file_name(Some(report.display_title()), today))
            }
            _ => None,
        }
    }

    /// Write the current report as a one-page PDF into `dest_dir`.
    pub fn export(&self, dest_dir: &Path, today: NaiveDate) -> sd_report::Result<PathBuf> {
        let report = self.state.report().ok_or(ReportError::NothingToExport)?;
        let file_name = self
            .export_name(today)
            .ok_or(ReportError::NothingToExport)?;
        let input = PdfInput {
            title: report.display_title(),
            content: &report.content,
            generated_at: report.generated_at.as_deref(),
            stats: self.state.stats(),
        };
        export_pdf(&input, dest_dir, &file_name, &PdfLayout::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn offline() -> ApiClient {
        ApiClient::new("http://127.0.0.1:9", std::time::Duration::from_secs(1))
    }

    #[test]
    fn test_generate_failure_returns_to_idle() {
        let mut page = ReportPage::default();
        let now = Local.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap();
        assert!(page.generate(&offline(), now).is_err());
        assert_eq!(page.state(), &ReportState::Idle);
        assert_eq!(page.error(), Some(GENERATE_FAILED_MESSAGE));
        assert!(page.state().stats().is_none());
    }

    #[test]
    fn test_export_requires_report() {
        let page = ReportPage::default();
        let dir = std::env::temp_dir();
        let today = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        assert!(matches!(
            page.export(&dir, today),
            Err(ReportError::NothingToExport)
        ));
        assert!(page.export_name(today).is_none());
    }

    #[test]
    fn test_failed_view_keeps_state() {
        let mut page = ReportPage::default();
        assert!(page.view(&offline(), 4).is_err());
        assert_eq!(page.state(), &ReportState::Idle);
        assert!(page.error().is_none());
    }

    #[test]
    fn test_idle_page_html_shows_empty_history() {
        let html = ReportPage::default().page_html(ReportTheme::Light);
        assert!(html.contains(sd_report::page::EMPTY_HISTORY_MESSAGE));
        assert!(!html.contains("report-document"));
    }
}
