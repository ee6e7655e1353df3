//! AI summary report records.

use crate::de::{count_or_len, null_default, opt_text};
use crate::RecordId;
use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Title used when a generated report is saved without one.
pub const DEFAULT_REPORT_TITLE: &str = "인력현황요약보고서";

/// A persisted report. Immutable once created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Not part of the single-report payload; filled from the request path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "null_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_default")]
    pub content: String,
    #[serde(default, deserialize_with = "opt_text")]
    pub generated_at: Option<String>,
}

impl Report {
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            DEFAULT_REPORT_TITLE
        } else {
            &self.title
        }
    }

    pub fn generated_at_display(&self) -> Option<String> {
        self.generated_at.as_deref().map(display_timestamp)
    }
}

/// One row of `GET /api/ai/reports`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_default")]
    pub title: String,
    #[serde(default, deserialize_with = "opt_text")]
    pub generated_at: Option<String>,
}

impl ReportSummary {
    pub fn generated_at_display(&self) -> String {
        self.generated_at
            .as_deref()
            .map(display_timestamp)
            .unwrap_or_else(|| "-".to_string())
    }
}

/// Headline counters returned next to a freshly generated report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    #[serde(default, deserialize_with = "count_or_len")]
    pub total: u64,
    #[serde(
        default,
        rename(serialize = "siteCount", deserialize = "siteStats"),
        alias = "siteCount",
        deserialize_with = "count_or_len"
    )]
    pub site_count: u64,
    #[serde(
        default,
        rename = "expiringContracts",
        deserialize_with = "count_or_len"
    )]
    pub expiring_contracts: u64,
    #[serde(
        default,
        rename = "expiringAssignments",
        deserialize_with = "count_or_len"
    )]
    pub expiring_assignments: u64,
}

/// Response of `POST /api/ai/report`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedReport {
    #[serde(default, deserialize_with = "null_default")]
    pub report: String,
    #[serde(default)]
    pub stats: Option<StatsSnapshot>,
}

/// Body of `POST /api/ai/reports`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveReportRequest {
    pub title: String,
    pub content: String,
}

/// Response of `POST /api/ai/reports`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedReport {
    #[serde(default)]
    pub id: Option<RecordId>,
}

/// Title given to an auto-saved report.
pub fn auto_title(at: DateTime<Local>) -> String {
    format!("{} {}", DEFAULT_REPORT_TITLE, at.format("%Y-%m-%d %H:%M"))
}

/// Render a backend timestamp as `YYYY-MM-DD HH:MM`.
///
/// Accepts RFC 3339 and `YYYY-MM-DD HH:MM:SS`; anything else is returned unchanged.
pub fn display_timestamp(raw: &str) -> String {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return ts.format("%Y-%m-%d %H:%M").to_string();
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_accepts_list_or_number() {
        let stats: StatsSnapshot = serde_json::from_str(
            r#"{"total": 42, "siteStats": [{"site_name": "A"}, {"site_name": "B"}],
                "expiringContracts": 3, "expiringAssignments": [1]}"#,
        )
        .unwrap();
        assert_eq!(stats.total, 42);
        assert_eq!(stats.site_count, 2);
        assert_eq!(stats.expiring_contracts, 3);
        assert_eq!(stats.expiring_assignments, 1);
    }

    #[test]
    fn test_stats_missing_fields_are_zero() {
        let stats: StatsSnapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(stats, StatsSnapshot::default());
    }

    #[test]
    fn test_generated_report_without_stats() {
        let generated: GeneratedReport =
            serde_json::from_str(r#"{"report": "**1. 요약**"}"#).unwrap();
        assert!(generated.stats.is_none());
    }

    #[test]
    fn test_display_timestamp_naive() {
        assert_eq!(display_timestamp("2025-02-03 09:08:07"), "2025-02-03 09:08");
        assert_eq!(display_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn test_display_title_fallback() {
        assert_eq!(Report::default().display_title(), DEFAULT_REPORT_TITLE);
    }
}
