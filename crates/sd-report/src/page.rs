//! Page fragments for the report screen.
//!
//! Stats cards, the saved-report history table, and a standalone HTML page
//! combining them with the assembled report.

use crate::config::ReportTheme;
use crate::sections::escape_text;
use sd_common::{RecordId, ReportSummary, StatsSnapshot};

/// Shown instead of the history table when nothing has been saved.
pub const EMPTY_HISTORY_MESSAGE: &str = "저장된 보고서가 없습니다";

/// The four summary cards, in display order.
pub fn stat_cards(stats: &StatsSnapshot) -> [(&'static str, u64, &'static str); 4] {
    [
        ("전체 인원", stats.total, "primary"),
        ("파견 사이트", stats.site_count, "success"),
        ("만료 예정 계약", stats.expiring_contracts, "warning"),
        ("만료 예정 파견", stats.expiring_assignments, "info"),
    ]
}

/// Render the summary cards. All four are always present, zero included.
pub fn render_stats_cards(stats: &StatsSnapshot) -> String {
    let mut out = String::from(r#"<div class="stats-grid">"#);
    for (label, value, tone) in stat_cards(stats) {
        out.push_str(&format!(
            r#"<div class="card stat-card stat-{tone}"><div class="stat-value">{value}</div><div class="stat-label">{label}</div></div>"#,
        ));
    }
    out.push_str("</div>");
    out
}

/// Render the history table, or the empty-state message when there is nothing saved.
pub fn render_history_table(items: &[ReportSummary], selected: Option<RecordId>) -> String {
    if items.is_empty() {
        return format!(r#"<p class="empty-state">{}</p>"#, EMPTY_HISTORY_MESSAGE);
    }

    let mut rows = String::new();
    for item in items {
        let class = if selected == Some(item.id) {
            r#" class="selected""#
        } else {
            ""
        };
        rows.push_str(&format!(
            r#"<tr{class} data-report-id="{id}"><td>{id}</td><td>{title}</td><td>{generated_at}</td></tr>"#,
            id = item.id,
            title = escape_text(&item.title),
            generated_at = escape_text(&item.generated_at_display()),
        ));
    }

    format!(
        r#"<table class="history-table"><thead><tr><th>ID</th><th>제목</th><th>생성일시</th></tr></thead><tbody>{rows}</tbody></table>"#
    )
}

/// Everything the standalone report page shows.
#[derive(Debug, Clone, Default)]
pub struct ReportPageView<'a> {
    pub theme: ReportTheme,
    /// Generation timestamp, already formatted.
    pub generated_at: Option<String>,
    pub stats: Option<&'a StatsSnapshot>,
    /// Output of the assembler.
    pub report_html: Option<&'a str>,
    pub history: &'a [ReportSummary],
    pub selected: Option<RecordId>,
    pub error: Option<&'a str>,
}

/// Render a complete standalone HTML page.
pub fn render_report_page(view: &ReportPageView<'_>) -> String {
    let error_banner = view
        .error
        .map(|msg| format!(r#"<div class="error-banner" role="alert">{}</div>"#, escape_text(msg)))
        .unwrap_or_default();
    let stats = view.stats.map(render_stats_cards).unwrap_or_default();
    let generated_at = view
        .generated_at
        .as_deref()
        .map(|ts| format!(r#"<span class="generated-at">생성일시: {}</span>"#, escape_text(ts)))
        .unwrap_or_default();
    let report = view
        .report_html
        .map(|html| format!(r#"<div class="card report-content">{}</div>"#, html))
        .unwrap_or_default();
    let history = render_history_table(view.history, view.selected);

    format!(
        r##"<!DOCTYPE html>
<html lang="ko" class="{theme_class}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>AI 보고서</title>
    <meta name="generator" content="sd-report {version}">
    <style>
        :root {{
            --bg-primary: #ffffff;
            --bg-secondary: #f9fafb;
            --text-primary: #111827;
            --text-secondary: #6b7280;
            --border-color: #e5e7eb;
            --accent-color: #3b82f6;
        }}
        .dark {{
            --bg-primary: #111827;
            --bg-secondary: #1f2937;
            --text-primary: #f9fafb;
            --text-secondary: #9ca3af;
            --border-color: #374151;
            --accent-color: #60a5fa;
        }}
        @media (prefers-color-scheme: dark) {{
            :root:not(.light) {{
                --bg-primary: #111827;
                --bg-secondary: #1f2937;
                --text-primary: #f9fafb;
                --text-secondary: #9ca3af;
                --border-color: #374151;
                --accent-color: #60a5fa;
            }}
        }}
        body {{
            background-color: var(--bg-primary);
            color: var(--text-primary);
            font-family: "Noto Sans KR", ui-sans-serif, system-ui, sans-serif;
            line-height: 1.7;
            max-width: 960px;
            margin: 0 auto;
            padding: 2rem 1rem;
        }}
        .card {{
            background-color: var(--bg-secondary);
            border: 1px solid var(--border-color);
            border-radius: 0.5rem;
            padding: 1.5rem;
            margin-bottom: 1rem;
        }}
        .stats-grid {{ display: grid; grid-template-columns: repeat(4, 1fr); gap: 1rem; }}
        .stat-card {{ text-align: center; padding: 1rem; }}
        .stat-value {{ font-size: 2rem; font-weight: 700; color: var(--accent-color); }}
        .stat-label {{ font-size: 0.875rem; color: var(--text-secondary); }}
        .error-banner {{
            margin: 1rem 0;
            padding: 12px 16px;
            background: rgba(239, 68, 68, 0.1);
            border: 1px solid rgba(239, 68, 68, 0.3);
            border-radius: 8px;
            color: #ef4444;
        }}
        .generated-at {{ font-size: 13px; color: var(--text-secondary); }}
        .report-section {{ border-radius: 0.5rem; padding: 1rem 1.25rem; margin: 1rem 0; }}
        .report-section-header {{ display: flex; align-items: center; gap: 0.5rem; }}
        .report-section-title {{ font-size: 1.1rem; margin: 0; display: flex; align-items: center; gap: 0.5rem; }}
        .report-section-number, .report-badge {{
            display: inline-flex; align-items: center; justify-content: center;
            width: 1.5rem; height: 1.5rem; border-radius: 9999px;
            color: #ffffff; font-size: 0.8rem; font-weight: 700;
        }}
        .report-kv {{ display: flex; gap: 1rem; padding: 0.25rem 0; }}
        .report-kv-label {{ min-width: 8rem; color: var(--text-secondary); }}
        .report-bullet, .report-numbered {{ display: flex; align-items: baseline; gap: 0.5rem; padding: 0.2rem 0; }}
        .report-dot {{ width: 6px; height: 6px; border-radius: 9999px; flex-shrink: 0; }}
        .report-content strong {{ color: var(--accent-color); }}
        .history-table {{ width: 100%; border-collapse: collapse; }}
        .history-table th, .history-table td {{ text-align: left; padding: 0.5rem; border-bottom: 1px solid var(--border-color); }}
        .history-table tr.selected {{ background: rgba(59, 130, 246, 0.08); }}
        .empty-state {{ color: var(--text-secondary); text-align: center; padding: 2rem 0; }}
        @media print {{
            .no-print {{ display: none !important; }}
            body {{ font-size: 10pt; }}
            .card {{ page-break-inside: avoid; }}
        }}
    </style>
</head>
<body>
    <header class="page-header">
        <h1 class="page-title">AI 보고서</h1>
        {generated_at}
    </header>
    {error_banner}
    {stats}
    {report}
    <section class="card no-print">
        <h2>보고서 히스토리</h2>
        {history}
    </section>
</body>
</html>
"##,
        theme_class = view.theme.css_class(),
        version = env!("CARGO_PKG_VERSION"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_stats_render_four_cards() {
        let html = render_stats_cards(&StatsSnapshot::default());
        assert_eq!(html.matches(r#"<div class="stat-value">0</div>"#).count(), 4);
        for label in ["전체 인원", "파견 사이트", "만료 예정 계약", "만료 예정 파견"] {
            assert!(html.contains(label), "missing card {label}");
        }
    }

    #[test]
    fn test_empty_history_has_no_table() {
        let html = render_history_table(&[], None);
        assert!(!html.contains("<table"));
        assert!(html.contains(EMPTY_HISTORY_MESSAGE));
    }

    #[test]
    fn test_history_rows_escape_titles() {
        let items = vec![ReportSummary {
            id: 3,
            title: "<b>보고서</b>".into(),
            generated_at: Some("2025-01-02 03:04:05".into()),
        }];
        let html = render_history_table(&items, Some(3));
        assert!(html.contains("&lt;b&gt;보고서&lt;/b&gt;"));
        assert!(html.contains(r#"<tr class="selected" data-report-id="3">"#));
        assert!(html.contains("2025-01-02 03:04"));
    }

    #[test]
    fn test_page_error_banner() {
        let view = ReportPageView {
            error: Some("보고서 생성에 실패했습니다."),
            ..Default::default()
        };
        let html = render_report_page(&view);
        assert!(html.contains(r#"role="alert">보고서 생성에 실패했습니다."#));
        assert!(!html.contains("stats-grid\""));
        assert!(html.contains(EMPTY_HISTORY_MESSAGE));
    }

    #[test]
    fn test_page_without_error_has_no_banner() {
        let stats = StatsSnapshot::default();
        let view = ReportPageView {
            stats: Some(&stats),
            report_html: Some("<article></article>"),
            generated_at: Some("2025-01-01 09:00:00".into()),
            ..Default::default()
        };
        let html = render_report_page(&view);
        assert!(!html.contains(r#"class="error-banner""#));
        assert!(html.contains(r#"<div class="stats-grid">"#));
        assert!(html.contains("생성일시: 2025-01-01 09:00:00"));
    }
}
