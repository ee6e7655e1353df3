//! PDF export against a real filesystem.

use chrono::NaiveDate;
use sd_common::StatsSnapshot;
use sd_report::{export_file_name, export_pdf, PdfInput, PdfLayout, ReportError};
use tempfile::tempdir;

const CONTENT: &str = "# 인력현황요약보고서\n\n**1. 전체 인원 현황**\n- **인원**: 42명\n\n**2. 계약 만료 위험**\n1. **한빛은행**: 3일 남음";

fn entries(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn export_writes_a_single_page() {
    let dir = tempdir().unwrap();
    let stats = StatsSnapshot {
        total: 42,
        site_count: 3,
        expiring_contracts: 1,
        expiring_assignments: 0,
    };
    let input = PdfInput {
        title: "보고서",
        content: CONTENT,
        generated_at: Some("2025-03-14 09:30:00"),
        stats: Some(&stats),
    };
    let name = export_file_name(None, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
    let path = export_pdf(&input, dir.path(), &name, &PdfLayout::default()).unwrap();

    assert_eq!(path.file_name().unwrap().to_string_lossy(), "인력현황보고서_2025-03-14.pdf");
    let doc = lopdf::Document::load(&path).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
    assert_eq!(entries(dir.path()), vec![name]);
}

#[test]
fn very_long_report_still_fits_one_page() {
    let dir = tempdir().unwrap();
    let content: String = (1..=60)
        .map(|n| format!("**{}. 항목 {}**\n- **값**: {}\n긴 설명 문장이 여기에 들어갑니다. 여러 줄로 감싸질 만큼 길게 씁니다.\n", n, n, n))
        .collect();
    let input = PdfInput {
        title: "긴 보고서",
        content: &content,
        ..Default::default()
    };
    let path = export_pdf(&input, dir.path(), "long.pdf", &PdfLayout::default()).unwrap();
    let doc = lopdf::Document::load(&path).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
}

#[test]
fn export_replaces_existing_file() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("report.pdf");
    std::fs::write(&target, b"stale").unwrap();

    let input = PdfInput {
        title: "보고서",
        content: CONTENT,
        ..Default::default()
    };
    export_pdf(&input, dir.path(), "report.pdf", &PdfLayout::default()).unwrap();

    let bytes = std::fs::read(&target).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    assert_eq!(entries(dir.path()), vec!["report.pdf".to_string()]);
}

#[test]
fn missing_directory_fails_without_output() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope");
    let input = PdfInput {
        title: "보고서",
        content: CONTENT,
        ..Default::default()
    };
    let err = export_pdf(&input, &missing, "report.pdf", &PdfLayout::default()).unwrap_err();
    assert!(matches!(err, ReportError::Export { .. }));
    assert_eq!(err.to_string(), sd_report::EXPORT_FAILED_MESSAGE);
    assert!(!missing.exists());
}
