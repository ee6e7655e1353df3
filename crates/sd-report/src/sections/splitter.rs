//! Section splitting.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// One section of a report, derived on every render and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// `None` for the text before the first numbered heading.
    pub ordinal: Option<u32>,
    /// Heading text without the number and markers. Empty for the leading section.
    pub title: String,
    /// Lines after the heading, joined with `\n`.
    pub body: String,
}

impl Section {
    pub fn is_leading(&self) -> bool {
        self.ordinal.is_none()
    }
}

static RE_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?:\*\*\s*(\d{1,6})\.\s*(.+?)\s*\*\*|###\s+(\d{1,6})\.\s*(.*?))\s*$",
    )
    .expect("valid heading regex")
});

/// Match a numbered heading line (`**N. Title**` or `### N. Title`).
pub fn parse_heading(line: &str) -> Option<(u32, String)> {
    let caps = RE_HEADING.captures(line)?;
    let (number, title) = match (caps.get(1), caps.get(2)) {
        (Some(n), Some(t)) => (n.as_str(), t.as_str()),
        _ => (caps.get(3)?.as_str(), caps.get(4).map_or("", |t| t.as_str())),
    };
    let ordinal = number.parse().ok()?;
    Some((ordinal, title.replace("**", "").trim().to_string()))
}

/// Split raw report text into ordered sections.
///
/// A numbered heading line starts a new section that runs to the next heading
/// or the end of the text. Text before the first heading becomes one leading
/// section with no ordinal, dropped when it is only whitespace.
pub fn split_sections(text: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current = Section {
        ordinal: None,
        title: String::new(),
        body: String::new(),
    };
    let mut lines: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        match parse_heading(line) {
            Some((ordinal, title)) => {
                current.body = trim_blank_lines(&lines);
                push_section(&mut sections, current);
                current = Section {
                    ordinal: Some(ordinal),
                    title,
                    body: String::new(),
                };
                lines.clear();
            }
            None => lines.push(line),
        }
    }
    current.body = trim_blank_lines(&lines);
    push_section(&mut sections, current);

    sections
}

fn push_section(sections: &mut Vec<Section>, section: Section) {
    let empty = section.ordinal.is_none() && section.body.trim().is_empty();
    if !empty {
        sections.push(section);
    }
}

/// Drop leading and trailing blank lines, keeping interior ones.
fn trim_blank_lines(lines: &[&str]) -> String {
    let start = lines.iter().position(|l| !l.trim().is_empty());
    let end = lines.iter().rposition(|l| !l.trim().is_empty());
    match (start, end) {
        (Some(s), Some(e)) => lines[s..=e].join("\n"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_bold_heading() {
        let sections = split_sections("**1. 요약**\n- **인원**: 42명");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].ordinal, Some(1));
        assert_eq!(sections[0].title, "요약");
        assert_eq!(sections[0].body, "- **인원**: 42명");
    }

    #[test]
    fn test_leading_section_kept() {
        let text = "# 인력현황요약보고서\n\n기준일 2025-01-01\n\n### 1. 전체 인원\n총 42명\n### 2. 파견 현황\n12개 사이트";
        let sections = split_sections(text);
        assert_eq!(sections.len(), 3);
        assert!(sections[0].is_leading());
        assert_eq!(sections[0].body, "# 인력현황요약보고서\n\n기준일 2025-01-01");
        assert_eq!(sections[1].title, "전체 인원");
        assert_eq!(sections[2].ordinal, Some(2));
        assert_eq!(sections[2].body, "12개 사이트");
    }

    #[test]
    fn test_whitespace_leading_dropped() {
        let sections = split_sections("  \n\t\n**1. 요약**\n내용");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].ordinal, Some(1));
    }

    #[test]
    fn test_no_headings_yields_single_leading() {
        let sections = split_sections("그냥 텍스트\n두 번째 줄");
        assert_eq!(sections.len(), 1);
        assert!(sections[0].is_leading());
        assert_eq!(sections[0].body, "그냥 텍스트\n두 번째 줄");
    }

    #[test]
    fn test_empty_input() {
        assert!(split_sections("").is_empty());
        assert!(split_sections("   \n  ").is_empty());
    }

    #[test]
    fn test_heading_must_own_the_line() {
        let sections = split_sections("요약: **1. 요약** 이어서");
        assert_eq!(sections.len(), 1);
        assert!(sections[0].is_leading());
    }

    #[test]
    fn test_heading_with_empty_body_is_kept() {
        let sections = split_sections("**1. 요약**\n**2. 추세**\n증가");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].body, "");
        assert_eq!(sections[1].body, "증가");
    }

    #[test]
    fn test_crlf_lines() {
        let sections = split_sections("### 3. 제언\r\n교육 확대\r\n");
        assert_eq!(sections[0].ordinal, Some(3));
        assert_eq!(sections[0].title, "제언");
        assert_eq!(sections[0].body, "교육 확대");
    }

    #[test]
    fn test_parse_heading_forms() {
        assert_eq!(parse_heading("**2. 추세 분석**"), Some((2, "추세 분석".into())));
        assert_eq!(parse_heading("### 10. 기타"), Some((10, "기타".into())));
        assert_eq!(parse_heading("### 4. **강조**"), Some((4, "강조".into())));
        assert_eq!(parse_heading("## 1. 요약"), None);
        assert_eq!(parse_heading("1. **항목**"), None);
        assert_eq!(parse_heading("**요약**"), None);
    }
}
