//! Report assembler.

use crate::config::ReportConfig;
use crate::sections::inline::{escape_text, strip_inline, transform};
use crate::sections::{split_sections, Section};
use crate::style::{SectionIcon, SectionTone};

use regex::Regex;
use sd_common::Report;
use serde::Serialize;
use std::sync::LazyLock;
use tracing::debug;

/// One rendered section. Recomputed on every render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedSection {
    pub ordinal: Option<u32>,
    pub markup: String,
}

/// Title and intro taken from the leading unnumbered section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentHeader {
    pub title: String,
    /// Raw intro text, may be empty.
    pub intro: String,
}

static RE_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#{1,2}\s+(.+?)\s*#*\s*$").expect("valid title regex"));

/// Report generator.
///
/// Every method is pure: the same report text always yields the same bytes.
#[derive(Debug, Clone, Default)]
pub struct ReportGenerator {
    config: ReportConfig,
}

impl ReportGenerator {
    /// Create a new report generator with configuration.
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Create a generator with default configuration.
    pub fn default_config() -> Self {
        Self::new(ReportConfig::default())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Derive the document header.
    ///
    /// A `#` or `##` line at the top of the leading section becomes the title and
    /// the rest its intro. Otherwise the report title (or the configured
    /// fallback) is used and the whole leading section is the intro.
    pub fn header(&self, sections: &[Section], report_title: &str) -> DocumentHeader {
        let fallback = if report_title.trim().is_empty() {
            self.config.fallback_title.clone()
        } else {
            report_title.trim().to_string()
        };

        let leading = match sections.first() {
            Some(section) if section.is_leading() => section.body.as_str(),
            _ => {
                return DocumentHeader {
                    title: fallback,
                    intro: String::new(),
                }
            }
        };

        let mut lines = leading.lines();
        let first = lines.next().unwrap_or("");
        match RE_TITLE.captures(first) {
            Some(caps) => DocumentHeader {
                title: strip_inline(&caps[1]),
                intro: lines.collect::<Vec<_>>().join("\n").trim().to_string(),
            },
            None => DocumentHeader {
                title: fallback,
                intro: leading.trim().to_string(),
            },
        }
    }

    /// Wrap one numbered section in its tone and icon container.
    ///
    /// The leading section is rendered by [`ReportGenerator::render_header`] instead.
    pub fn render_section(&self, section: &Section) -> RenderedSection {
        let ordinal = match section.ordinal {
            Some(n) => n,
            None => {
                return RenderedSection {
                    ordinal: None,
                    markup: format!(
                        r#"<div class="report-intro">{}</div>"#,
                        transform(&section.body, None)
                    ),
                }
            }
        };

        let tone = SectionTone::for_ordinal(ordinal);
        let icon = SectionIcon::for_title(&section.title);
        let icon_html = if self.config.show_icons {
            format!(
                r#"<span class="report-section-icon" data-icon="{}" style="color: {}">{}</span>"#,
                icon.name(),
                tone.accent(),
                icon.glyph()
            )
        } else {
            String::new()
        };

        let markup = format!(
            r#"<section class="report-section {tone_class}" data-ordinal="{ordinal}" style="border-left: 4px solid {accent}; background: {background}">
<div class="report-section-header">{icon_html}<h2 class="report-section-title"><span class="report-section-number" style="background: {accent}">{ordinal}</span>{title}</h2></div>
<div class="report-section-body">{body}</div>
</section>"#,
            tone_class = tone.css_class(),
            accent = tone.accent(),
            background = tone.background(),
            title = escape_text(&strip_inline(&section.title)),
            body = transform(&section.body, Some(tone)),
        );

        RenderedSection {
            ordinal: Some(ordinal),
            markup,
        }
    }

    pub fn render_header(&self, header: &DocumentHeader) -> String {
        let intro = if header.intro.is_empty() {
            String::new()
        } else {
            format!(
                r#"<div class="report-intro">{}</div>"#,
                transform(&header.intro, None)
            )
        };
        format!(
            r#"<header class="report-doc-header"><h1 class="report-doc-title">{}</h1>{}</header>"#,
            escape_text(&header.title),
            intro
        )
    }

    /// Render every numbered section, in input order.
    pub fn render_sections(&self, sections: &[Section]) -> Vec<RenderedSection> {
        sections
            .iter()
            .filter(|s| !s.is_leading())
            .map(|s| self.render_section(s))
            .collect()
    }

    /// Assemble the full report markup: header followed by every section.
    pub fn assemble(&self, report_title: &str, content: &str) -> String {
        let sections = split_sections(content);
        let header = self.header(&sections, report_title);
        let rendered = self.render_sections(&sections);

        let mut out = String::from(r#"<article class="report-document">"#);
        out.push('\n');
        out.push_str(&self.render_header(&header));
        for section in &rendered {
            out.push('\n');
            out.push_str(&section.markup);
        }
        out.push_str("\n</article>");

        debug!(
            sections = rendered.len(),
            bytes = out.len(),
            "report assembled"
        );
        out
    }

    pub fn assemble_report(&self, report: &Report) -> String {
        self.assemble(&report.title, &report.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "# 인력현황요약보고서\n기준: 2025-01-01\n\n**1. 전체 인원 현황**\n- **인원**: 42명\n- 대기 인력 5명\n\n**2. 계약 만료 위험**\n1. **한빛은행**: 3일 남음\n\n### 3. 개선 제언\n교육 확대 & 재배치";

    #[test]
    fn test_header_from_hash_heading() {
        let generator = ReportGenerator::default_config();
        let sections = split_sections(SAMPLE);
        let header = generator.header(&sections, "무시됨");
        assert_eq!(header.title, "인력현황요약보고서");
        assert_eq!(header.intro, "기준: 2025-01-01");
    }

    #[test]
    fn test_header_falls_back_to_report_title() {
        let generator = ReportGenerator::default_config();
        let sections = split_sections("**1. 요약**\n본문");
        let header = generator.header(&sections, "주간 보고서");
        assert_eq!(header.title, "주간 보고서");
        assert!(header.intro.is_empty());

        let header = generator.header(&sections, "  ");
        assert_eq!(header.title, "인력현황요약보고서");
    }

    #[test]
    fn test_header_without_heading_uses_leading_as_intro() {
        let generator = ReportGenerator::default_config();
        let sections = split_sections("요약 문장입니다.\n**1. 요약**\n본문");
        let header = generator.header(&sections, "보고서");
        assert_eq!(header.title, "보고서");
        assert_eq!(header.intro, "요약 문장입니다.");
    }

    #[test]
    fn test_sections_keep_order_and_tone() {
        let generator = ReportGenerator::default_config();
        let rendered = generator.render_sections(&split_sections(SAMPLE));
        let ordinals: Vec<_> = rendered.iter().map(|r| r.ordinal).collect();
        assert_eq!(ordinals, vec![Some(1), Some(2), Some(3)]);
        assert!(rendered[0].markup.contains("tone-blue"));
        assert!(rendered[0].markup.contains(r#"data-icon="users""#));
        assert!(rendered[1].markup.contains("tone-green"));
        assert!(rendered[1].markup.contains(r#"data-icon="alert-triangle""#));
        assert!(rendered[2].markup.contains("tone-amber"));
        assert!(rendered[2].markup.contains("교육 확대 &amp; 재배치"));
    }

    #[test]
    fn test_assemble_is_idempotent() {
        let generator = ReportGenerator::default_config();
        let first = generator.assemble("보고서", SAMPLE);
        let second = generator.assemble("보고서", SAMPLE);
        assert_eq!(first, second);
    }

    #[test]
    fn test_assemble_plain_text() {
        let generator = ReportGenerator::default_config();
        let html = generator.assemble("", "a < b\nc");
        assert!(html.contains("a &lt; b<br/>c"));
        assert!(html.contains("인력현황요약보고서"));
        assert!(!html.contains("report-section "));
    }

    #[test]
    fn test_icons_can_be_hidden() {
        let generator = ReportGenerator::new(ReportConfig::new().with_icons(false));
        let html = generator.assemble("", "**1. 인원**\n내용");
        assert!(!html.contains("data-icon"));
    }

    #[test]
    fn test_assemble_report_record() {
        let generator = ReportGenerator::default_config();
        let report = Report {
            id: Some(7),
            title: "히스토리 보고서".into(),
            content: "**1. 요약**\n- **인원**: 42명".into(),
            generated_at: None,
        };
        let html = generator.assemble_report(&report);
        assert!(html.contains("히스토리 보고서"));
        assert!(html.contains(r#"<span class="report-kv-label">인원</span>"#));
    }
}
