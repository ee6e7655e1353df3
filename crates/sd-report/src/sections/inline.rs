//! Inline markup transformer.
//!
//! Each body line is classified once, in this precedence:
//! 1. key-value bullet `- **label**: value` (colon inside or after the bold span)
//! 2. plain bullet (`-`, `*` or `•` followed by whitespace)
//! 3. numbered item with a bold lead, `N. **lead** rest`
//! 4. un-numbered `#` heading
//! 5. anything else is text
//!
//! Text segments are HTML-escaped and then bold spans become `<strong>`.
//! Consecutive text lines are joined with `<br/>`; a blank line ends a paragraph.
//! Bold is matched within one line only, so a `**` pair split across a newline
//! stays literal.

use crate::style::SectionTone;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// A classified run of body lines. Strings hold raw (unescaped) text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    KeyValue { label: String, value: String },
    Bullet { text: String },
    Numbered { number: u32, lead: String, rest: String },
    Heading { level: u8, text: String },
    Paragraph { lines: Vec<String> },
}

static RE_KV: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[-*•]\s+\*\*([^*]+?)\*\*\s*([:：]?)\s*(.*)$").expect("valid key-value regex")
});

static RE_BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-*•]\s+(.*)$").expect("valid bullet regex"));

static RE_NUMBERED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d{1,6})[.)]\s+\*\*([^*]+?)\*\*\s*(.*)$").expect("valid numbered regex")
});

static RE_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(#{1,6})\s+(.+?)\s*#*\s*$").expect("valid heading regex"));

static RE_BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*<>\n]+?)\*\*").expect("valid bold regex"));

static RE_ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^&(?:#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[A-Za-z][A-Za-z0-9]{1,31});")
        .expect("valid entity regex")
});

/// Classify a single body line. `None` means blank.
fn classify(line: &str) -> Option<Block> {
    if line.trim().is_empty() {
        return None;
    }

    if let Some(caps) = RE_KV.captures(line) {
        let label = caps[1].trim();
        let colon_after = !caps[2].is_empty();
        let colon_inside = label.ends_with(':') || label.ends_with('：');
        if colon_after || colon_inside {
            let label = label.trim_end_matches([':', '：']).trim_end();
            return Some(Block::KeyValue {
                label: label.to_string(),
                value: caps[3].trim().to_string(),
            });
        }
    }

    if let Some(caps) = RE_BULLET.captures(line) {
        return Some(Block::Bullet {
            text: caps[1].trim().to_string(),
        });
    }

    if let Some(caps) = RE_NUMBERED.captures(line) {
        if let Ok(number) = caps[1].parse() {
            let rest = caps[3].trim();
            let rest = rest
                .strip_prefix(':')
                .or_else(|| rest.strip_prefix('-'))
                .unwrap_or(rest)
                .trim_start();
            return Some(Block::Numbered {
                number,
                lead: caps[2].trim().to_string(),
                rest: rest.to_string(),
            });
        }
    }

    if let Some(caps) = RE_HEADING.captures(line) {
        return Some(Block::Heading {
            level: caps[1].len() as u8,
            text: caps[2].to_string(),
        });
    }

    Some(Block::Paragraph {
        lines: vec![line.trim_end().to_string()],
    })
}

/// Parse a section body into blocks.
pub fn parse_blocks(body: &str) -> Vec<Block> {
    let mut blocks: Vec<Block> = Vec::new();
    let mut previous_blank = true;

    for line in body.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        match classify(line) {
            None => previous_blank = true,
            Some(Block::Paragraph { lines }) => {
                let continues = !previous_blank
                    && matches!(blocks.last(), Some(Block::Paragraph { .. }));
                if continues {
                    if let Some(Block::Paragraph { lines: open }) = blocks.last_mut() {
                        open.extend(lines);
                    }
                } else {
                    blocks.push(Block::Paragraph { lines });
                }
                previous_blank = false;
            }
            Some(block) => {
                blocks.push(block);
                previous_blank = false;
            }
        }
    }

    blocks
}

/// Escape `<`, `>`, `&` and `"`, leaving existing character entities intact.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, ch) in text.char_indices() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '&' if RE_ENTITY.is_match(&text[i..]) => out.push('&'),
            '&' => out.push_str("&amp;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Turn `**text**` into `<strong>text</strong>`. Unpaired asterisks stay literal.
///
/// Applying this to its own output changes nothing.
pub fn emphasize(escaped: &str) -> String {
    RE_BOLD
        .replace_all(escaped, "<strong>$1</strong>")
        .into_owned()
}

/// Escape then emphasize one segment of raw text.
pub fn render_inline(raw: &str) -> String {
    emphasize(&escape_text(raw))
}

/// Bold markers removed, for plain-text surfaces.
pub fn strip_inline(raw: &str) -> String {
    RE_BOLD.replace_all(raw, "$1").into_owned()
}

/// Render blocks as markup, using `tone` for badges and markers.
pub fn render_blocks(blocks: &[Block], tone: Option<SectionTone>) -> String {
    let accent = tone.map_or("var(--accent-color)", |t| t.accent());
    let mut out = String::new();

    for block in blocks {
        match block {
            Block::KeyValue { label, value } => out.push_str(&format!(
                r#"<div class="report-kv"><span class="report-kv-label">{}</span><span class="report-kv-value">{}</span></div>"#,
                render_inline(label),
                render_inline(value),
            )),
            Block::Bullet { text } => out.push_str(&format!(
                r#"<div class="report-bullet"><span class="report-dot" style="background: {}"></span><span>{}</span></div>"#,
                accent,
                render_inline(text),
            )),
            Block::Numbered { number, lead, rest } => {
                let rest = if rest.is_empty() {
                    String::new()
                } else {
                    format!(" {}", render_inline(rest))
                };
                out.push_str(&format!(
                    r#"<div class="report-numbered"><span class="report-badge" style="background: {}">{}</span><span><strong>{}</strong>{}</span></div>"#,
                    accent,
                    number,
                    render_inline(lead),
                    rest,
                ));
            }
            Block::Heading { level, text } => {
                // Section titles are h2; body headings sit below them.
                let tag = (level + 2).min(6);
                out.push_str(&format!(
                    r#"<h{tag} class="report-subheading">{}</h{tag}>"#,
                    render_inline(text),
                ));
            }
            Block::Paragraph { lines } => {
                let rendered: Vec<String> = lines.iter().map(|l| render_inline(l)).collect();
                out.push_str(&format!(
                    r#"<p class="report-text">{}</p>"#,
                    rendered.join("<br/>"),
                ));
            }
        }
    }

    out
}

/// Parse and render a section body.
pub fn transform(body: &str, tone: Option<SectionTone>) -> String {
    render_blocks(&parse_blocks(body), tone)
}
