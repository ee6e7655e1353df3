//! Single-page PDF export.
//!
//! The report is flattened to plain lines, laid out at a base size, then
//! scaled uniformly so the whole report fits one A4 page, centered
//! horizontally 10 mm below the top edge. Korean text uses the non-embedded
//! `HYGoThic-Medium` CID font through the `UniKS-UCS2-H` CMap, so strings are
//! written as UCS-2 big-endian and characters outside the BMP become `?`.
//!
//! The document is written into a temporary file next to the destination and
//! renamed into place only after a complete write.

use crate::error::{ReportError, Result, EXPORT_FAILED_MESSAGE};
use crate::generator::ReportGenerator;
use crate::page::stat_cards;
use crate::sections::inline::{parse_blocks, strip_inline, Block};
use crate::sections::split_sections;
use crate::style::SectionTone;

use chrono::NaiveDate;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, StringFormat};
use sd_common::StatsSnapshot;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A4 portrait, in points.
pub const PAGE_WIDTH: f32 = 595.0;
pub const PAGE_HEIGHT: f32 = 842.0;
/// 10 mm.
pub const TOP_MARGIN: f32 = 28.35;

const FONT_NAME: &str = "HYGoThic-Medium";
const FONT_RESOURCE: &str = "F1";

/// Default file-name stem when the report has no usable title.
pub const DEFAULT_FILE_STEM: &str = "인력현황보고서";

/// Unscaled layout parameters, playing the part of the on-screen container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfLayout {
    pub base_font_size: f32,
    /// Line height as a multiple of the font size.
    pub line_spacing: f32,
    /// Width available to text before scaling.
    pub content_width: f32,
    pub padding: f32,
}

impl Default for PdfLayout {
    fn default() -> Self {
        Self {
            base_font_size: 11.0,
            line_spacing: 1.6,
            content_width: 520.0,
            padding: 20.0,
        }
    }
}

/// What gets exported.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfInput<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub generated_at: Option<&'a str>,
    pub stats: Option<&'a StatsSnapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineStyle {
    Title,
    Meta,
    SectionTitle(SectionTone),
    Body,
    Blank,
}

impl LineStyle {
    fn size_factor(&self) -> f32 {
        match self {
            LineStyle::Title => 1.6,
            LineStyle::SectionTitle(_) => 1.25,
            LineStyle::Meta => 0.85,
            LineStyle::Body | LineStyle::Blank => 1.0,
        }
    }

    fn color(&self) -> (f32, f32, f32) {
        match self {
            LineStyle::SectionTitle(tone) => tone.rgb(),
            LineStyle::Meta => (0.42, 0.45, 0.50),
            _ => (0.07, 0.09, 0.15),
        }
    }
}

/// One line of flattened report text.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfLine {
    pub text: String,
    pub style: LineStyle,
    /// Left indent in ems.
    pub indent: f32,
}

impl PdfLine {
    fn new(text: impl Into<String>, style: LineStyle) -> Self {
        Self {
            text: text.into(),
            style,
            indent: 0.0,
        }
    }

    fn indented(text: impl Into<String>, indent: f32) -> Self {
        Self {
            text: text.into(),
            style: LineStyle::Body,
            indent,
        }
    }

    fn blank() -> Self {
        Self::new("", LineStyle::Blank)
    }
}

/// Flatten a report to plain lines: bold markers removed, bullets as `•`,
/// numbered items as `N.`, labels as `label: value`.
pub fn flatten_report(input: &PdfInput<'_>) -> Vec<PdfLine> {
    let sections = split_sections(input.content);
    let header = ReportGenerator::default_config().header(&sections, input.title);

    let mut lines = vec![PdfLine::new(header.title, LineStyle::Title)];
    if let Some(ts) = input.generated_at {
        lines.push(PdfLine::new(format!("생성일시: {}", ts), LineStyle::Meta));
    }
    if let Some(stats) = input.stats {
        let summary: Vec<String> = stat_cards(stats)
            .iter()
            .map(|(label, value, _)| format!("{} {}", label, value))
            .collect();
        lines.push(PdfLine::new(summary.join("  ·  "), LineStyle::Meta));
    }
    if !header.intro.is_empty() {
        lines.push(PdfLine::blank());
        push_blocks(&mut lines, &parse_blocks(&header.intro));
    }

    for section in sections.iter().filter(|s| !s.is_leading()) {
        let ordinal = section.ordinal.unwrap_or_default();
        lines.push(PdfLine::blank());
        lines.push(PdfLine::new(
            format!("{}. {}", ordinal, strip_inline(&section.title)),
            LineStyle::SectionTitle(SectionTone::for_ordinal(ordinal)),
        ));
        push_blocks(&mut lines, &parse_blocks(&section.body));
    }

    lines
}

fn push_blocks(lines: &mut Vec<PdfLine>, blocks: &[Block]) {
    for block in blocks {
        match block {
            Block::KeyValue { label, value } => lines.push(PdfLine::indented(
                format!("{}: {}", strip_inline(label), strip_inline(value)),
                1.0,
            )),
            Block::Bullet { text } => {
                lines.push(PdfLine::indented(format!("• {}", strip_inline(text)), 1.0))
            }
            Block::Numbered { number, lead, rest } => {
                let text = if rest.is_empty() {
                    format!("{}. {}", number, strip_inline(lead))
                } else {
                    format!("{}. {} {}", number, strip_inline(lead), strip_inline(rest))
                };
                lines.push(PdfLine::indented(text, 1.0));
            }
            Block::Heading { text, .. } => lines.push(PdfLine::new(strip_inline(text), LineStyle::Body)),
            Block::Paragraph { lines: para } => {
                for line in para {
                    lines.push(PdfLine::indented(strip_inline(line), 0.0));
                }
            }
        }
    }
}

/// Estimated advance of one character in ems: half width for ASCII, full otherwise.
fn char_em(ch: char) -> f32 {
    if (' '..='~').contains(&ch) {
        0.5
    } else {
        1.0
    }
}

fn text_em(text: &str) -> f32 {
    text.chars().map(char_em).sum()
}

/// Break `text` into pieces no wider than `max_em`, preferring spaces.
pub fn wrap_text(text: &str, max_em: f32) -> Vec<String> {
    if text_em(text) <= max_em || max_em <= 1.0 {
        return vec![text.to_string()];
    }

    let mut out = Vec::new();
    let mut current = String::new();
    let mut width = 0.0;
    let mut last_space: Option<usize> = None;

    for ch in text.chars() {
        let w = char_em(ch);
        if width + w > max_em && !current.is_empty() {
            match last_space {
                Some(at) if at > 0 => {
                    let tail = current.split_off(at);
                    out.push(current.trim_end().to_string());
                    current = tail.trim_start().to_string();
                }
                _ => out.push(std::mem::take(&mut current)),
            }
            width = text_em(&current);
            last_space = None;
        }
        if ch == ' ' {
            last_space = Some(current.len());
        }
        current.push(ch);
        width += w;
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

/// A line placed on the page, in final PDF coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub color: (f32, f32, f32),
}

/// The scaled page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    /// Uniform scale, `min(page_w / content_w, page_h / content_h, 1)`.
    pub scale: f32,
    pub content_width: f32,
    pub content_height: f32,
    pub lines: Vec<PlacedLine>,
}

/// Lay out lines at base size, then scale to fit one page.
pub fn layout_page(lines: &[PdfLine], layout: &PdfLayout) -> PageLayout {
    // Wrap at base size first.
    let mut wrapped: Vec<(String, LineStyle, f32)> = Vec::new();
    for line in lines {
        let size = layout.base_font_size * line.style.size_factor();
        let max_em = layout.content_width / size - line.indent;
        for piece in wrap_text(&line.text, max_em) {
            wrapped.push((piece, line.style, line.indent));
        }
    }

    let heights: Vec<f32> = wrapped
        .iter()
        .map(|(_, style, _)| layout.base_font_size * style.size_factor() * layout.line_spacing)
        .collect();
    let content_width = layout.content_width + 2.0 * layout.padding;
    let content_height = heights.iter().sum::<f32>() + 2.0 * layout.padding;

    let available_height = PAGE_HEIGHT - TOP_MARGIN;
    let scale = (PAGE_WIDTH / content_width)
        .min(available_height / content_height)
        .min(1.0);
    let origin_x = (PAGE_WIDTH - content_width * scale) / 2.0;
    let top = PAGE_HEIGHT - TOP_MARGIN;

    let mut cursor = layout.padding;
    let mut placed = Vec::with_capacity(wrapped.len());
    for ((text, style, indent), height) in wrapped.into_iter().zip(heights) {
        let size = layout.base_font_size * style.size_factor();
        // Baseline sits one font size below the top of the line box.
        let baseline = cursor + (height - size) / 2.0 + size * 0.88;
        cursor += height;
        if style == LineStyle::Blank || text.is_empty() {
            continue;
        }
        placed.push(PlacedLine {
            text,
            x: origin_x + (layout.padding + indent * size) * scale,
            y: top - baseline * scale,
            font_size: size * scale,
            color: style.color(),
        });
    }

    PageLayout {
        scale,
        content_width,
        content_height,
        lines: placed,
    }
}

/// Encode text as UCS-2 big-endian; characters outside the BMP become `?`.
pub fn encode_ucs2(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() * 2);
    for ch in text.chars() {
        let code = match u32::from(ch) {
            c if c <= 0xFFFF && !ch.is_control() => c as u16,
            _ if ch == '\t' => 0x0020,
            _ => 0x003F,
        };
        out.extend_from_slice(&code.to_be_bytes());
    }
    out
}

fn name(value: &str) -> Object {
    Object::Name(value.as_bytes().to_vec())
}

fn literal(value: &str) -> Object {
    Object::String(value.as_bytes().to_vec(), StringFormat::Literal)
}

fn content_operations(page: &PageLayout) -> Vec<Operation> {
    let mut ops = Vec::with_capacity(page.lines.len() * 6);
    for line in &page.lines {
        let (r, g, b) = line.color;
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new(
            "rg",
            vec![Object::Real(r), Object::Real(g), Object::Real(b)],
        ));
        ops.push(Operation::new(
            "Tf",
            vec![name(FONT_RESOURCE), Object::Real(line.font_size)],
        ));
        ops.push(Operation::new(
            "Td",
            vec![Object::Real(line.x), Object::Real(line.y)],
        ));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(
                encode_ucs2(&line.text),
                StringFormat::Hexadecimal,
            )],
        ));
        ops.push(Operation::new("ET", vec![]));
    }
    ops
}

/// Build the one-page document.
pub fn build_document(input: &PdfInput<'_>, layout: &PdfLayout) -> Result<Document> {
    let page = layout_page(&flatten_report(input), layout);
    debug!(
        scale = page.scale,
        lines = page.lines.len(),
        "pdf layout computed"
    );

    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let descriptor_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", name("FontDescriptor")),
        ("FontName", name(FONT_NAME)),
        ("Flags", Object::Integer(6)),
        (
            "FontBBox",
            Object::Array(vec![
                Object::Integer(-6),
                Object::Integer(-145),
                Object::Integer(1003),
                Object::Integer(880),
            ]),
        ),
        ("ItalicAngle", Object::Integer(0)),
        ("Ascent", Object::Integer(880)),
        ("Descent", Object::Integer(-120)),
        ("CapHeight", Object::Integer(880)),
        ("StemV", Object::Integer(93)),
    ]));

    let cid_font_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", name("Font")),
        ("Subtype", name("CIDFontType0")),
        ("BaseFont", name(FONT_NAME)),
        (
            "CIDSystemInfo",
            Object::Dictionary(Dictionary::from_iter(vec![
                ("Registry", literal("Adobe")),
                ("Ordering", literal("Korea1")),
                ("Supplement", Object::Integer(1)),
            ])),
        ),
        ("FontDescriptor", Object::Reference(descriptor_id)),
        ("DW", Object::Integer(1000)),
        (
            "W",
            Object::Array(vec![
                Object::Integer(1),
                Object::Integer(95),
                Object::Integer(500),
            ]),
        ),
    ]));

    let font_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", name("Font")),
        ("Subtype", name("Type0")),
        ("BaseFont", name(FONT_NAME)),
        ("Encoding", name("UniKS-UCS2-H")),
        (
            "DescendantFonts",
            Object::Array(vec![Object::Reference(cid_font_id)]),
        ),
    ]));

    let content = Content {
        operations: content_operations(&page),
    };
    let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode()?));

    let resources = Dictionary::from_iter(vec![(
        "Font",
        Object::Dictionary(Dictionary::from_iter(vec![(
            FONT_RESOURCE,
            Object::Reference(font_id),
        )])),
    )]);

    let page_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", name("Page")),
        ("Parent", Object::Reference(pages_id)),
        (
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(PAGE_WIDTH),
                Object::Real(PAGE_HEIGHT),
            ]),
        ),
        ("Contents", Object::Reference(content_id)),
        ("Resources", Object::Dictionary(resources)),
    ]));

    let pages = Dictionary::from_iter(vec![
        ("Type", name("Pages")),
        ("Count", Object::Integer(1)),
        ("Kids", Object::Array(vec![Object::Reference(page_id)])),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", name("Catalog")),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let info_id = doc.add_object(Dictionary::from_iter(vec![
        (
            "Title",
            Object::String(utf16_with_bom(input.title), StringFormat::Hexadecimal),
        ),
        ("Producer", literal("sd-report")),
    ]));
    doc.trailer.set("Info", Object::Reference(info_id));

    doc.compress();
    Ok(doc)
}

/// PDF text string for the info dictionary.
fn utf16_with_bom(text: &str) -> Vec<u8> {
    let mut out = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        out.extend_from_slice(&unit.to_be_bytes());
    }
    out
}

/// Write `doc` to `path` through a temporary file in the same directory.
///
/// The temporary file is removed on every failure path.
pub fn write_document(doc: &mut Document, path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = tempfile::Builder::new()
        .prefix(".staffdesk-export-")
        .suffix(".pdf.tmp")
        .tempfile_in(dir)?;

    doc.save_to(staged.as_file_mut())?;
    staged.as_file_mut().flush()?;
    staged.as_file().sync_all()?;

    staged.persist(path).map_err(|e| ReportError::IoError(e.error))?;
    Ok(())
}

/// File name for an export: the sanitized title, or `인력현황보고서_YYYY-MM-DD.pdf`.
pub fn export_file_name(title: Option<&str>, today: NaiveDate) -> String {
    let stem: String = title
        .unwrap_or("")
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let stem = stem.trim().trim_matches('.').trim();
    if stem.is_empty() || stem.chars().all(|c| c == '_') {
        format!("{}_{}.pdf", DEFAULT_FILE_STEM, today.format("%Y-%m-%d"))
    } else {
        format!("{}.pdf", stem)
    }
}

/// Export a report to `dest_dir/file_name`.
///
/// Any failure is logged with its cause and returned as [`ReportError::Export`],
/// whose message is the fixed user-facing text.
pub fn export_pdf(
    input: &PdfInput<'_>,
    dest_dir: &Path,
    file_name: &str,
    layout: &PdfLayout,
) -> Result<PathBuf> {
    let path = dest_dir.join(file_name);
    let result = build_document(input, layout).and_then(|mut doc| write_document(&mut doc, &path));

    match result {
        Ok(()) => {
            info!(path = %path.display(), "PDF exported");
            Ok(path)
        }
        Err(err) => {
            warn!(error = %err, path = %path.display(), "{}", EXPORT_FAILED_MESSAGE);
            Err(ReportError::Export {
                reason: err.to_string(),
            })
        }
    }
}
