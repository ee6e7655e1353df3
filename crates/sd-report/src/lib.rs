//! Report formatting for staffdesk.
//!
//! Turns the section-numbered text produced by the report backend into
//! structured HTML, and exports a report as a single-page PDF.
//!
//! # Pipeline
//!
//! 1. [`sections::split_sections`] cuts the text at numbered section headings.
//! 2. [`sections::parse_blocks`] classifies each body line (label/value rows,
//!    bullets, numbered items, paragraphs).
//! 3. [`sections::render_inline`] escapes text and applies bold markers.
//! 4. [`ReportGenerator`] wraps every section in its tone and icon and
//!    assembles the document.
//!
//! # Example
//!
//! ```
//! use sd_report::ReportGenerator;
//!
//! let generator = ReportGenerator::default_config();
//! let html = generator.assemble("주간 보고서", "**1. 요약**\n- **인원**: 42명");
//! assert!(html.contains("report-kv-label"));
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod page;
pub mod pdf;
pub mod sections;
pub mod style;

pub use config::{ReportConfig, ReportTheme};
pub use error::{ReportError, Result, EXPORT_FAILED_MESSAGE};
pub use generator::{DocumentHeader, ReportGenerator, RenderedSection};
pub use page::{render_history_table, render_report_page, render_stats_cards, ReportPageView};
pub use pdf::{export_file_name, export_pdf, PdfInput, PdfLayout};
pub use style::{SectionIcon, SectionTone};
