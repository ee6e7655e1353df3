//! Report section parsing and inline markup.

pub mod inline;
pub mod splitter;

pub use inline::{emphasize, escape_text, parse_blocks, render_inline, transform, Block};
pub use splitter::{parse_heading, split_sections, Section};
