//! Command output rendering.
//!
//! Every command prints either a Markdown rendition of the records it fetched
//! or the records themselves as pretty JSON. Diagnostics never go to stdout;
//! see [`errors`] for the stderr side.

pub mod errors;
pub mod records;

pub use errors::CliError;

use sd_common::Result;
use serde::Serialize;

/// Pretty JSON for `--format json`.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// A Markdown pipe table.
#[derive(Debug, Clone, Default)]
pub struct MdTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl MdTable {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Short rows are padded with empty cells.
    pub fn row<I, S>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cells: Vec<String> = cells.into_iter().map(Into::into).collect();
        cells.resize(self.headers.len(), String::new());
        self.rows.push(cells);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&line(&self.headers));
        out.push_str(&line(
            &self.headers.iter().map(|_| "---".to_string()).collect::<Vec<_>>(),
        ));
        for row in &self.rows {
            out.push_str(&line(row));
        }
        out
    }
}

fn line(cells: &[String]) -> String {
    let cells: Vec<String> = cells.iter().map(|c| escape_cell(c)).collect();
    format!("| {} |\n", cells.join(" | "))
}

/// Keep a cell on one line and out of the column separators.
pub fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
}

/// A `## heading` followed by its body, blank-line separated.
pub fn section(heading: &str, body: &str) -> String {
    format!("## {}\n\n{}\n", heading, body.trim_end())
}
