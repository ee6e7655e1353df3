//! Report configuration types.

use sd_common::report::DEFAULT_REPORT_TITLE;
use serde::{Deserialize, Serialize};

/// Report color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportTheme {
    /// Light theme.
    Light,
    /// Dark theme.
    Dark,
    /// Auto-detect from system preference.
    #[default]
    Auto,
}

impl ReportTheme {
    /// Get the CSS class for this theme.
    pub fn css_class(&self) -> &'static str {
        match self {
            ReportTheme::Light => "light",
            ReportTheme::Dark => "dark",
            ReportTheme::Auto => "",
        }
    }
}

/// Complete report configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Title used when the report has none and no `#` heading leads the text.
    #[serde(default = "default_title")]
    pub fallback_title: String,
    /// Color theme of the standalone page.
    #[serde(default)]
    pub theme: ReportTheme,
    /// Show the per-section icon glyphs.
    #[serde(default = "default_true")]
    pub show_icons: bool,
}

fn default_title() -> String {
    DEFAULT_REPORT_TITLE.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            fallback_title: default_title(),
            theme: ReportTheme::default(),
            show_icons: true,
        }
    }
}

impl ReportConfig {
    /// Create a new report configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback title.
    pub fn with_fallback_title(mut self, title: impl Into<String>) -> Self {
        self.fallback_title = title.into();
        self
    }

    /// Set the theme.
    pub fn with_theme(mut self, theme: ReportTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_icons(mut self, show: bool) -> Self {
        self.show_icons = show;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReportConfig::default();
        assert_eq!(config.fallback_title, "인력현황요약보고서");
        assert_eq!(config.theme, ReportTheme::Auto);
        assert!(config.show_icons);
    }

    #[test]
    fn test_config_builder() {
        let config = ReportConfig::new()
            .with_fallback_title("주간 보고")
            .with_theme(ReportTheme::Dark)
            .with_icons(false);

        assert_eq!(config.fallback_title, "주간 보고");
        assert_eq!(config.theme.css_class(), "dark");
        assert!(!config.show_icons);
    }

    #[test]
    fn test_config_deserialize_defaults() {
        let config: ReportConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ReportConfig::default());
    }
}
