//! Badge tones shared by every status column.

use serde::{Deserialize, Serialize};

/// Visual tone of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    Primary,
    Success,
    Warning,
    Danger,
    Info,
    Secondary,
}

impl Badge {
    /// CSS class used by the markup renderers.
    pub fn css_class(&self) -> &'static str {
        match self {
            Badge::Primary => "badge-primary",
            Badge::Success => "badge-success",
            Badge::Warning => "badge-warning",
            Badge::Danger => "badge-danger",
            Badge::Info => "badge-info",
            Badge::Secondary => "badge-secondary",
        }
    }

    /// Accent color for the tone.
    pub fn color(&self) -> &'static str {
        match self {
            Badge::Primary => "#1B3A6D",
            Badge::Success => "#28A745",
            Badge::Warning => "#F59E0B",
            Badge::Danger => "#EF4444",
            Badge::Info => "#06B6D4",
            Badge::Secondary => "#6C757D",
        }
    }
}

impl std::fmt::Display for Badge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.css_class())
    }
}
