//! Section tones and icons.
//!
//! Both lookups are total: every ordinal maps to one of four tones and every
//! title maps to an icon, with [`SectionIcon::FileText`] as the fallback.

use serde::Serialize;

/// Color tone of a numbered section, cycled by ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionTone {
    Blue,
    Green,
    Amber,
    Violet,
}

impl SectionTone {
    /// Palette order; index `(n - 1) mod 4` selects the tone of section `n`.
    pub const PALETTE: [SectionTone; 4] = [
        SectionTone::Blue,
        SectionTone::Green,
        SectionTone::Amber,
        SectionTone::Violet,
    ];

    pub fn for_ordinal(ordinal: u32) -> Self {
        let index = (i64::from(ordinal) - 1).rem_euclid(4) as usize;
        Self::PALETTE[index]
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            SectionTone::Blue => "tone-blue",
            SectionTone::Green => "tone-green",
            SectionTone::Amber => "tone-amber",
            SectionTone::Violet => "tone-violet",
        }
    }

    /// Accent color for borders, badges and icons.
    pub fn accent(&self) -> &'static str {
        match self {
            SectionTone::Blue => "#3B82F6",
            SectionTone::Green => "#10B981",
            SectionTone::Amber => "#F59E0B",
            SectionTone::Violet => "#8B5CF6",
        }
    }

    /// Translucent background behind the section body.
    pub fn background(&self) -> &'static str {
        match self {
            SectionTone::Blue => "rgba(59, 130, 246, 0.06)",
            SectionTone::Green => "rgba(16, 185, 129, 0.06)",
            SectionTone::Amber => "rgba(245, 158, 11, 0.06)",
            SectionTone::Violet => "rgba(139, 92, 246, 0.06)",
        }
    }

    /// Accent as RGB components in `0.0..=1.0`, for PDF fill colors.
    pub fn rgb(&self) -> (f32, f32, f32) {
        match self {
            SectionTone::Blue => (0.231, 0.510, 0.965),
            SectionTone::Green => (0.063, 0.725, 0.506),
            SectionTone::Amber => (0.961, 0.620, 0.043),
            SectionTone::Violet => (0.545, 0.361, 0.965),
        }
    }
}

/// Icon shown next to a section title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionIcon {
    Users,
    Building,
    Alert,
    Calendar,
    TrendingUp,
    Lightbulb,
    FileText,
}

/// Keyword table, checked in order; the first keyword contained in the title wins.
const ICON_KEYWORDS: &[(&str, SectionIcon)] = &[
    ("인원", SectionIcon::Users),
    ("인력", SectionIcon::Users),
    ("사이트", SectionIcon::Building),
    ("파견", SectionIcon::Building),
    ("만료", SectionIcon::Alert),
    ("위험", SectionIcon::Alert),
    ("리스크", SectionIcon::Alert),
    ("일정", SectionIcon::Calendar),
    ("기간", SectionIcon::Calendar),
    ("추세", SectionIcon::TrendingUp),
    ("분석", SectionIcon::TrendingUp),
    ("현황", SectionIcon::TrendingUp),
    ("제언", SectionIcon::Lightbulb),
    ("권고", SectionIcon::Lightbulb),
    ("개선", SectionIcon::Lightbulb),
];

impl SectionIcon {
    pub fn for_title(title: &str) -> Self {
        ICON_KEYWORDS
            .iter()
            .find(|(keyword, _)| title.contains(keyword))
            .map(|(_, icon)| *icon)
            .unwrap_or(SectionIcon::FileText)
    }

    /// Identifier used in `data-icon` attributes.
    pub fn name(&self) -> &'static str {
        match self {
            SectionIcon::Users => "users",
            SectionIcon::Building => "building",
            SectionIcon::Alert => "alert-triangle",
            SectionIcon::Calendar => "calendar",
            SectionIcon::TrendingUp => "trending-up",
            SectionIcon::Lightbulb => "lightbulb",
            SectionIcon::FileText => "file-text",
        }
    }

    /// Glyph rendered inside the icon badge.
    pub fn glyph(&self) -> &'static str {
        match self {
            SectionIcon::Users => "👥",
            SectionIcon::Building => "🏢",
            SectionIcon::Alert => "⚠️",
            SectionIcon::Calendar => "📅",
            SectionIcon::TrendingUp => "📈",
            SectionIcon::Lightbulb => "💡",
            SectionIcon::FileText => "📄",
        }
    }
}
