//! Label formats and their canonical sizing

use serde::{Deserialize, Serialize};

/// One of the mutually exclusive label layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LabelFormat {
    #[default]
    Vertical,
    Horizontal,
    Linear,
}

impl LabelFormat {
    pub const ALL: [LabelFormat; 3] = [
        LabelFormat::Vertical,
        LabelFormat::Horizontal,
        LabelFormat::Linear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LabelFormat::Vertical => "vertical",
            LabelFormat::Horizontal => "horizontal",
            LabelFormat::Linear => "linear",
        }
    }

    /// Parse a format name, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        let name = s.trim();
        LabelFormat::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(name))
    }

    /// Canonical sizing for this format
    pub fn defaults(&self) -> FormatDefaults {
        resolve_format_defaults(*self)
    }
}

/// Width and font sizes (px) a format snaps to on switch or reset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormatDefaults {
    pub width: f64,
    pub heading_font_size: f64,
    pub calories_font_size: f64,
}

/// Body font size used when none is set
pub const DEFAULT_BODY_FONT_SIZE: f64 = 14.0;
/// Footnote font size used when none is set
pub const DEFAULT_FOOTNOTE_FONT_SIZE: f64 = 12.0;

/// Resolve the (width, heading, calories) triple for a format
pub fn resolve_format_defaults(format: LabelFormat) -> FormatDefaults {
    let (width, heading_font_size, calories_font_size) = match format {
        LabelFormat::Vertical => (300.0, 40.0, 30.0),
        LabelFormat::Horizontal => (800.0, 35.0, 25.0),
        LabelFormat::Linear => (500.0, 30.0, 14.0),
    };
    FormatDefaults {
        width,
        heading_font_size,
        calories_font_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_table() {
        let v = resolve_format_defaults(LabelFormat::Vertical);
        assert_eq!((v.width, v.heading_font_size, v.calories_font_size), (300.0, 40.0, 30.0));

        let h = resolve_format_defaults(LabelFormat::Horizontal);
        assert_eq!((h.width, h.heading_font_size, h.calories_font_size), (800.0, 35.0, 25.0));

        let l = resolve_format_defaults(LabelFormat::Linear);
        assert_eq!((l.width, l.heading_font_size, l.calories_font_size), (500.0, 30.0, 14.0));
    }

    #[test]
    fn test_parse_is_strict() {
        assert_eq!(LabelFormat::parse(" Horizontal"), Some(LabelFormat::Horizontal));
        assert_eq!(LabelFormat::parse("linear"), Some(LabelFormat::Linear));
        assert_eq!(LabelFormat::parse("tabular"), None);
    }
}
