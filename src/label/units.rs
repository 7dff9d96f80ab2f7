//! Unit types and conversion constants
//!
//! Label dimensions and font sizes are stored in pixels. These helpers convert
//! between pixels and the physical/typographic units shown to the user.

use serde::{Deserialize, Serialize};

// ============================================================================
// Conversion Constants (pixels per unit)
// ============================================================================

/// Pixels per inch (CSS reference pixel)
pub const PX_PER_IN: f64 = 96.0;
/// Pixels per centimeter
pub const PX_PER_CM: f64 = 37.8;
/// Pixels per millimeter
pub const PX_PER_MM: f64 = 3.78;
/// Points per pixel
pub const PT_PER_PX: f64 = 0.75;
/// Pixels per point
pub const PX_PER_PT: f64 = 1.0 / PT_PER_PX;

/// Unit for box dimensions (label width/height)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DimensionUnit {
    #[default]
    Px,
    In,
    Cm,
    Mm,
    Pt,
}

impl DimensionUnit {
    pub const ALL: [DimensionUnit; 5] = [
        DimensionUnit::Px,
        DimensionUnit::In,
        DimensionUnit::Cm,
        DimensionUnit::Mm,
        DimensionUnit::Pt,
    ];

    /// Pixels represented by one of this unit
    pub fn px_per_unit(&self) -> f64 {
        match self {
            DimensionUnit::Px => 1.0,
            DimensionUnit::In => PX_PER_IN,
            DimensionUnit::Cm => PX_PER_CM,
            DimensionUnit::Mm => PX_PER_MM,
            DimensionUnit::Pt => PX_PER_PT,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DimensionUnit::Px => "px",
            DimensionUnit::In => "in",
            DimensionUnit::Cm => "cm",
            DimensionUnit::Mm => "mm",
            DimensionUnit::Pt => "pt",
        }
    }

    /// Parse a unit symbol. Unknown symbols are rejected.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "px" | "pixel" | "pixels" => Some(DimensionUnit::Px),
            "in" | "inch" | "inches" => Some(DimensionUnit::In),
            "cm" | "centimeter" | "centimeters" => Some(DimensionUnit::Cm),
            "mm" | "millimeter" | "millimeters" => Some(DimensionUnit::Mm),
            "pt" | "point" | "points" => Some(DimensionUnit::Pt),
            _ => None,
        }
    }
}

/// Unit for font sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontUnit {
    #[default]
    Px,
    Pt,
}

impl FontUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            FontUnit::Px => "px",
            FontUnit::Pt => "pt",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match DimensionUnit::parse(s)? {
            DimensionUnit::Px => Some(FontUnit::Px),
            DimensionUnit::Pt => Some(FontUnit::Pt),
            _ => None,
        }
    }
}

impl From<FontUnit> for DimensionUnit {
    fn from(unit: FontUnit) -> Self {
        match unit {
            FontUnit::Px => DimensionUnit::Px,
            FontUnit::Pt => DimensionUnit::Pt,
        }
    }
}

/// Round to 2 decimal places for display
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Convert a value in `unit` to pixels. Full precision is kept.
pub fn to_pixels(value: f64, unit: DimensionUnit) -> f64 {
    value * unit.px_per_unit()
}

/// Convert a pixel value to `unit`, rounded to 2 decimals for display.
pub fn from_pixels(value: f64, unit: DimensionUnit) -> f64 {
    round2(value / unit.px_per_unit())
}

/// Font size in `unit` to pixels
pub fn font_to_pixels(value: f64, unit: FontUnit) -> f64 {
    to_pixels(value, unit.into())
}

/// Font size in pixels to `unit`, rounded for display
pub fn font_from_pixels(value: f64, unit: FontUnit) -> f64 {
    from_pixels(value, unit.into())
}

/// Format a pixel value in `unit` with its symbol, e.g. `"3.13in"`
pub fn format_dimension(value_px: f64, unit: DimensionUnit) -> String {
    format!("{}{}", from_pixels(value_px, unit), unit.as_str())
}
