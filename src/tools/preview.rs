//! Preview and calculator tools
//!
//! Resolve a label snapshot into its render-ready view-model, convert units,
//! compute daily values and report format defaults.

use serde::Serialize;

use crate::label::{
    build_view_model, format_dimension, format_percent, from_pixels, nutrient_daily_value,
    parse_amount, to_pixels, DimensionUnit, FontUnit, LabelFormat, Nutrient, ResolvedLabel,
};
use crate::models::{clamp_width, LabelState};

// ============================================================================
// Parameter parsing
// ============================================================================

pub fn parse_format(format: Option<&str>) -> Result<LabelFormat, String> {
    match format.map(str::trim).filter(|f| !f.is_empty()) {
        None => Ok(LabelFormat::default()),
        Some(name) => LabelFormat::parse(name).ok_or_else(|| {
            format!("Unknown format: {} (expected vertical, horizontal or linear)", name)
        }),
    }
}

pub fn parse_dimension_unit(unit: Option<&str>) -> Result<DimensionUnit, String> {
    match unit {
        None => Ok(DimensionUnit::Px),
        Some(symbol) => DimensionUnit::parse(symbol).ok_or_else(|| format!("Unknown unit: {}", symbol)),
    }
}

pub fn parse_font_unit(unit: Option<&str>) -> Result<FontUnit, String> {
    match unit {
        None => Ok(FontUnit::Px),
        Some(symbol) => FontUnit::parse(symbol)
            .ok_or_else(|| format!("Unknown font unit: {} (expected px or pt)", symbol)),
    }
}

/// Width in `unit` to clamped px
pub fn width_to_pixels(width: Option<f64>, unit: DimensionUnit) -> Result<Option<f64>, String> {
    match width {
        None => Ok(None),
        Some(value) if !value.is_finite() || value <= 0.0 => {
            Err(format!("width must be a positive number, got {}", value))
        }
        Some(value) => Ok(Some(clamp_width(to_pixels(value, unit)))),
    }
}

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ConvertUnitsResponse {
    pub value: f64,
    pub unit: DimensionUnit,
    pub direction: String,
    pub result: f64,
    /// Pixel value shown in `unit`, e.g. "3.13in"
    pub display: String,
}

#[derive(Debug, Serialize)]
pub struct DailyValueResponse {
    pub nutrient: Nutrient,
    pub name: &'static str,
    pub amount: String,
    pub unit: &'static str,
    pub reference_amount: Option<f64>,
    pub percent: Option<f64>,
    pub display: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FormatDefaultsEntry {
    pub format: LabelFormat,
    pub width: f64,
    pub heading_font_size: f64,
    pub calories_font_size: f64,
}

#[derive(Debug, Serialize)]
pub struct FormatDefaultsResponse {
    pub formats: Vec<FormatDefaultsEntry>,
}

// ============================================================================
// Tools
// ============================================================================

/// Resolve a snapshot into a render-ready label
pub fn preview_label(
    state: &LabelState,
    format: LabelFormat,
    width: Option<f64>,
    dimension_unit: DimensionUnit,
    font_unit: FontUnit,
) -> Result<ResolvedLabel, String> {
    let width = width_to_pixels(width, dimension_unit)?;
    let config = state.config(format, width, dimension_unit, font_unit);
    Ok(build_view_model(&config))
}

/// Convert a value between pixels and another unit
pub fn convert_units(value: f64, unit: &str, direction: &str) -> Result<ConvertUnitsResponse, String> {
    if !value.is_finite() {
        return Err("value must be a finite number".to_string());
    }
    let unit = parse_dimension_unit(Some(unit))?;
    let (result, pixels) = match direction.trim().to_lowercase().as_str() {
        "to_pixels" | "to_px" => {
            let px = to_pixels(value, unit);
            (px, px)
        }
        "from_pixels" | "from_px" => (from_pixels(value, unit), value),
        other => {
            return Err(format!(
                "Unknown direction: {} (expected to_pixels or from_pixels)",
                other
            ))
        }
    };

    Ok(ConvertUnitsResponse {
        value,
        unit,
        direction: direction.trim().to_lowercase(),
        result,
        display: format_dimension(pixels, unit),
    })
}

/// Percent of daily value for one nutrient amount
pub fn daily_value(nutrient: &str, amount: &str) -> Result<DailyValueResponse, String> {
    let nutrient = Nutrient::from_key(nutrient).ok_or_else(|| format!("Unknown nutrient: {}", nutrient))?;
    let percent = nutrient_daily_value(nutrient, amount);
    if percent.is_some() && !amount.trim().is_empty() && parse_amount(amount).is_none() {
        tracing::debug!(amount, "non-numeric amount treated as zero");
    }

    Ok(DailyValueResponse {
        nutrient,
        name: nutrient.name(),
        amount: amount.to_string(),
        unit: nutrient.unit().as_str(),
        reference_amount: nutrient.reference_amount(),
        percent,
        display: percent.map(|p| format!("{}%", format_percent(p))),
    })
}

/// Canonical sizing for one format, or all of them
pub fn format_defaults(format: Option<&str>) -> Result<FormatDefaultsResponse, String> {
    let formats: Vec<LabelFormat> = match format {
        Some(name) => vec![parse_format(Some(name))?],
        None => LabelFormat::ALL.to_vec(),
    };

    Ok(FormatDefaultsResponse {
        formats: formats
            .into_iter()
            .map(|format| {
                let defaults = format.defaults();
                FormatDefaultsEntry {
                    format,
                    width: defaults.width,
                    heading_font_size: defaults.heading_font_size,
                    calories_font_size: defaults.calories_font_size,
                }
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format_is_strict() {
        assert_eq!(parse_format(None).unwrap(), LabelFormat::Vertical);
        assert_eq!(parse_format(Some("Linear")).unwrap(), LabelFormat::Linear);
        assert!(parse_format(Some("tabular")).unwrap_err().contains("Unknown format"));
    }

    #[test]
    fn test_unknown_unit_rejected() {
        assert_eq!(parse_dimension_unit(Some("furlong")).unwrap_err(), "Unknown unit: furlong");
        assert!(parse_font_unit(Some("cm")).is_err());
        assert!(convert_units(3.0, "ft", "to_pixels").is_err());
    }

    #[test]
    fn test_convert_units() {
        let out = convert_units(300.0, "in", "from_pixels").unwrap();
        assert_eq!(out.result, 3.13);
        assert_eq!(out.display, "3.13in");

        let out = convert_units(2.0, "cm", "to_pixels").unwrap();
        assert!((out.result - 75.6).abs() < 1e-9);
        assert!(convert_units(1.0, "px", "sideways").is_err());
    }

    #[test]
    fn test_daily_value_tool() {
        let out = daily_value("totalFat", "10").unwrap();
        assert_eq!(out.percent, Some(12.8));
        assert_eq!(out.display.as_deref(), Some("12.8%"));
        assert_eq!(out.unit, "g");

        let trans = daily_value("trans_fat", "2").unwrap();
        assert_eq!(trans.percent, None);
        assert_eq!(trans.reference_amount, None);

        assert_eq!(daily_value("sodium", "lots").unwrap().percent, Some(0.0));
        assert!(daily_value("caffeine", "1").is_err());
    }

    #[test]
    fn test_preview_label_width_in_units() {
        let state = LabelState::default();
        let label = preview_label(&state, LabelFormat::Vertical, Some(4.0), DimensionUnit::In, FontUnit::Pt)
            .unwrap();
        assert_eq!(label.width, 384.0);
        assert_eq!(label.display_width, 4.0);
        assert_eq!(label.display_fonts.heading, 30.0);

        let clamped = preview_label(&state, LabelFormat::Linear, Some(5000.0), DimensionUnit::Px, FontUnit::Px)
            .unwrap();
        assert_eq!(clamped.width, 1000.0);

        assert!(preview_label(&state, LabelFormat::Linear, Some(-1.0), DimensionUnit::Px, FontUnit::Px).is_err());
    }

    #[test]
    fn test_format_defaults_tool() {
        assert_eq!(format_defaults(None).unwrap().formats.len(), 3);
        let horizontal = format_defaults(Some("horizontal")).unwrap();
        assert_eq!(horizontal.formats[0].width, 800.0);
        assert_eq!(horizontal.formats[0].heading_font_size, 35.0);
    }
}
