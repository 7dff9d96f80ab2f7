//! Text style, label text and display options

use serde::{Deserialize, Serialize};

pub const DEFAULT_FONT_FAMILY: &str = "Arial, Helvetica, sans-serif";
pub const DEFAULT_TEXT_COLOR: &str = "#000000";
pub const DEFAULT_TITLE: &str = "Nutrition Facts";
pub const DEFAULT_DAILY_VALUE_FOOTNOTE: &str = "* The % Daily Value (DV) tells you how much a nutrient in a serving of food contributes to a daily diet. 2,000 calories a day is used for general nutrition advice.";

/// Font families offered by the editor
pub const FONT_FAMILIES: [&str; 7] = [
    "Arial, Helvetica, sans-serif",
    "Helvetica, Arial, sans-serif",
    "Georgia, serif",
    "Times New Roman, Times, serif",
    "Courier New, Courier, monospace",
    "Verdana, Geneva, sans-serif",
    "Tahoma, Geneva, sans-serif",
];

/// Font sizes are in pixels. Heading, calories and footnote sizes fall back
/// to per-format defaults when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextStyle {
    pub font_size: f64,
    pub font_family: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories_font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footnote_font_size: Option<f64>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            color: DEFAULT_TEXT_COLOR.to_string(),
            heading_font_size: None,
            calories_font_size: None,
            footnote_font_size: Some(12.0),
        }
    }
}

impl TextStyle {
    /// Parse `color` as `#rrggbb` or `#rgb`; anything else is black
    pub fn rgb(&self) -> (u8, u8, u8) {
        parse_hex_color(&self.color).unwrap_or((0, 0, 0))
    }
}

/// Parse a CSS hex color
pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        3 => {
            let expand = |i: usize| channel(&hex[i..i + 1].repeat(2));
            Some((expand(0)?, expand(1)?, expand(2)?))
        }
        _ => None,
    }
}

/// Editable label wording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelText {
    pub title: String,
    pub daily_value_footnote: String,
}

impl Default for LabelText {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            daily_value_footnote: DEFAULT_DAILY_VALUE_FOOTNOTE.to_string(),
        }
    }
}

/// Row inclusion toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplayOptions {
    pub product_name: bool,
    pub show_calories: bool,
    pub compact_vitamin: bool,
    pub justify_foot_text: bool,
    pub show_unsaturated_fats: bool,
    pub show_sugar_alcohols: bool,
    pub show_protein_percent: bool,
    /// Only honoured by the horizontal format
    pub shorten_foot_note: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            product_name: false,
            show_calories: true,
            compact_vitamin: false,
            justify_foot_text: false,
            show_unsaturated_fats: false,
            show_sugar_alcohols: false,
            show_protein_percent: false,
            shorten_foot_note: false,
        }
    }
}

/// Names of the display toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DisplayOption {
    ProductName,
    ShowCalories,
    CompactVitamin,
    JustifyFootText,
    ShowUnsaturatedFats,
    ShowSugarAlcohols,
    ShowProteinPercent,
    ShortenFootNote,
}

impl DisplayOption {
    pub fn from_str(s: &str) -> Option<Self> {
        let key: String = s.chars().filter(|c| *c != '_').collect::<String>().to_lowercase();
        match key.as_str() {
            "productname" => Some(DisplayOption::ProductName),
            "showcalories" => Some(DisplayOption::ShowCalories),
            "compactvitamin" => Some(DisplayOption::CompactVitamin),
            "justifyfoottext" => Some(DisplayOption::JustifyFootText),
            "showunsaturatedfats" => Some(DisplayOption::ShowUnsaturatedFats),
            "showsugaralcohols" => Some(DisplayOption::ShowSugarAlcohols),
            "showproteinpercent" => Some(DisplayOption::ShowProteinPercent),
            "shortenfootnote" => Some(DisplayOption::ShortenFootNote),
            _ => None,
        }
    }
}

impl DisplayOptions {
    pub fn get(&self, option: DisplayOption) -> bool {
        match option {
            DisplayOption::ProductName => self.product_name,
            DisplayOption::ShowCalories => self.show_calories,
            DisplayOption::CompactVitamin => self.compact_vitamin,
            DisplayOption::JustifyFootText => self.justify_foot_text,
            DisplayOption::ShowUnsaturatedFats => self.show_unsaturated_fats,
            DisplayOption::ShowSugarAlcohols => self.show_sugar_alcohols,
            DisplayOption::ShowProteinPercent => self.show_protein_percent,
            DisplayOption::ShortenFootNote => self.shorten_foot_note,
        }
    }

    /// Return a copy with one toggle set
    pub fn with(&self, option: DisplayOption, value: bool) -> Self {
        let mut next = *self;
        match option {
            DisplayOption::ProductName => next.product_name = value,
            DisplayOption::ShowCalories => next.show_calories = value,
            DisplayOption::CompactVitamin => next.compact_vitamin = value,
            DisplayOption::JustifyFootText => next.justify_foot_text = value,
            DisplayOption::ShowUnsaturatedFats => next.show_unsaturated_fats = value,
            DisplayOption::ShowSugarAlcohols => next.show_sugar_alcohols = value,
            DisplayOption::ShowProteinPercent => next.show_protein_percent = value,
            DisplayOption::ShortenFootNote => next.shorten_foot_note = value,
        }
        next
    }

    pub fn toggled(&self, option: DisplayOption) -> Self {
        self.with(option, !self.get(option))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ff8000"), Some((255, 128, 0)));
        assert_eq!(parse_hex_color("#fff"), Some((255, 255, 255)));
        assert_eq!(parse_hex_color("red"), None);
        assert_eq!(parse_hex_color("#é1"), None);
        assert_eq!(parse_hex_color("#aéaaa"), None);
        assert_eq!(TextStyle { color: "#ééé".into(), ..Default::default() }.rgb(), (0, 0, 0));
        assert_eq!(TextStyle { color: "blue".into(), ..Default::default() }.rgb(), (0, 0, 0));
    }

    #[test]
    fn test_text_style_json_shape() {
        let json = serde_json::to_value(TextStyle::default()).unwrap();
        assert_eq!(json["fontSize"], 14.0);
        assert_eq!(json["footnoteFontSize"], 12.0);
        assert!(json.get("headingFontSize").is_none());
    }

    #[test]
    fn test_display_option_toggle() {
        let options = DisplayOptions::default();
        assert!(options.show_calories);
        let hidden = options.toggled(DisplayOption::ShowCalories);
        assert!(!hidden.show_calories);
        assert!(hidden.toggled(DisplayOption::ShowCalories).show_calories);
        assert_eq!(
            DisplayOption::from_str("show_sugar_alcohols"),
            Some(DisplayOption::ShowSugarAlcohols)
        );
    }
}
