//! Label state and editor session
//!
//! `LabelState` is the JSON snapshot persisted with a saved label.
//! `LabelSession` wraps it with the current format, width and display units;
//! every update returns a new session and leaves the original untouched.

use serde::{Deserialize, Serialize};

use super::{DisplayOption, DisplayOptions, LabelText, NutritionData, TextStyle};
use crate::label::{
    build_view_model, font_to_pixels, to_pixels, DimensionUnit, FontUnit, LabelConfig,
    LabelFormat, ResolvedLabel,
};

/// Narrowest label width the editor allows (px)
pub const MIN_WIDTH: f64 = 200.0;
/// Widest label width the editor allows (px)
pub const MAX_WIDTH: f64 = 1000.0;

/// Full label state as persisted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelState {
    #[serde(flatten)]
    pub nutrition: NutritionData,
    pub text_style: TextStyle,
    pub label_text: LabelText,
    pub other_styles: DisplayOptions,
}

impl LabelState {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Model builder input for this state. `width` is in px; `None` uses the
    /// format's default width.
    pub fn config(
        &self,
        format: LabelFormat,
        width: Option<f64>,
        dimension_unit: DimensionUnit,
        font_unit: FontUnit,
    ) -> LabelConfig {
        LabelConfig {
            nutrition: self.nutrition.clone(),
            text_style: self.text_style.clone(),
            label_text: self.label_text.clone(),
            display_options: self.other_styles,
            format,
            width,
            dimension_unit,
            font_unit,
        }
    }
}

/// Clamp a width in px to the editor range
pub fn clamp_width(px: f64) -> f64 {
    px.clamp(MIN_WIDTH, MAX_WIDTH)
}

/// Font size slots of a text style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSlot {
    Body,
    Heading,
    Calories,
    Footnote,
}

impl FontSlot {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "body" | "font" | "fontsize" => Some(FontSlot::Body),
            "heading" | "title" => Some(FontSlot::Heading),
            "calories" => Some(FontSlot::Calories),
            "footnote" => Some(FontSlot::Footnote),
            _ => None,
        }
    }
}

/// Editor session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSession {
    pub state: LabelState,
    pub format: LabelFormat,
    /// Label width in px
    pub width: f64,
    pub dimension_unit: DimensionUnit,
    pub font_unit: FontUnit,
}

impl Default for LabelSession {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelSession {
    /// Fresh session with default state and vertical sizing
    pub fn new() -> Self {
        Self::from_state(LabelState::default(), LabelFormat::Vertical)
    }

    /// Open a saved snapshot in a format, snapping to that format's sizing
    pub fn from_state(state: LabelState, format: LabelFormat) -> Self {
        let session = Self {
            state,
            format,
            width: format.defaults().width,
            dimension_unit: DimensionUnit::Px,
            font_unit: FontUnit::Px,
        };
        session.with_format(format)
    }

    /// Switch format and apply its width/heading/calories defaults.
    ///
    /// Manual overrides of those three are discarded; the rest of the text
    /// style is kept.
    pub fn with_format(&self, format: LabelFormat) -> Self {
        let defaults = format.defaults();
        let mut next = self.clone();
        next.format = format;
        next.width = defaults.width;
        next.state.text_style.heading_font_size = Some(defaults.heading_font_size);
        next.state.text_style.calories_font_size = Some(defaults.calories_font_size);
        next
    }

    /// Restore the default text style, then the current format's sizing
    pub fn reset(&self) -> Self {
        let mut next = self.clone();
        next.state.text_style = TextStyle::default();
        next.with_format(self.format)
    }

    /// Set the width from a value in `unit`, clamped to the editor range
    pub fn with_width(&self, value: f64, unit: DimensionUnit) -> Self {
        if !value.is_finite() {
            return self.clone();
        }
        let mut next = self.clone();
        next.width = clamp_width(to_pixels(value, unit));
        next
    }

    /// Set one font size from a value in `unit`. Non-positive values are ignored.
    pub fn with_font_size(&self, slot: FontSlot, value: f64, unit: FontUnit) -> Self {
        if !value.is_finite() || value <= 0.0 {
            return self.clone();
        }
        let px = font_to_pixels(value, unit);
        let mut next = self.clone();
        let style = &mut next.state.text_style;
        match slot {
            FontSlot::Body => style.font_size = px,
            FontSlot::Heading => style.heading_font_size = Some(px),
            FontSlot::Calories => style.calories_font_size = Some(px),
            FontSlot::Footnote => style.footnote_font_size = Some(px),
        }
        next
    }

    pub fn with_font_family(&self, family: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.state.text_style.font_family = family.into();
        next
    }

    pub fn with_color(&self, color: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.state.text_style.color = color.into();
        next
    }

    pub fn with_label_text(&self, label_text: LabelText) -> Self {
        let mut next = self.clone();
        next.state.label_text = label_text;
        next
    }

    pub fn with_nutrition(&self, nutrition: NutritionData) -> Self {
        let mut next = self.clone();
        next.state.nutrition = nutrition;
        next
    }

    pub fn with_display_options(&self, options: DisplayOptions) -> Self {
        let mut next = self.clone();
        next.state.other_styles = options;
        next
    }

    pub fn toggle(&self, option: DisplayOption) -> Self {
        let options = self.state.other_styles.toggled(option);
        self.with_display_options(options)
    }

    /// Units used when reporting width and font sizes
    pub fn with_units(&self, dimension_unit: DimensionUnit, font_unit: FontUnit) -> Self {
        let mut next = self.clone();
        next.dimension_unit = dimension_unit;
        next.font_unit = font_unit;
        next
    }

    pub fn config(&self) -> LabelConfig {
        self.state
            .config(self.format, Some(self.width), self.dimension_unit, self.font_unit)
    }

    pub fn view_model(&self) -> ResolvedLabel {
        build_view_model(&self.config())
    }

    /// State to persist
    pub fn snapshot(&self) -> LabelState {
        self.state.clone()
    }
}
