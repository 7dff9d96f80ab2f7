//! Resolved label view-model
//!
//! `build_view_model` merges form data, text style, label text and display
//! options into the render-ready description consumed by the renderer. It is
//! a pure function of its input and never fails: blank or malformed fields
//! degrade to zero.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::daily_values::{nutrient_daily_value, Nutrient};
use super::format::{LabelFormat, DEFAULT_BODY_FONT_SIZE, DEFAULT_FOOTNOTE_FONT_SIZE};
use super::layout::{self, LayoutInput};
use super::units::{font_from_pixels, from_pixels, DimensionUnit, FontUnit};
use crate::models::{DisplayOptions, LabelText, NutritionData, TextStyle};

/// A field is present when it is non-blank after trimming. `"0"` is present.
pub fn has_value(field: &str) -> bool {
    !field.trim().is_empty()
}

/// Typed input of the model builder
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelConfig {
    pub nutrition: NutritionData,
    pub text_style: TextStyle,
    pub label_text: LabelText,
    pub display_options: DisplayOptions,
    pub format: LabelFormat,
    /// Label width in px; the format's default width when unset
    pub width: Option<f64>,
    pub dimension_unit: DimensionUnit,
    pub font_unit: FontUnit,
}

/// Font sizes after fallback resolution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedFonts {
    pub body: f64,
    pub heading: f64,
    pub calories: f64,
    pub footnote: f64,
}

impl ResolvedFonts {
    fn in_unit(&self, unit: FontUnit) -> Self {
        Self {
            body: font_from_pixels(self.body, unit),
            heading: font_from_pixels(self.heading, unit),
            calories: font_from_pixels(self.calories, unit),
            footnote: font_from_pixels(self.footnote, unit),
        }
    }

    pub fn size(&self, role: TextRole) -> f64 {
        match role {
            TextRole::Body => self.body,
            TextRole::Heading => self.heading,
            TextRole::Calories => self.calories,
            TextRole::Footnote => self.footnote,
        }
    }
}

/// Which font size a piece of text uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextRole {
    Body,
    Heading,
    Calories,
    Footnote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DividerWeight {
    Thin,
    Bold,
}

/// Indentation level of a nutrient row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RowLevel {
    /// Bold top-level nutrient (Total Fat, Sodium, ...)
    Nutrient,
    /// Indented breakdown (Saturated Fat, Dietary Fiber, ...)
    SubNutrient,
    /// Vitamin/mineral row
    Micronutrient,
}

/// One nutrient line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutrientRow {
    pub nutrient: Nutrient,
    /// Left cell text, e.g. `"Total Fat 10g"`
    pub text: String,
    /// Displayed quantity with unit, e.g. `"10g"`
    pub amount: String,
    /// Right cell text, e.g. `"12.8%"`; `None` leaves the cell empty
    pub daily_value: Option<String>,
    pub level: RowLevel,
}

/// Run of text inside a paragraph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Span {
    pub text: String,
    pub role: TextRole,
    pub bold: bool,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), role: TextRole::Body, bold: false }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self { text: text.into(), role: TextRole::Body, bold: true }
    }

    pub fn with_role(mut self, role: TextRole) -> Self {
        self.role = role;
        self
    }
}

/// Render-ready building block of a label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Block {
    Title { text: String },
    ProductName { text: String },
    ServingSize { text: String },
    ServingsPerContainer { text: String },
    AmountPerServing,
    Calories { amount: String },
    Divider { weight: DividerWeight },
    /// "Amount" / "% Daily Value*" header
    ColumnHeader,
    Nutrient(NutrientRow),
    /// Wrapping grid of micronutrient cells, e.g. `"Calc. 260mg 20%"`
    MicronutrientGrid { cells: Vec<String> },
    /// Empty line keeping side-by-side columns level
    Spacer,
    Columns { columns: Vec<Vec<Block>> },
    Paragraph { spans: Vec<Span> },
    Footnote { text: String, justify: bool },
}

/// Fully computed label ready to paint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLabel {
    pub format: LabelFormat,
    /// Width in px
    pub width: f64,
    pub dimension_unit: DimensionUnit,
    /// Width in `dimension_unit`, rounded for display
    pub display_width: f64,
    pub font_unit: FontUnit,
    /// Font sizes in px
    pub fonts: ResolvedFonts,
    /// Font sizes in `font_unit`, rounded for display
    pub display_fonts: ResolvedFonts,
    pub font_family: String,
    pub color: String,
    pub title: String,
    /// Percent of daily value for every nutrient with a reference amount
    pub daily_values: BTreeMap<Nutrient, f64>,
    pub blocks: Vec<Block>,
}

impl ResolvedLabel {
    /// Iterate over blocks, descending into columns
    pub fn all_blocks(&self) -> Vec<&Block> {
        fn walk<'a>(blocks: &'a [Block], out: &mut Vec<&'a Block>) {
            for block in blocks {
                out.push(block);
                if let Block::Columns { columns } = block {
                    for column in columns {
                        walk(column, out);
                    }
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.blocks, &mut out);
        out
    }

    /// Row for a nutrient, if the layout includes one
    pub fn nutrient_row(&self, nutrient: Nutrient) -> Option<&NutrientRow> {
        self.all_blocks().into_iter().find_map(|block| match block {
            Block::Nutrient(row) if row.nutrient == nutrient => Some(row),
            _ => None,
        })
    }

    /// Displayed calories, if the calories row is included
    pub fn calories(&self) -> Option<&str> {
        self.all_blocks().into_iter().find_map(|block| match block {
            Block::Calories { amount } => Some(amount.as_str()),
            Block::Paragraph { spans } => spans
                .iter()
                .find(|s| s.role == TextRole::Calories)
                .map(|s| s.text.trim_start_matches("Calories: ")),
            _ => None,
        })
    }

    pub fn footnote(&self) -> Option<(&str, bool)> {
        self.blocks.iter().find_map(|block| match block {
            Block::Footnote { text, justify } => Some((text.as_str(), *justify)),
            _ => None,
        })
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Resolve font sizes: explicit value, else format default, else constant
pub fn resolve_fonts(text_style: &TextStyle, format: LabelFormat) -> ResolvedFonts {
    let defaults = format.defaults();
    ResolvedFonts {
        body: positive(Some(text_style.font_size)).unwrap_or(DEFAULT_BODY_FONT_SIZE),
        heading: positive(text_style.heading_font_size).unwrap_or(defaults.heading_font_size),
        calories: positive(text_style.calories_font_size).unwrap_or(defaults.calories_font_size),
        footnote: positive(text_style.footnote_font_size).unwrap_or(DEFAULT_FOOTNOTE_FONT_SIZE),
    }
}

/// Percent of daily value for every nutrient that has a reference amount
pub fn compute_daily_values(data: &NutritionData) -> BTreeMap<Nutrient, f64> {
    Nutrient::ALL
        .iter()
        .filter_map(|&n| nutrient_daily_value(n, data.amount(n)).map(|dv| (n, dv)))
        .collect()
}

/// Build the resolved label for a configuration
pub fn build_view_model(config: &LabelConfig) -> ResolvedLabel {
    let fonts = resolve_fonts(&config.text_style, config.format);
    let width = positive(config.width).unwrap_or_else(|| config.format.defaults().width);
    let daily_values = compute_daily_values(&config.nutrition);

    let input = LayoutInput {
        data: &config.nutrition,
        label_text: &config.label_text,
        options: config.display_options,
        daily_values: &daily_values,
    };
    let blocks = layout::template(config.format)(&input);

    ResolvedLabel {
        format: config.format,
        width,
        dimension_unit: config.dimension_unit,
        display_width: from_pixels(width, config.dimension_unit),
        font_unit: config.font_unit,
        fonts,
        display_fonts: fonts.in_unit(config.font_unit),
        font_family: config.text_style.font_family.clone(),
        color: config.text_style.color.clone(),
        title: config.label_text.title.clone(),
        daily_values,
        blocks,
    }
}
