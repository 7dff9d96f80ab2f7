//! Label derivation
//!
//! Unit conversion, daily value math, format defaults and the layout
//! templates that turn form data into a render-ready label.

pub mod daily_values;
pub mod format;
pub mod layout;
pub mod units;
pub mod view_model;

pub use daily_values::{
    format_percent, nutrient_daily_value, parse_amount, percent_of_daily_value, MassUnit, Nutrient,
};
pub use format::{resolve_format_defaults, FormatDefaults, LabelFormat};
pub use units::{
    font_from_pixels, font_to_pixels, format_dimension, from_pixels, to_pixels, DimensionUnit,
    FontUnit, PT_PER_PX, PX_PER_PT,
};
pub use view_model::{
    build_view_model, has_value, Block, DividerWeight, LabelConfig, NutrientRow, ResolvedFonts,
    ResolvedLabel, RowLevel, Span, TextRole,
};
