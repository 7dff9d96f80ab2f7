//! Data models
//!
//! Label form state, styling and saved label records.

mod label_record;
mod label_state;
mod nutrition;
mod style;

pub use label_record::{label_name, LabelRecord, LabelSummary, UNTITLED_LABEL};
pub use label_state::{clamp_width, FontSlot, LabelSession, LabelState, MAX_WIDTH, MIN_WIDTH};
pub use nutrition::{NutritionData, Rounding};
pub use style::{
    parse_hex_color, DisplayOption, DisplayOptions, LabelText, TextStyle, DEFAULT_DAILY_VALUE_FOOTNOTE,
    DEFAULT_FONT_FAMILY, DEFAULT_TEXT_COLOR, DEFAULT_TITLE, FONT_FAMILIES,
};
