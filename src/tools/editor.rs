//! Editor session tool
//!
//! Applies one edit to a label session and returns the new session together
//! with its resolved label. Sessions are passed back and forth as JSON, the
//! server keeps no editor state between calls.

use serde::Serialize;
use serde_json::Value;

use super::preview::{parse_dimension_unit, parse_font_unit, parse_format};
use crate::label::{DimensionUnit, FontUnit, LabelFormat, ResolvedLabel};
use crate::models::{DisplayOption, FontSlot, LabelSession, LabelState};

/// One editor action
#[derive(Debug, Clone, PartialEq)]
pub enum LabelEdit {
    SetFormat(LabelFormat),
    Reset,
    SetWidth { value: f64, unit: DimensionUnit },
    SetFontSize { slot: FontSlot, value: f64, unit: FontUnit },
    SetFontFamily(String),
    SetColor(String),
    SetTitle(String),
    SetFootnote(String),
    SetField { key: String, value: String },
    Toggle(DisplayOption),
    SetOption { option: DisplayOption, enabled: bool },
    SetUnits { dimension_unit: DimensionUnit, font_unit: FontUnit },
}

/// Response for edit_label
#[derive(Debug, Serialize)]
pub struct EditLabelResponse {
    pub session: LabelSession,
    pub label: ResolvedLabel,
}

fn value_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn value_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn value_bool(value: Option<&Value>) -> Option<bool> {
    match value? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "on" | "yes" => Some(true),
            "false" | "off" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn required<T>(v: Option<T>, action: &str, what: &str) -> Result<T, String> {
    v.ok_or_else(|| format!("{} requires {}", action, what))
}

fn option_named(field: Option<&str>, action: &str) -> Result<DisplayOption, String> {
    let name = required(field, action, "field")?;
    DisplayOption::from_str(name).ok_or_else(|| format!("Unknown display option: {}", name))
}

impl LabelEdit {
    /// Build an edit from tool parameters
    pub fn parse(
        action: &str,
        field: Option<&str>,
        value: Option<&Value>,
        unit: Option<&str>,
    ) -> Result<Self, String> {
        let action = action.trim().to_lowercase();
        let edit = match action.as_str() {
            "set_format" => {
                let name = required(value_text(value), &action, "value")?;
                LabelEdit::SetFormat(parse_format(Some(name.as_str()))?)
            }
            "reset" => LabelEdit::Reset,
            "set_width" => LabelEdit::SetWidth {
                value: required(value_number(value), &action, "a numeric value")?,
                unit: parse_dimension_unit(unit)?,
            },
            "set_font_size" => {
                let name = required(field, &action, "field")?;
                LabelEdit::SetFontSize {
                    slot: FontSlot::from_str(name)
                        .ok_or_else(|| format!("Unknown font slot: {}", name))?,
                    value: required(value_number(value), &action, "a numeric value")?,
                    unit: parse_font_unit(unit)?,
                }
            }
            "set_font_family" => LabelEdit::SetFontFamily(required(value_text(value), &action, "value")?),
            "set_color" => LabelEdit::SetColor(required(value_text(value), &action, "value")?),
            "set_title" => LabelEdit::SetTitle(value_text(value).unwrap_or_default()),
            "set_footnote" => LabelEdit::SetFootnote(value_text(value).unwrap_or_default()),
            "set_field" => LabelEdit::SetField {
                key: required(field, &action, "field")?.to_string(),
                value: value_text(value).unwrap_or_default(),
            },
            "toggle" => LabelEdit::Toggle(option_named(field, &action)?),
            "set_option" => LabelEdit::SetOption {
                option: option_named(field, &action)?,
                enabled: required(value_bool(value), &action, "a boolean value")?,
            },
            "set_units" => {
                let dimension = value_text(value);
                LabelEdit::SetUnits {
                    dimension_unit: parse_dimension_unit(dimension.as_deref())?,
                    font_unit: parse_font_unit(unit)?,
                }
            }
            other => return Err(format!("Unknown action: {}", other)),
        };
        Ok(edit)
    }

    /// Apply to a session, returning the new session
    pub fn apply(&self, session: &LabelSession) -> Result<LabelSession, String> {
        let next = match self {
            LabelEdit::SetFormat(format) => session.with_format(*format),
            LabelEdit::Reset => session.reset(),
            LabelEdit::SetWidth { value, unit } => session.with_width(*value, *unit),
            LabelEdit::SetFontSize { slot, value, unit } => session.with_font_size(*slot, *value, *unit),
            LabelEdit::SetFontFamily(family) => session.with_font_family(family.as_str()),
            LabelEdit::SetColor(color) => session.with_color(color.as_str()),
            LabelEdit::SetTitle(title) => {
                let mut text = session.state.label_text.clone();
                text.title = title.clone();
                session.with_label_text(text)
            }
            LabelEdit::SetFootnote(footnote) => {
                let mut text = session.state.label_text.clone();
                text.daily_value_footnote = footnote.clone();
                session.with_label_text(text)
            }
            LabelEdit::SetField { key, value } => {
                let nutrition = session
                    .state
                    .nutrition
                    .with_field(key, value.as_str())
                    .ok_or_else(|| format!("Unknown field: {}", key))?;
                session.with_nutrition(nutrition)
            }
            LabelEdit::Toggle(option) => session.toggle(*option),
            LabelEdit::SetOption { option, enabled } => {
                session.with_display_options(session.state.other_styles.with(*option, *enabled))
            }
            LabelEdit::SetUnits { dimension_unit, font_unit } => {
                session.with_units(*dimension_unit, *font_unit)
            }
        };
        Ok(next)
    }
}

/// Open a session from JSON. A bare snapshot opens in `format`.
pub fn parse_session(value: Option<Value>, format: LabelFormat) -> Result<LabelSession, String> {
    let Some(value) = value else {
        return Ok(LabelSession::from_state(LabelState::default(), format));
    };
    if value.get("state").is_some() {
        return serde_json::from_value(value).map_err(|e| format!("Invalid session: {}", e));
    }
    let state: LabelState =
        serde_json::from_value(value).map_err(|e| format!("Invalid label data: {}", e))?;
    Ok(LabelSession::from_state(state, format))
}

/// Apply an edit and resolve the result
pub fn edit_label(session: &LabelSession, edit: &LabelEdit) -> Result<EditLabelResponse, String> {
    let session = edit.apply(session)?;
    let label = session.view_model();
    Ok(EditLabelResponse { session, label })
}
