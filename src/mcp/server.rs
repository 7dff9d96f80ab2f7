//! Labeler MCP Server Implementation
//!
//! Implements the MCP server with all labeler tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::db::Database;
use crate::render::ExportFormat;
use crate::tools::editor::{self, LabelEdit};
use crate::tools::export;
use crate::tools::labels;
use crate::tools::preview;
use crate::tools::status::StatusTracker;

/// Labeler MCP Service
#[derive(Clone)]
pub struct LabelerService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    export_dir: PathBuf,
    tool_router: ToolRouter<LabelerService>,
}

impl LabelerService {
    pub fn new(database_path: PathBuf, database: Database, export_dir: PathBuf) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path, export_dir.clone()))),
            database,
            export_dir,
            tool_router: Self::tool_router(),
        }
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Preview Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PreviewLabelParams {
    /// Label snapshot: nutrition fields plus textStyle, labelText and otherStyles
    #[serde(default)]
    pub state: Value,
    /// vertical, horizontal or linear
    pub format: Option<String>,
    /// Width in `dimension_unit`; omitted uses the format's default
    pub width: Option<f64>,
    pub dimension_unit: Option<String>,
    pub font_unit: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct EditLabelParams {
    /// Session returned by a previous edit_label call, or a bare snapshot
    pub session: Option<Value>,
    /// Format used when opening a bare snapshot
    pub format: Option<String>,
    pub action: String,
    pub field: Option<String>,
    pub value: Option<Value>,
    pub unit: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ConvertUnitsParams {
    pub value: f64,
    /// px, in, cm, mm or pt
    pub unit: String,
    #[serde(default = "default_direction")]
    pub direction: String,
}

fn default_direction() -> String { "to_pixels".to_string() }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DailyValueParams {
    /// Nutrient key, e.g. totalFat or sodium
    pub nutrient: String,
    pub amount: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FormatDefaultsParams {
    pub format: Option<String>,
}

// ============================================================================
// Saved Label Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SaveLabelParams {
    pub state: Value,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetLabelParams {
    pub id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListLabelsParams {
    #[serde(default = "default_list_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_list_limit() -> i64 { 50 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteLabelParams {
    pub id: i64,
}

// ============================================================================
// Export Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ExportLabelParams {
    /// Saved label to export
    pub label_id: Option<i64>,
    /// Inline snapshot, used when label_id is omitted
    pub state: Option<Value>,
    pub format: Option<String>,
    /// png, jpg or pdf
    #[serde(default = "default_export_format")]
    pub export_format: String,
    pub width: Option<f64>,
    pub dimension_unit: Option<String>,
    /// File path; relative paths are placed in the export directory
    pub output_path: Option<String>,
}

fn default_export_format() -> String { "png".to_string() }

// ============================================================================
// Tool Router
// ============================================================================

#[tool_router]
impl LabelerService {
    // --- Status ---

    #[tool(description = "Get the current status of the labeler service including build info, database status, and process information")]
    async fn labeler_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status(&self.database);
        json_result(&status)
    }

    #[tool(description = "Get instructions for building nutrition labels: snapshot shape, nutrient keys, daily values, formats, units and the edit workflow. Call this before building a label.")]
    fn label_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::LABEL_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(LABEL_INSTRUCTIONS)]))
    }

    // --- Preview ---

    #[tool(description = "Resolve a label snapshot into its render-ready form: fonts, width, % daily values and the ordered blocks of the chosen format")]
    fn preview_label(&self, Parameters(p): Parameters<PreviewLabelParams>) -> Result<CallToolResult, McpError> {
        let state = if p.state.is_null() {
            Default::default()
        } else {
            labels::parse_state(p.state).map_err(|e| McpError::invalid_params(e, None))?
        };
        let format = preview::parse_format(p.format.as_deref()).map_err(|e| McpError::invalid_params(e, None))?;
        let dimension_unit = preview::parse_dimension_unit(p.dimension_unit.as_deref())
            .map_err(|e| McpError::invalid_params(e, None))?;
        let font_unit = preview::parse_font_unit(p.font_unit.as_deref())
            .map_err(|e| McpError::invalid_params(e, None))?;

        let result = preview::preview_label(&state, format, p.width, dimension_unit, font_unit)
            .map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Apply one edit to a label session and return the new session with its resolved label. Actions: set_format, reset, set_width, set_font_size, set_font_family, set_color, set_title, set_footnote, set_field, toggle, set_option, set_units.")]
    fn edit_label(&self, Parameters(p): Parameters<EditLabelParams>) -> Result<CallToolResult, McpError> {
        let format = preview::parse_format(p.format.as_deref()).map_err(|e| McpError::invalid_params(e, None))?;
        let session = editor::parse_session(p.session, format).map_err(|e| McpError::invalid_params(e, None))?;
        let edit = LabelEdit::parse(&p.action, p.field.as_deref(), p.value.as_ref(), p.unit.as_deref())
            .map_err(|e| McpError::invalid_params(e, None))?;

        let result = editor::edit_label(&session, &edit).map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Convert a dimension between pixels and in, cm, mm or pt (96 px per inch). direction is to_pixels or from_pixels.")]
    fn convert_units(&self, Parameters(p): Parameters<ConvertUnitsParams>) -> Result<CallToolResult, McpError> {
        let result = preview::convert_units(p.value, &p.unit, &p.direction)
            .map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Compute the % daily value for a nutrient amount")]
    fn daily_value(&self, Parameters(p): Parameters<DailyValueParams>) -> Result<CallToolResult, McpError> {
        let result = preview::daily_value(&p.nutrient, &p.amount).map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Get the default width, heading size and calories size for one label format or all of them")]
    fn format_defaults(&self, Parameters(p): Parameters<FormatDefaultsParams>) -> Result<CallToolResult, McpError> {
        let result = preview::format_defaults(p.format.as_deref()).map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    // --- Saved Labels ---

    #[tool(description = "Save a label snapshot. The label is named after its product name.")]
    fn save_label(&self, Parameters(p): Parameters<SaveLabelParams>) -> Result<CallToolResult, McpError> {
        let state = labels::parse_state(p.state).map_err(|e| McpError::invalid_params(e, None))?;
        let result = labels::save_label(&self.database, &state).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Get a saved label with its full snapshot")]
    fn get_label(&self, Parameters(p): Parameters<GetLabelParams>) -> Result<CallToolResult, McpError> {
        let result = labels::get_label(&self.database, p.id).map_err(|e| McpError::internal_error(e, None))?;
        let json = match result {
            Some(label) => serde_json::to_string_pretty(&label),
            None => Ok(format!(r#"{{"error": "Label not found", "id": {}}}"#, p.id)),
        }.map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "List saved labels, newest first, with pagination")]
    fn list_labels(&self, Parameters(p): Parameters<ListLabelsParams>) -> Result<CallToolResult, McpError> {
        let result = labels::list_labels(&self.database, p.limit, p.offset)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Delete a saved label")]
    fn delete_label(&self, Parameters(p): Parameters<DeleteLabelParams>) -> Result<CallToolResult, McpError> {
        let result = labels::delete_label(&self.database, p.id).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    // --- Export ---

    #[tool(description = "Render a saved label (label_id) or an inline snapshot (state) to a PNG, JPG or PDF file. PNG backgrounds are transparent.")]
    fn export_label(&self, Parameters(p): Parameters<ExportLabelParams>) -> Result<CallToolResult, McpError> {
        let export_format = ExportFormat::parse(&p.export_format).ok_or_else(|| {
            McpError::invalid_params(format!("Unknown export format: {} (expected png, jpg or pdf)", p.export_format), None)
        })?;
        let format = preview::parse_format(p.format.as_deref()).map_err(|e| McpError::invalid_params(e, None))?;
        let dimension_unit = preview::parse_dimension_unit(p.dimension_unit.as_deref())
            .map_err(|e| McpError::invalid_params(e, None))?;
        let width = preview::width_to_pixels(p.width, dimension_unit).map_err(|e| McpError::invalid_params(e, None))?;

        let (name, state) = export::resolve_source(&self.database, p.label_id, p.state)
            .map_err(|e| McpError::invalid_params(e, None))?;
        let result = export::export_label(
            &self.export_dir,
            &name,
            &state,
            format,
            width,
            export_format,
            p.output_path.as_deref(),
        )
        .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for LabelerService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "nutrition-labeler".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Nutrition Labeler".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Nutrition Labeler - builds FDA style nutrition facts labels. \
                 IMPORTANT: Call label_instructions before building a label. \
                 Preview: preview_label, edit_label (stateless editor session). \
                 Calculators: convert_units, daily_value, format_defaults. \
                 Saved labels: save/get/list/delete_label. \
                 Export: export_label to png, jpg or pdf."
                    .into(),
            ),
        }
    }
}
