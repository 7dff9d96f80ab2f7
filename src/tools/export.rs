//! Label export tool
//!
//! Renders a saved or inline label to PNG, JPG or PDF on disk.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use super::labels::{load_label_state, parse_state};
use crate::db::Database;
use crate::label::LabelFormat;
use crate::models::{label_name, LabelState};
use crate::render::{export_label_to_file, ExportFormat};

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ExportLabelResponse {
    pub success: bool,
    pub file_path: String,
    pub format: ExportFormat,
    pub mime_type: &'static str,
    pub bytes: usize,
    pub width: f64,
    pub height: f64,
    pub message: String,
}

// ============================================================================
// Helpers
// ============================================================================

/// Lowercase ASCII slug for file names
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "label".to_string()
    } else {
        slug.to_string()
    }
}

/// `<slug>-<timestamp>.<ext>`
pub fn default_file_name(name: &str, format: ExportFormat) -> String {
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    format!("{}-{}.{}", slugify(name), stamp, format.extension())
}

/// Where to write an export. Relative paths land in `export_dir`, and a path
/// without an extension gets the format's extension.
pub fn resolve_output_path(
    export_dir: &Path,
    output_path: Option<&str>,
    name: &str,
    format: ExportFormat,
) -> PathBuf {
    let path = match output_path.map(str::trim).filter(|p| !p.is_empty()) {
        Some(p) if Path::new(p).is_absolute() => PathBuf::from(p),
        Some(p) => export_dir.join(p),
        None => export_dir.join(default_file_name(name, format)),
    };
    if path.extension().is_none() {
        path.with_extension(format.extension())
    } else {
        path
    }
}

/// Pick the label to export: a saved label by id, or an inline snapshot
pub fn resolve_source(
    db: &Database,
    label_id: Option<i64>,
    state: Option<Value>,
) -> Result<(String, LabelState), String> {
    match (label_id, state) {
        (Some(id), _) => {
            let (record, state) = load_label_state(db, id)?
                .ok_or_else(|| format!("Label not found with id: {}", id))?;
            Ok((record.name, state))
        }
        (None, Some(value)) => {
            let state = parse_state(value)?;
            Ok((label_name(&state), state))
        }
        (None, None) => Err("Either label_id or state is required".to_string()),
    }
}

// ============================================================================
// Tool
// ============================================================================

/// Render a label and write it to disk. `width` is in px.
pub fn export_label(
    export_dir: &Path,
    name: &str,
    state: &LabelState,
    format: LabelFormat,
    width: Option<f64>,
    export_format: ExportFormat,
    output_path: Option<&str>,
) -> Result<ExportLabelResponse, String> {
    let path = resolve_output_path(export_dir, output_path, name, export_format);
    let config = state.config(format, width, Default::default(), Default::default());

    let exported = export_label_to_file(&config, export_format, &path)
        .map_err(|e| format!("Export failed: {}", e))?;
    info!(
        path = %exported.path.display(),
        format = export_format.as_str(),
        bytes = exported.bytes,
        "exported label"
    );

    let file_path = exported.path.display().to_string();
    Ok(ExportLabelResponse {
        success: true,
        message: format!("Exported {} as {} to {}", name, export_format.as_str(), file_path),
        file_path,
        format: export_format,
        mime_type: export_format.mime_type(),
        bytes: exported.bytes,
        width: exported.width,
        height: exported.height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::tools::labels::save_label;
    use serde_json::json;

    fn temp_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("labeler-{}-{}", tag, std::process::id()))
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Oat & Honey Granola!"), "oat-honey-granola");
        assert_eq!(slugify("  "), "label");
        assert_eq!(slugify("Café"), "caf");
    }

    #[test]
    fn test_resolve_output_path() {
        let dir = Path::new("/tmp/exports");
        assert_eq!(
            resolve_output_path(dir, Some("front"), "x", ExportFormat::Png),
            PathBuf::from("/tmp/exports/front.png")
        );
        assert_eq!(
            resolve_output_path(dir, Some("/srv/out/label.jpeg"), "x", ExportFormat::Jpg),
            PathBuf::from("/srv/out/label.jpeg")
        );
        let generated = resolve_output_path(dir, None, "Trail Mix", ExportFormat::Pdf);
        let file = generated.file_name().unwrap().to_string_lossy().to_string();
        assert!(file.starts_with("trail-mix-"));
        assert!(file.ends_with(".pdf"));
    }

    #[test]
    fn test_resolve_source() {
        let db = Database::in_memory().unwrap();
        db.with_conn(|conn| run_migrations(conn)).unwrap();
        let state = parse_state(json!({"productName": "Crackers"})).unwrap();
        let saved = save_label(&db, &state).unwrap();

        let (name, loaded) = resolve_source(&db, Some(saved.id), None).unwrap();
        assert_eq!(name, "Crackers");
        assert_eq!(loaded, state);

        let (name, _) = resolve_source(&db, None, Some(json!({}))).unwrap();
        assert_eq!(name, "Untitled Label");

        assert!(resolve_source(&db, Some(999), None).is_err());
        assert!(resolve_source(&db, None, None).is_err());
    }

    #[test]
    fn test_export_label_pdf() {
        let dir = temp_dir("tool-export");
        let state = LabelState::default();

        let out = export_label(&dir, "Sample", &state, LabelFormat::Linear, Some(600.0), ExportFormat::Pdf, Some("sample"))
            .unwrap();
        assert!(out.success);
        assert!(out.file_path.ends_with("sample.pdf"));
        assert_eq!(out.mime_type, "application/pdf");
        assert_eq!(out.width, 600.0);
        assert!(std::fs::read(&out.file_path).unwrap().starts_with(b"%PDF"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
