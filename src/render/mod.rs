//! Label rendering and export
//!
//! A resolved label is laid out once into a [`PaintPlan`] and then handed to
//! the raster or PDF backend.

pub mod pdf;
pub mod plan;
pub mod raster;

use std::fmt::Display;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::label::{build_view_model, LabelConfig, ResolvedLabel};

pub use plan::{estimate_width, PaintPlan, Rule, TextRun};

/// Render error types
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Drawing error: {0}")]
    Backend(String),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    pub(crate) fn backend(e: impl Display) -> Self {
        RenderError::Backend(e.to_string())
    }

    pub(crate) fn pdf(e: impl Display) -> Self {
        RenderError::Pdf(e.to_string())
    }
}

/// Result type for render operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Export file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Png,
    #[serde(alias = "jpeg")]
    Jpg,
    Pdf,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpg => "jpg",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().trim_start_matches('.').to_lowercase().as_str() {
            "png" => Some(ExportFormat::Png),
            "jpg" | "jpeg" => Some(ExportFormat::Jpg),
            "pdf" => Some(ExportFormat::Pdf),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpg => "image/jpeg",
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

fn encode(plan: &PaintPlan, title: &str, format: ExportFormat) -> RenderResult<Vec<u8>> {
    match format {
        ExportFormat::Png => raster::encode_png(plan),
        ExportFormat::Jpg => raster::encode_jpg(plan),
        ExportFormat::Pdf => pdf::render_pdf(plan, title),
    }
}

/// Encode an already resolved label
pub fn export_resolved(label: &ResolvedLabel, format: ExportFormat) -> RenderResult<Vec<u8>> {
    encode(&PaintPlan::layout(label), &label.title, format)
}

/// Resolve and encode a label
pub fn export_label(config: &LabelConfig, format: ExportFormat) -> RenderResult<Vec<u8>> {
    export_resolved(&build_view_model(config), format)
}

/// Result of writing an export to disk
#[derive(Debug, Clone, Serialize)]
pub struct ExportedFile {
    pub path: PathBuf,
    pub format: ExportFormat,
    pub bytes: usize,
    pub width: f64,
    pub height: f64,
}

/// Resolve, encode and write a label, creating parent directories
pub fn export_label_to_file(
    config: &LabelConfig,
    format: ExportFormat,
    path: &Path,
) -> RenderResult<ExportedFile> {
    let label = build_view_model(config);
    let plan = PaintPlan::layout(&label);
    let bytes = encode(&plan, &label.title, format)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, &bytes)?;

    Ok(ExportedFile {
        path: path.to_path_buf(),
        format,
        bytes: bytes.len(),
        width: plan.width,
        height: plan.height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::LabelFormat;

    #[test]
    fn test_export_format_parse() {
        assert_eq!(ExportFormat::parse("PNG"), Some(ExportFormat::Png));
        assert_eq!(ExportFormat::parse("jpeg"), Some(ExportFormat::Jpg));
        assert_eq!(ExportFormat::parse(".pdf"), Some(ExportFormat::Pdf));
        assert_eq!(ExportFormat::parse("gif"), None);
        let parsed: ExportFormat = serde_json::from_str(r#""jpeg""#).unwrap();
        assert_eq!(parsed, ExportFormat::Jpg);
    }

    #[test]
    fn test_export_pdf_to_file() {
        let dir = std::env::temp_dir().join(format!("labeler-export-{}", std::process::id()));
        let path = dir.join("nested").join("label.pdf");
        let config = LabelConfig { format: LabelFormat::Horizontal, ..Default::default() };

        let exported = export_label_to_file(&config, ExportFormat::Pdf, &path).unwrap();
        assert_eq!(exported.width, 800.0);
        assert!(exported.height > 0.0);

        let written = std::fs::read(&path).unwrap();
        assert_eq!(written.len(), exported.bytes);
        assert!(written.starts_with(b"%PDF"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_export_label_pdf_bytes() {
        let bytes = export_label(&LabelConfig::default(), ExportFormat::Pdf).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
