//! Render a label snapshot file to PNG, JPG or PDF

use clap::Parser;
use std::path::PathBuf;

use labeler::label::FontUnit;
use labeler::models::LabelState;
use labeler::render::{export_label_to_file, ExportFormat};
use labeler::tools::preview::{parse_dimension_unit, parse_format, width_to_pixels};

/// render_label: export a saved label snapshot (JSON) as an image or PDF
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to the label snapshot JSON file
    #[clap(short, long)]
    pub input: PathBuf,

    /// Output file; the extension picks the format unless --export-format is given
    #[clap(short, long)]
    pub output: PathBuf,

    /// Label format: vertical, horizontal or linear
    #[clap(short, long, default_value = "vertical")]
    pub format: String,

    /// png, jpg or pdf
    #[clap(short = 'e', long)]
    pub export_format: Option<String>,

    /// Label width in --unit; defaults to the format's width
    #[clap(short, long)]
    pub width: Option<f64>,

    /// Unit of --width: px, in, cm, mm or pt
    #[clap(short, long, default_value = "px")]
    pub unit: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let format = parse_format(Some(args.format.as_str()))?;
    let unit = parse_dimension_unit(Some(args.unit.as_str()))?;

    let export_format = match &args.export_format {
        Some(name) => ExportFormat::parse(name),
        None => args
            .output
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(ExportFormat::parse),
    }
    .ok_or("Could not determine export format; pass --export-format png|jpg|pdf")?;

    let json = std::fs::read_to_string(&args.input)
        .map_err(|e| format!("Failed to read {}: {}", args.input.display(), e))?;
    let state = LabelState::from_json(&json)?;

    let width = width_to_pixels(args.width, unit)?;
    let config = state.config(format, width, unit, FontUnit::Px);

    let exported = export_label_to_file(&config, export_format, &args.output)?;
    println!(
        "Wrote {} ({} bytes, {}x{}px)",
        exported.path.display(),
        exported.bytes,
        exported.width.round(),
        exported.height.round()
    );

    Ok(())
}
