//! PDF export
//!
//! One page sized to the label, drawn with the builtin Helvetica fonts.

use std::io::{BufWriter, Write};

use printpdf::{BuiltinFont, Color, Line, Mm, PdfDocument, Point, Rgb};

use super::plan::{PaintPlan, BASELINE};
use super::{RenderError, RenderResult};
use crate::label::{DimensionUnit, PT_PER_PX};

/// Pixels to millimetres without display rounding
fn px_to_mm(px: f64) -> f32 {
    (px / DimensionUnit::Mm.px_per_unit()) as f32
}

fn pdf_color((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(Rgb::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, None))
}

/// Render the plan as a single-page PDF document
pub fn render_pdf(plan: &PaintPlan, title: &str) -> RenderResult<Vec<u8>> {
    let page_width = px_to_mm(plan.width);
    let page_height = px_to_mm(plan.height);
    let (doc, page, layer) = PdfDocument::new(title, Mm(page_width), Mm(page_height), "Label");

    let font = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(RenderError::pdf)?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(RenderError::pdf)?;
    let layer = doc.get_page(page).get_layer(layer);

    let color = pdf_color(plan.color);
    // PDF y grows upwards from the bottom of the page
    let flip = |y_px: f64| Mm(page_height - px_to_mm(y_px));

    layer.set_outline_color(color.clone());
    for rule in &plan.rules {
        let middle = rule.y + rule.thickness / 2.0;
        layer.set_outline_thickness((rule.thickness * PT_PER_PX) as f32);
        layer.add_line(Line {
            points: vec![
                (Point::new(Mm(px_to_mm(rule.x)), flip(middle)), false),
                (Point::new(Mm(px_to_mm(rule.x + rule.width)), flip(middle)), false),
            ],
            is_closed: false,
        });
    }

    layer.set_fill_color(color);
    for run in &plan.texts {
        let face = if run.bold { &font_bold } else { &font };
        let baseline = run.y + run.size * BASELINE;
        layer.use_text(
            run.text.as_str(),
            (run.size * PT_PER_PX) as f32,
            Mm(px_to_mm(run.x)),
            flip(baseline),
            face,
        );
    }

    let mut bytes = Vec::new();
    {
        let mut writer = BufWriter::new(&mut bytes);
        doc.save(&mut writer).map_err(RenderError::pdf)?;
        writer.flush()?;
    }
    Ok(bytes)
}
