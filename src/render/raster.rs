//! Raster export (PNG, JPG)
//!
//! Paints a plan with the plotters bitmap backend and encodes it with `image`.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use plotters::prelude::*;

use super::plan::PaintPlan;
use super::{RenderError, RenderResult};

/// Map a CSS font stack onto a plotters family
fn font_family(stack: &str) -> FontFamily<'static> {
    let stack = stack.to_lowercase();
    if stack.contains("monospace") || stack.contains("courier") {
        FontFamily::Monospace
    } else if stack.contains("sans-serif") {
        FontFamily::SansSerif
    } else if stack.contains("serif") {
        FontFamily::Serif
    } else {
        FontFamily::SansSerif
    }
}

/// Largest canvas the raster backend will allocate
pub const MAX_CANVAS_PIXELS: usize = 50_000_000;

fn pixel_size(value: f64) -> u32 {
    (value.ceil() as u32).max(1)
}

/// RGB buffer length for a canvas, rejecting oversized labels
fn canvas_len(width: u32, height: u32) -> RenderResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .filter(|pixels| *pixels <= MAX_CANVAS_PIXELS)
        .map(|pixels| pixels * 3)
        .ok_or_else(|| {
            RenderError::Backend(format!(
                "Label is too large to rasterize: {}x{}px (limit {} pixels)",
                width, height, MAX_CANVAS_PIXELS
            ))
        })
}

/// Paint the plan on a white RGB canvas
pub fn render_rgb(plan: &PaintPlan) -> RenderResult<RgbImage> {
    let width = pixel_size(plan.width);
    let height = pixel_size(plan.height);
    let mut buffer = vec![0u8; canvas_len(width, height)?];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(RenderError::backend)?;

        let (r, g, b) = plan.color;
        let color = RGBColor(r, g, b);

        for rule in &plan.rules {
            let x0 = rule.x.round() as i32;
            let y0 = rule.y.round() as i32;
            let x1 = (rule.x + rule.width).round() as i32;
            let y1 = y0 + (rule.thickness.round() as i32).max(1);
            root.draw(&Rectangle::new([(x0, y0), (x1, y1)], color.filled()))
                .map_err(RenderError::backend)?;
        }

        let family = font_family(&plan.font_family);
        for run in &plan.texts {
            let weight = if run.bold { FontStyle::Bold } else { FontStyle::Normal };
            let style = (family, run.size).into_font().style(weight).color(&color);
            root.draw_text(&run.text, &style, (run.x.round() as i32, run.y.round() as i32))
                .map_err(RenderError::backend)?;
        }

        root.present().map_err(RenderError::backend)?;
    }

    RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| RenderError::Backend("Failed to create image from buffer".to_string()))
}

/// Turn the white background transparent
pub fn knock_out_background(image: &RgbImage) -> RgbaImage {
    RgbaImage::from_fn(image.width(), image.height(), |x, y| {
        let Rgb([r, g, b]) = *image.get_pixel(x, y);
        let alpha = if (r, g, b) == (255, 255, 255) { 0 } else { 255 };
        Rgba([r, g, b, alpha])
    })
}

fn encode(image: DynamicImage, format: ImageFormat) -> RenderResult<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), format)?;
    Ok(bytes)
}

/// PNG with a transparent background
pub fn encode_png(plan: &PaintPlan) -> RenderResult<Vec<u8>> {
    let rgba = knock_out_background(&render_rgb(plan)?);
    encode(DynamicImage::ImageRgba8(rgba), ImageFormat::Png)
}

/// JPG on a white background
pub fn encode_jpg(plan: &PaintPlan) -> RenderResult<Vec<u8>> {
    encode(DynamicImage::ImageRgb8(render_rgb(plan)?), ImageFormat::Jpeg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::plan::Rule;

    /// Rules only, so no system fonts are needed
    fn ruled_plan() -> PaintPlan {
        PaintPlan {
            width: 120.0,
            height: 60.0,
            color: (0, 0, 0),
            font_family: "Arial, Helvetica, sans-serif".to_string(),
            texts: Vec::new(),
            rules: vec![
                Rule { x: 8.0, y: 10.0, width: 104.0, thickness: 5.0 },
                Rule { x: 8.0, y: 30.0, width: 104.0, thickness: 0.5 },
            ],
        }
    }

    #[test]
    fn test_render_rgb_draws_rules() {
        let image = render_rgb(&ruled_plan()).unwrap();
        assert_eq!(image.dimensions(), (120, 60));
        assert_eq!(image.get_pixel(0, 0), &Rgb([255, 255, 255]));
        assert_eq!(image.get_pixel(50, 12), &Rgb([0, 0, 0]));
        assert_eq!(image.get_pixel(50, 20), &Rgb([255, 255, 255]));
    }

    #[test]
    fn test_png_is_transparent_outside_ink() {
        let bytes = encode_png(&ruled_plan()).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (120, 60));
        assert_eq!(decoded.get_pixel(0, 0)[3], 0);
        assert_eq!(decoded.get_pixel(50, 12), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_jpg_has_white_background() {
        let bytes = encode_jpg(&ruled_plan()).unwrap();
        assert_eq!(&bytes[..3], &[0xFF, 0xD8, 0xFF]);

        let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (120, 60));
        let corner = decoded.get_pixel(2, 55);
        assert!(corner.0.iter().all(|c| *c > 240));
    }

    #[test]
    fn test_oversized_canvas_is_an_error() {
        let mut plan = ruled_plan();
        plan.height = 40_000_380.0;
        assert!(matches!(render_rgb(&plan), Err(RenderError::Backend(_))));
        assert!(encode_png(&plan).is_err());
        assert!(canvas_len(u32::MAX, u32::MAX).is_err());
    }

    #[test]
    fn test_huge_footnote_font_fails_cleanly() {
        use crate::label::{build_view_model, LabelConfig};
        let mut config = LabelConfig::default();
        config.text_style.footnote_font_size = Some(1e6);
        let plan = PaintPlan::layout(&build_view_model(&config));
        assert!(encode_jpg(&plan).is_err());
    }

    #[test]
    fn test_font_family_mapping() {
        assert_eq!(font_family("Georgia, serif").as_str(), FontFamily::Serif.as_str());
        assert_eq!(font_family("Courier New, Courier, monospace").as_str(), "monospace");
        assert_eq!(font_family("Verdana, Geneva, sans-serif").as_str(), "sans-serif");
    }
}
