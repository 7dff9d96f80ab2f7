//! Paint plan
//!
//! Lays a [`ResolvedLabel`] out into positioned text runs and horizontal rules.
//! Coordinates are pixels with the origin at the top-left corner; a run's `y`
//! is the top of its glyph box. Text widths are estimated from an average
//! glyph width so the plan stays independent of any font backend.

use serde::Serialize;

use crate::label::{Block, DividerWeight, NutrientRow, ResolvedFonts, ResolvedLabel, RowLevel, Span, TextRole};
use crate::models::parse_hex_color;

/// Inner margin around the label (px)
pub const PADDING: f64 = 8.0;
/// Line height as a multiple of the font size
pub const LINE_HEIGHT: f64 = 1.25;
/// Average glyph width as a multiple of the font size
pub const GLYPH_WIDTH: f64 = 0.5;
/// Baseline offset from the top of a glyph box, as a multiple of the font size
pub const BASELINE: f64 = 0.8;

const COLUMN_GAP: f64 = 12.0;
const SUB_INDENT: f64 = 12.0;
const HAIRLINE: f64 = 0.5;
const THIN_RULE: f64 = 1.0;
const BOLD_RULE: f64 = 5.0;

/// Estimated advance width of `text` at `size`
pub fn estimate_width(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * size * GLYPH_WIDTH
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub bold: bool,
}

impl TextRun {
    pub fn right(&self) -> f64 {
        self.x + estimate_width(&self.text, self.size)
    }
}

/// Filled horizontal bar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub thickness: f64,
}

/// Backend-independent drawing instructions for one label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaintPlan {
    pub width: f64,
    pub height: f64,
    pub color: (u8, u8, u8),
    pub font_family: String,
    pub texts: Vec<TextRun>,
    pub rules: Vec<Rule>,
}

impl PaintPlan {
    pub fn layout(label: &ResolvedLabel) -> Self {
        let mut painter = Painter {
            fonts: label.fonts,
            texts: Vec::new(),
            rules: Vec::new(),
        };
        let content_width = (label.width - 2.0 * PADDING).max(1.0);
        let bottom = painter.blocks(&label.blocks, PADDING, content_width, PADDING);

        Self {
            width: label.width,
            height: (bottom + PADDING).ceil(),
            color: parse_hex_color(&label.color).unwrap_or((0, 0, 0)),
            font_family: label.font_family.clone(),
            texts: painter.texts,
            rules: painter.rules,
        }
    }

    pub fn find_text(&self, text: &str) -> Option<&TextRun> {
        self.texts.iter().find(|run| run.text == text)
    }
}

struct Word {
    text: String,
    size: f64,
    bold: bool,
    space_before: bool,
}

/// Space before each word of a line; the first word never gets one
fn gaps(line: &[&Word]) -> Vec<f64> {
    line.iter()
        .enumerate()
        .map(|(i, w)| if i > 0 && w.space_before { w.size * GLYPH_WIDTH } else { 0.0 })
        .collect()
}

fn natural_width(line: &[&Word]) -> f64 {
    line.iter()
        .zip(gaps(line))
        .map(|(w, gap)| gap + estimate_width(&w.text, w.size))
        .sum()
}

struct Painter {
    fonts: ResolvedFonts,
    texts: Vec<TextRun>,
    rules: Vec<Rule>,
}

impl Painter {
    fn text(&mut self, text: &str, x: f64, y: f64, size: f64, bold: bool) {
        if text.is_empty() {
            return;
        }
        self.texts.push(TextRun { text: text.to_string(), x, y, size, bold });
    }

    fn text_right(&mut self, text: &str, right: f64, y: f64, size: f64, bold: bool) {
        self.text(text, right - estimate_width(text, size), y, size, bold);
    }

    fn rule(&mut self, x: f64, y: f64, width: f64, thickness: f64) {
        self.rules.push(Rule { x, y, width, thickness });
    }

    fn blocks(&mut self, blocks: &[Block], x: f64, width: f64, mut y: f64) -> f64 {
        for block in blocks {
            y = self.block(block, x, width, y);
        }
        y
    }

    fn block(&mut self, block: &Block, x: f64, width: f64, y: f64) -> f64 {
        let body = self.fonts.body;
        match block {
            Block::Title { text } => {
                let size = self.fonts.heading;
                self.text(text, x, y, size, true);
                y + size * LINE_HEIGHT
            }
            Block::ProductName { text } => {
                self.text(text, x, y, body, true);
                y + body * LINE_HEIGHT
            }
            Block::ServingSize { text } | Block::ServingsPerContainer { text } => {
                self.text(text, x, y, body, false);
                y + body * LINE_HEIGHT
            }
            Block::AmountPerServing => {
                self.text("Amount Per Serving", x, y, body, true);
                y + body * LINE_HEIGHT
            }
            Block::Calories { amount } => {
                let size = self.fonts.calories;
                self.text("Calories", x, y, size, true);
                self.text_right(amount, x + width, y, size, true);
                y + size * LINE_HEIGHT
            }
            Block::Divider { weight } => {
                let thickness = match weight {
                    DividerWeight::Thin => THIN_RULE,
                    DividerWeight::Bold => BOLD_RULE,
                };
                self.rule(x, y + 1.0, width, thickness);
                y + thickness + 2.0
            }
            Block::ColumnHeader => {
                self.text("Amount", x, y, body, true);
                self.text_right("% Daily Value*", x + width, y, body, true);
                y + body * LINE_HEIGHT
            }
            Block::Nutrient(row) => self.nutrient_row(row, x, width, y),
            Block::MicronutrientGrid { cells } => self.grid(cells, x, width, y),
            Block::Spacer => y + body * LINE_HEIGHT,
            Block::Columns { columns } => self.columns(columns, x, width, y),
            Block::Paragraph { spans } => self.flow(spans, x, width, y, false),
            Block::Footnote { text, justify } => {
                let span = Span::plain(text.clone()).with_role(TextRole::Footnote);
                self.flow(&[span], x, width, y + 2.0, *justify)
            }
        }
    }

    fn nutrient_row(&mut self, row: &NutrientRow, x: f64, width: f64, y: f64) -> f64 {
        let size = self.fonts.body;
        let indent = if row.level == RowLevel::SubNutrient { SUB_INDENT } else { 0.0 };
        let left = x + indent;

        match (row.level, row.text.strip_suffix(&row.amount)) {
            (RowLevel::Nutrient, Some(name)) => {
                let name = name.trim_end();
                self.text(name, left, y, size, true);
                let amount_x = left + estimate_width(name, size) + size * GLYPH_WIDTH;
                self.text(&row.amount, amount_x, y, size, false);
            }
            (RowLevel::Nutrient, None) => self.text(&row.text, left, y, size, true),
            _ => self.text(&row.text, left, y, size, false),
        }
        if let Some(dv) = &row.daily_value {
            self.text_right(dv, x + width, y, size, true);
        }

        let bottom = y + size * LINE_HEIGHT;
        self.rule(left, bottom, width - indent, HAIRLINE);
        bottom + HAIRLINE
    }

    fn grid(&mut self, cells: &[String], x: f64, width: f64, y: f64) -> f64 {
        if cells.is_empty() {
            return y;
        }
        let size = self.fonts.body;
        let widest = cells
            .iter()
            .map(|c| estimate_width(c, size))
            .fold(0.0, f64::max);
        let per_row = (((width + COLUMN_GAP) / (widest + COLUMN_GAP)).floor() as usize).clamp(1, cells.len());
        let cell_width = width / per_row as f64;
        let line = size * LINE_HEIGHT;

        for (i, cell) in cells.iter().enumerate() {
            let col = (i % per_row) as f64;
            let row = (i / per_row) as f64;
            self.text(cell, x + col * cell_width, y + row * line, size, false);
        }
        let rows = cells.len().div_ceil(per_row) as f64;
        y + rows * line
    }

    fn columns(&mut self, columns: &[Vec<Block>], x: f64, width: f64, y: f64) -> f64 {
        let count = columns.len();
        if count == 0 {
            return y;
        }
        let available = width - COLUMN_GAP * (count - 1) as f64;
        // First column (title and servings) is narrower than the nutrient columns
        let widths: Vec<f64> = if count == 1 {
            vec![available]
        } else {
            let first = available * 0.3;
            let rest = (available - first) / (count - 1) as f64;
            std::iter::once(first).chain(std::iter::repeat(rest).take(count - 1)).collect()
        };

        let mut left = x;
        let mut bottom = y;
        for (column, column_width) in columns.iter().zip(widths) {
            bottom = bottom.max(self.blocks(column, left, column_width, y));
            left += column_width + COLUMN_GAP;
        }
        bottom
    }

    /// Word-wrap spans into lines. Justified lines (all but the last) spread
    /// their words to the full width.
    fn flow(&mut self, spans: &[Span], x: f64, width: f64, y: f64, justify: bool) -> f64 {
        let words = self.words(spans);
        if words.is_empty() {
            return y;
        }

        let mut lines: Vec<Vec<&Word>> = vec![Vec::new()];
        for word in &words {
            let mut overflow = None;
            if let Some(line) = lines.last_mut() {
                line.push(word);
                if natural_width(line) > width {
                    // Break before the last word preceded by a space
                    if let Some(pos) = line.iter().rposition(|w| w.space_before).filter(|p| *p > 0) {
                        overflow = Some(line.split_off(pos));
                    }
                }
            }
            if let Some(tail) = overflow {
                lines.push(tail);
            }
        }

        let last = lines.len() - 1;
        let mut top = y;
        for (index, line) in lines.iter().enumerate() {
            top = self.place_line(line, x, width, top, justify && index < last);
        }
        top
    }

    fn words(&self, spans: &[Span]) -> Vec<Word> {
        let mut words: Vec<Word> = Vec::new();
        let mut space = false;
        for span in spans {
            let size = self.fonts.size(span.role);
            for ch in span.text.chars() {
                if ch.is_whitespace() {
                    space = true;
                    continue;
                }
                let extend = matches!(
                    words.last(),
                    Some(word) if !space && word.size == size && word.bold == span.bold
                );
                if extend {
                    if let Some(word) = words.last_mut() {
                        word.text.push(ch);
                    }
                } else {
                    let space_before = space && !words.is_empty();
                    words.push(Word { text: ch.to_string(), size, bold: span.bold, space_before });
                }
                space = false;
            }
        }
        words
    }

    fn place_line(&mut self, line: &[&Word], x: f64, width: f64, top: f64, justify: bool) -> f64 {
        let max_size = line.iter().map(|w| w.size).fold(0.0, f64::max);
        let baseline = top + max_size * BASELINE;

        let gaps = gaps(line);
        let natural = natural_width(line);
        let breaks = gaps.iter().filter(|g| **g > 0.0).count();
        let extra = if justify && breaks > 0 && natural < width {
            (width - natural) / breaks as f64
        } else {
            0.0
        };

        let mut cursor = x;
        let mut current: Option<TextRun> = None;
        for (word, gap) in line.iter().zip(&gaps) {
            let gap = if *gap > 0.0 { gap + extra } else { 0.0 };
            let run_y = baseline - word.size * BASELINE;
            let merge = extra == 0.0
                && matches!(&current, Some(run) if run.size == word.size && run.bold == word.bold);
            match current.as_mut() {
                Some(run) if merge => {
                    if gap > 0.0 {
                        run.text.push(' ');
                    }
                    run.text.push_str(&word.text);
                }
                _ => {
                    if let Some(run) = current.replace(TextRun {
                        text: word.text.clone(),
                        x: cursor + gap,
                        y: run_y,
                        size: word.size,
                        bold: word.bold,
                    }) {
                        self.texts.push(run);
                    }
                }
            }
            cursor += gap + estimate_width(&word.text, word.size);
        }
        if let Some(run) = current {
            self.texts.push(run);
        }

        top + max_size * LINE_HEIGHT
    }
}
