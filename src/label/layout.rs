//! Layout templates for the three label formats
//!
//! Each template turns form data and display options into an ordered list of
//! blocks. Templates are pure and selected through [`template`].

use std::collections::BTreeMap;

use super::daily_values::{format_percent, Nutrient};
use super::format::LabelFormat;
use super::view_model::{has_value, Block, DividerWeight, NutrientRow, RowLevel, Span, TextRole};
use crate::models::{DisplayOptions, LabelText, NutritionData};

/// Placeholder shown when the product name row is enabled but empty
pub const PRODUCT_NAME_PLACEHOLDER: &str = "Product Name";

/// Template signature shared by all formats
pub type Template = fn(&LayoutInput) -> Vec<Block>;

/// Pick the template for a format
pub fn template(format: LabelFormat) -> Template {
    match format {
        LabelFormat::Vertical => vertical,
        LabelFormat::Horizontal => horizontal,
        LabelFormat::Linear => linear,
    }
}

/// Everything a template reads
pub struct LayoutInput<'a> {
    pub data: &'a NutritionData,
    pub label_text: &'a LabelText,
    pub options: DisplayOptions,
    pub daily_values: &'a BTreeMap<Nutrient, f64>,
}

/// Trimmed field, or `"0"` when blank
fn or_zero(field: &str) -> String {
    if has_value(field) {
        field.trim().to_string()
    } else {
        "0".to_string()
    }
}

impl LayoutInput<'_> {
    fn present(&self, nutrient: Nutrient) -> bool {
        has_value(self.data.amount(nutrient))
    }

    /// Displayed quantity with unit, e.g. `"10g"`
    fn amount(&self, nutrient: Nutrient) -> String {
        format!("{}{}", or_zero(self.data.amount(nutrient)), nutrient.unit().as_str())
    }

    fn percent(&self, nutrient: Nutrient) -> Option<String> {
        self.daily_values
            .get(&nutrient)
            .map(|dv| format!("{}%", format_percent(*dv)))
    }

    fn row(&self, nutrient: Nutrient, level: RowLevel) -> Block {
        let amount = self.amount(nutrient);
        let text = match nutrient {
            Nutrient::AddedSugars => format!("Includes {} Added Sugars", amount),
            _ => format!("{} {}", nutrient.name(), amount),
        };
        let daily_value = match nutrient {
            Nutrient::Protein if !self.options.show_protein_percent => None,
            _ => self.percent(nutrient),
        };
        Block::Nutrient(NutrientRow { nutrient, text, amount, daily_value, level })
    }

    fn title(&self) -> Block {
        Block::Title { text: self.label_text.title.clone() }
    }

    fn product_name(&self) -> Option<Block> {
        if !self.options.product_name {
            return None;
        }
        let text = if has_value(&self.data.product_name) {
            self.data.product_name.trim().to_string()
        } else {
            PRODUCT_NAME_PLACEHOLDER.to_string()
        };
        Some(Block::ProductName { text })
    }

    /// `"1 cup (30g)"`
    fn serving_size_detail(&self) -> String {
        let data = self.data;
        let mut parts: Vec<String> = [&data.serving_size_quantity, &data.serving_size_quantity_unit]
            .into_iter()
            .filter(|f| has_value(f))
            .map(|f| f.trim().to_string())
            .collect();
        let unit = if has_value(&data.serving_size_unit) {
            data.serving_size_unit.trim()
        } else {
            "g"
        };
        parts.push(format!("({}{})", or_zero(&data.serving_size), unit));
        parts.join(" ")
    }

    /// `"4 (usually)"`
    fn servings_detail(&self) -> String {
        let count = or_zero(&self.data.servings_per_container);
        match self.data.rounding.annotation() {
            Some(note) => format!("{} ({})", count, note),
            None => count,
        }
    }

    fn serving_blocks(&self) -> [Block; 2] {
        [
            Block::ServingSize { text: format!("Serving size: {}", self.serving_size_detail()) },
            Block::ServingsPerContainer {
                text: format!("Servings per container: {}", self.servings_detail()),
            },
        ]
    }

    fn calories(&self) -> Option<Block> {
        self.options
            .show_calories
            .then(|| Block::Calories { amount: or_zero(&self.data.calories) })
    }

    fn micronutrient_cell(&self, nutrient: Nutrient) -> String {
        let name = if self.options.compact_vitamin { nutrient.short_name() } else { nutrient.name() };
        let percent = self.percent(nutrient).unwrap_or_default();
        format!("{} {} {}", name, self.amount(nutrient), percent)
    }

    fn present_micronutrients(&self) -> Vec<Nutrient> {
        Nutrient::MICRONUTRIENTS
            .into_iter()
            .filter(|n| self.present(*n))
            .collect()
    }

    fn footnote(&self) -> Block {
        Block::Footnote {
            text: self.label_text.daily_value_footnote.clone(),
            justify: self.options.justify_foot_text,
        }
    }
}

fn divider(weight: DividerWeight) -> Block {
    Block::Divider { weight }
}

// ============================================================================
// Vertical
// ============================================================================

pub fn vertical(input: &LayoutInput) -> Vec<Block> {
    use Nutrient::*;
    use RowLevel::{Nutrient as Main, SubNutrient as Sub};

    let mut blocks = vec![input.title(), divider(DividerWeight::Thin)];
    blocks.extend(input.product_name());
    blocks.extend(input.serving_blocks());
    blocks.push(divider(DividerWeight::Bold));
    blocks.push(Block::AmountPerServing);
    blocks.extend(input.calories());
    blocks.push(divider(DividerWeight::Bold));
    blocks.push(Block::ColumnHeader);

    blocks.push(input.row(TotalFat, Main));
    blocks.push(input.row(SaturatedFat, Sub));
    blocks.push(input.row(TransFat, Sub));
    if input.options.show_unsaturated_fats {
        blocks.push(input.row(PolyunsaturatedFat, Sub));
        blocks.push(input.row(MonounsaturatedFat, Sub));
    }
    blocks.push(input.row(Cholesterol, Main));
    blocks.push(input.row(Sodium, Main));
    blocks.push(input.row(TotalCarbs, Main));
    blocks.push(input.row(DietaryFiber, Sub));
    blocks.push(input.row(TotalSugars, Sub));
    blocks.push(input.row(AddedSugars, Sub));
    if input.options.show_sugar_alcohols {
        blocks.push(input.row(SugarAlcohol, Sub));
    }
    blocks.push(input.row(Protein, Main));
    blocks.push(divider(DividerWeight::Bold));

    let micros = input.present_micronutrients();
    if !micros.is_empty() {
        if input.options.compact_vitamin {
            let cells = micros.iter().map(|n| input.micronutrient_cell(*n)).collect();
            blocks.push(Block::MicronutrientGrid { cells });
        } else {
            blocks.extend(micros.iter().map(|n| input.row(*n, RowLevel::Micronutrient)));
        }
        blocks.push(divider(DividerWeight::Bold));
    }

    blocks.push(input.footnote());
    blocks
}

// ============================================================================
// Horizontal
// ============================================================================

pub fn horizontal(input: &LayoutInput) -> Vec<Block> {
    use Nutrient::*;
    use RowLevel::{Nutrient as Main, SubNutrient as Sub};

    let unsaturated = input.options.show_unsaturated_fats;
    let sugar_alcohol = input.options.show_sugar_alcohols;

    let mut left = vec![input.title(), divider(DividerWeight::Thin)];
    left.extend(input.product_name());
    left.extend(input.serving_blocks());
    left.extend(input.calories());

    // Sodium moves to the second column when only the fat column grows
    let mut fats = vec![Block::ColumnHeader, divider(DividerWeight::Bold)];
    fats.push(input.row(TotalFat, Main));
    fats.push(input.row(SaturatedFat, Sub));
    fats.push(input.row(TransFat, Sub));
    if unsaturated {
        fats.push(input.row(PolyunsaturatedFat, Sub));
        fats.push(input.row(MonounsaturatedFat, Sub));
    }
    fats.push(input.row(Cholesterol, Main));
    if !unsaturated || sugar_alcohol {
        fats.push(input.row(Sodium, Main));
    }
    if sugar_alcohol && !unsaturated {
        fats.push(Block::Spacer);
    }
    fats.push(divider(DividerWeight::Thin));

    let mut carbs = vec![Block::ColumnHeader, divider(DividerWeight::Bold)];
    if unsaturated && !sugar_alcohol {
        carbs.push(input.row(Sodium, Main));
    }
    carbs.push(input.row(TotalCarbs, Main));
    carbs.push(input.row(DietaryFiber, Sub));
    carbs.push(input.row(TotalSugars, Sub));
    carbs.push(input.row(AddedSugars, Sub));
    if sugar_alcohol {
        carbs.push(input.row(SugarAlcohol, Sub));
    }
    carbs.push(input.row(Protein, Main));
    if unsaturated && sugar_alcohol {
        carbs.push(Block::Spacer);
    }
    carbs.push(divider(DividerWeight::Thin));

    let mut blocks = vec![Block::Columns { columns: vec![left, fats, carbs] }];

    let micros = input.present_micronutrients();
    if !micros.is_empty() {
        let cells = micros.iter().map(|n| input.micronutrient_cell(*n)).collect();
        blocks.push(Block::MicronutrientGrid { cells });
    }

    if !input.options.shorten_foot_note {
        blocks.push(input.footnote());
    }
    blocks
}

// ============================================================================
// Linear
// ============================================================================

pub fn linear(input: &LayoutInput) -> Vec<Block> {
    use Nutrient::*;

    let dv = |n: Nutrient| input.percent(n).unwrap_or_default();
    let mut spans = vec![
        Span::bold(input.label_text.title.clone()).with_role(TextRole::Heading),
        Span::plain(format!(" Servings: {}, ", input.servings_detail())),
        Span::bold(format!("Serv. Size: {},", input.serving_size_detail())),
        Span::plain(" Amount Per Serving: "),
    ];
    if input.options.show_calories {
        spans.push(
            Span::bold(format!("Calories: {}", or_zero(&input.data.calories)))
                .with_role(TextRole::Calories),
        );
        spans.push(Span::plain(", "));
    }

    spans.push(Span::bold("Total Fat:"));
    spans.push(Span::plain(format!(
        " {} ({} DV), {} {} ({} DV), ",
        input.amount(TotalFat),
        dv(TotalFat),
        SaturatedFat.short_name(),
        input.amount(SaturatedFat),
        dv(SaturatedFat),
    )));
    if input.options.show_unsaturated_fats {
        spans.push(Span::plain(format!(
            "{} {}, {} {}, ",
            PolyunsaturatedFat.short_name(),
            input.amount(PolyunsaturatedFat),
            MonounsaturatedFat.short_name(),
            input.amount(MonounsaturatedFat),
        )));
    }
    spans.push(Span::plain(format!("Trans Fat {}, ", input.amount(TransFat))));

    spans.push(Span::bold(Cholesterol.short_name()));
    spans.push(Span::plain(format!(" {} ({} DV), ", input.amount(Cholesterol), dv(Cholesterol))));
    spans.push(Span::bold(Sodium.short_name()));
    spans.push(Span::plain(format!(" {} ({} DV), ", input.amount(Sodium), dv(Sodium))));

    spans.push(Span::bold(TotalCarbs.short_name()));
    spans.push(Span::plain(format!(
        " {} ({} DV), {} {} ({} DV), Total Sugars {} (Incl. {} Added Sugars, {} DV), ",
        input.amount(TotalCarbs),
        dv(TotalCarbs),
        DietaryFiber.short_name(),
        input.amount(DietaryFiber),
        dv(DietaryFiber),
        input.amount(TotalSugars),
        input.amount(AddedSugars),
        dv(AddedSugars),
    )));
    if input.options.show_sugar_alcohols {
        spans.push(Span::plain(format!(
            "{} {}, ",
            SugarAlcohol.short_name(),
            input.amount(SugarAlcohol)
        )));
    }

    spans.push(Span::bold("Protein"));
    let mut protein = format!(" {}", input.amount(Protein));
    if input.options.show_protein_percent {
        protein.push_str(&format!(" ({})", dv(Protein)));
    }
    for nutrient in input.present_micronutrients() {
        protein.push_str(&format!(", {} ({} DV)", nutrient.short_name(), dv(nutrient)));
    }
    protein.push('.');
    spans.push(Span::plain(protein));

    vec![Block::Paragraph { spans }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::view_model::compute_daily_values;

    fn sample_data() -> NutritionData {
        NutritionData {
            product_name: "Oat Crunch".into(),
            serving_size: "55".into(),
            servings_per_container: "8".into(),
            serving_size_quantity: "2/3".into(),
            serving_size_quantity_unit: "cup".into(),
            calories: "230".into(),
            total_fat: "10".into(),
            saturated_fat: "5".into(),
            trans_fat: "0".into(),
            cholesterol: "15".into(),
            sodium: "430".into(),
            total_carbs: "37".into(),
            dietary_fiber: "4".into(),
            total_sugars: "12".into(),
            added_sugars: "10".into(),
            protein: "3".into(),
            calcium: "260".into(),
            iron: "8".into(),
            ..Default::default()
        }
    }

    fn run(format: LabelFormat, data: &NutritionData, options: DisplayOptions) -> Vec<Block> {
        let daily_values = compute_daily_values(data);
        let label_text = LabelText::default();
        let input = LayoutInput { data, label_text: &label_text, options, daily_values: &daily_values };
        template(format)(&input)
    }

    fn rows(blocks: &[Block]) -> Vec<NutrientRow> {
        let mut out = Vec::new();
        for block in blocks {
            match block {
                Block::Nutrient(row) => out.push(row.clone()),
                Block::Columns { columns } => {
                    for column in columns {
                        out.extend(rows(column));
                    }
                }
                _ => {}
            }
        }
        out
    }

    fn row(blocks: &[Block], nutrient: Nutrient) -> Option<NutrientRow> {
        rows(blocks).into_iter().find(|r| r.nutrient == nutrient)
    }

    fn paragraph(blocks: &[Block]) -> String {
        match &blocks[0] {
            Block::Paragraph { spans } => spans.iter().map(|s| s.text.as_str()).collect(),
            other => panic!("expected paragraph, got {:?}", other),
        }
    }

    #[test]
    fn test_vertical_row_order_and_values() {
        let blocks = run(LabelFormat::Vertical, &sample_data(), DisplayOptions::default());
        assert_eq!(blocks[0], Block::Title { text: "Nutrition Facts".into() });
        assert_eq!(
            blocks[2],
            Block::ServingSize { text: "Serving size: 2/3 cup (55g)".into() }
        );

        let order: Vec<Nutrient> = rows(&blocks).iter().map(|r| r.nutrient).collect();
        assert_eq!(
            order,
            vec![
                Nutrient::TotalFat,
                Nutrient::SaturatedFat,
                Nutrient::TransFat,
                Nutrient::Cholesterol,
                Nutrient::Sodium,
                Nutrient::TotalCarbs,
                Nutrient::DietaryFiber,
                Nutrient::TotalSugars,
                Nutrient::AddedSugars,
                Nutrient::Protein,
                Nutrient::Calcium,
                Nutrient::Iron,
            ]
        );

        let fat = row(&blocks, Nutrient::TotalFat).unwrap();
        assert_eq!(fat.text, "Total Fat 10g");
        assert_eq!(fat.daily_value.as_deref(), Some("12.8%"));
        assert_eq!(row(&blocks, Nutrient::SaturatedFat).unwrap().daily_value.as_deref(), Some("25%"));
        assert_eq!(row(&blocks, Nutrient::Sodium).unwrap().daily_value.as_deref(), Some("18.7%"));
    }

    #[test]
    fn test_cholesterol_shows_own_amount() {
        let blocks = run(LabelFormat::Vertical, &sample_data(), DisplayOptions::default());
        let row = row(&blocks, Nutrient::Cholesterol).unwrap();
        assert_eq!(row.text, "Cholesterol 15mg");
        assert_eq!(row.daily_value.as_deref(), Some("5%"));
    }

    #[test]
    fn test_rows_without_daily_value() {
        let blocks = run(LabelFormat::Vertical, &sample_data(), DisplayOptions::default());
        assert_eq!(row(&blocks, Nutrient::TransFat).unwrap().daily_value, None);
        assert_eq!(row(&blocks, Nutrient::TotalSugars).unwrap().daily_value, None);
        let added = row(&blocks, Nutrient::AddedSugars).unwrap();
        assert_eq!(added.text, "Includes 10g Added Sugars");
        assert_eq!(added.daily_value.as_deref(), Some("20%"));
    }

    #[test]
    fn test_protein_percent_is_opt_in() {
        let data = sample_data();
        let blocks = run(LabelFormat::Vertical, &data, DisplayOptions::default());
        assert_eq!(row(&blocks, Nutrient::Protein).unwrap().daily_value, None);

        let options = DisplayOptions { show_protein_percent: true, ..Default::default() };
        let blocks = run(LabelFormat::Vertical, &data, options);
        assert_eq!(row(&blocks, Nutrient::Protein).unwrap().daily_value.as_deref(), Some("6%"));
    }

    #[test]
    fn test_blank_fields_render_zero() {
        let blocks = run(LabelFormat::Vertical, &NutritionData::default(), DisplayOptions::default());
        assert!(blocks.contains(&Block::Calories { amount: "0".into() }));
        assert!(blocks.contains(&Block::ServingSize { text: "Serving size: (0g)".into() }));
        let sodium = row(&blocks, Nutrient::Sodium).unwrap();
        assert_eq!(sodium.text, "Sodium 0mg");
        assert_eq!(sodium.daily_value.as_deref(), Some("0%"));
        // No micronutrient section at all
        assert!(row(&blocks, Nutrient::VitaminD).is_none());
    }

    #[test]
    fn test_product_name_placeholder() {
        let options = DisplayOptions { product_name: true, ..Default::default() };
        let blocks = run(LabelFormat::Vertical, &NutritionData::default(), options);
        assert!(blocks.contains(&Block::ProductName { text: "Product Name".into() }));

        let blocks = run(LabelFormat::Vertical, &sample_data(), options);
        assert!(blocks.contains(&Block::ProductName { text: "Oat Crunch".into() }));

        let blocks = run(LabelFormat::Vertical, &sample_data(), DisplayOptions::default());
        assert!(!blocks.iter().any(|b| matches!(b, Block::ProductName { .. })));
    }

    #[test]
    fn test_servings_rounding_annotation() {
        let mut data = sample_data();
        data.rounding = crate::models::Rounding::Usually;
        let blocks = run(LabelFormat::Vertical, &data, DisplayOptions::default());
        assert!(blocks.contains(&Block::ServingsPerContainer {
            text: "Servings per container: 8 (usually)".into()
        }));
    }

    #[test]
    fn test_optional_rows() {
        let data = sample_data();
        let blocks = run(LabelFormat::Vertical, &data, DisplayOptions::default());
        assert!(row(&blocks, Nutrient::PolyunsaturatedFat).is_none());
        assert!(row(&blocks, Nutrient::SugarAlcohol).is_none());

        let options = DisplayOptions {
            show_unsaturated_fats: true,
            show_sugar_alcohols: true,
            ..Default::default()
        };
        let blocks = run(LabelFormat::Vertical, &data, options);
        let mono = row(&blocks, Nutrient::MonounsaturatedFat).unwrap();
        assert_eq!(mono.text, "Monounsaturated Fat 0g");
        assert_eq!(mono.daily_value, None);
        assert_eq!(row(&blocks, Nutrient::SugarAlcohol).unwrap().daily_value, None);
    }

    #[test]
    fn test_compact_vitamins() {
        let options = DisplayOptions { compact_vitamin: true, ..Default::default() };
        let blocks = run(LabelFormat::Vertical, &sample_data(), options);
        assert!(blocks.contains(&Block::MicronutrientGrid {
            cells: vec!["Calc. 260mg 20%".into(), "Iron 8mg 44.4%".into()],
        }));
        assert!(row(&blocks, Nutrient::Calcium).is_none());
    }

    fn column(blocks: &[Block], index: usize) -> Vec<Block> {
        match &blocks[0] {
            Block::Columns { columns } => columns[index].clone(),
            other => panic!("expected columns, got {:?}", other),
        }
    }

    #[test]
    fn test_horizontal_sodium_placement() {
        let data = sample_data();
        let in_fats = |options: DisplayOptions| {
            let blocks = run(LabelFormat::Horizontal, &data, options);
            row(&column(&blocks, 1), Nutrient::Sodium).is_some()
        };
        assert!(in_fats(DisplayOptions::default()));
        assert!(!in_fats(DisplayOptions { show_unsaturated_fats: true, ..Default::default() }));
        assert!(in_fats(DisplayOptions {
            show_unsaturated_fats: true,
            show_sugar_alcohols: true,
            ..Default::default()
        }));
    }

    #[test]
    fn test_horizontal_spacers_balance_columns() {
        let data = sample_data();
        let options = DisplayOptions { show_sugar_alcohols: true, ..Default::default() };
        let blocks = run(LabelFormat::Horizontal, &data, options);
        assert!(column(&blocks, 1).contains(&Block::Spacer));
        assert!(!column(&blocks, 2).contains(&Block::Spacer));

        let options = DisplayOptions {
            show_unsaturated_fats: true,
            show_sugar_alcohols: true,
            ..Default::default()
        };
        let blocks = run(LabelFormat::Horizontal, &data, options);
        assert!(column(&blocks, 2).contains(&Block::Spacer));
    }

    #[test]
    fn test_horizontal_footnote_and_grid() {
        let data = sample_data();
        let blocks = run(LabelFormat::Horizontal, &data, DisplayOptions::default());
        assert!(matches!(blocks.last(), Some(Block::Footnote { .. })));
        assert!(blocks.contains(&Block::MicronutrientGrid {
            cells: vec!["Calcium 260mg 20%".into(), "Iron 8mg 44.4%".into()],
        }));

        let options = DisplayOptions { shorten_foot_note: true, ..Default::default() };
        let blocks = run(LabelFormat::Horizontal, &data, options);
        assert!(!blocks.iter().any(|b| matches!(b, Block::Footnote { .. })));
    }

    #[test]
    fn test_linear_paragraph() {
        let text = paragraph(&run(LabelFormat::Linear, &sample_data(), DisplayOptions::default()));
        assert!(text.starts_with("Nutrition Facts Servings: 8, Serv. Size: 2/3 cup (55g),"));
        assert!(text.contains("Calories: 230, "));
        assert!(text.contains("Total Fat: 10g (12.8% DV), Sat. Fat 5g (25% DV), Trans Fat 0g, "));
        assert!(text.contains("Cholest. 15mg (5% DV), Sodium 430mg (18.7% DV), "));
        assert!(text.contains("Total Sugars 12g (Incl. 10g Added Sugars, 20% DV)"));
        assert!(text.ends_with("Protein 3g, Calc. (20% DV), Iron (44.4% DV)."));
        assert!(!text.contains("Polyunsat."));
    }

    #[test]
    fn test_linear_micronutrients_gated_individually() {
        let data = NutritionData { iron: "9".into(), ..Default::default() };
        let text = paragraph(&run(LabelFormat::Linear, &data, DisplayOptions::default()));
        assert!(text.contains("Iron (50% DV)"));
        assert!(!text.contains("Vit. D"));
        assert!(!text.contains("Potas."));
    }

    #[test]
    fn test_linear_optional_segments() {
        let options = DisplayOptions {
            show_calories: false,
            show_unsaturated_fats: true,
            show_sugar_alcohols: true,
            show_protein_percent: true,
            ..Default::default()
        };
        let text = paragraph(&run(LabelFormat::Linear, &sample_data(), options));
        assert!(!text.contains("Calories"));
        assert!(text.contains("Polyunsat. Fat 0g, Monounsat. Fat 0g, "));
        assert!(text.contains("Sugar Alc. 0g, "));
        assert!(text.contains("Protein 3g (6%)"));
    }
}
