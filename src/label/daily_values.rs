//! Daily value reference table and percentage calculation
//!
//! Reference amounts follow the FDA 2,000 calorie diet.

use serde::{Deserialize, Serialize};

/// A nutrient line on the label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Nutrient {
    TotalFat,
    SaturatedFat,
    TransFat,
    PolyunsaturatedFat,
    MonounsaturatedFat,
    Cholesterol,
    Sodium,
    TotalCarbs,
    DietaryFiber,
    TotalSugars,
    AddedSugars,
    SugarAlcohol,
    Protein,
    VitaminD,
    Calcium,
    Iron,
    Potassium,
}

/// Mass unit a nutrient amount is entered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MassUnit {
    G,
    Mg,
    Mcg,
}

impl MassUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            MassUnit::G => "g",
            MassUnit::Mg => "mg",
            MassUnit::Mcg => "mcg",
        }
    }
}

impl Nutrient {
    pub const ALL: [Nutrient; 17] = [
        Nutrient::TotalFat,
        Nutrient::SaturatedFat,
        Nutrient::TransFat,
        Nutrient::PolyunsaturatedFat,
        Nutrient::MonounsaturatedFat,
        Nutrient::Cholesterol,
        Nutrient::Sodium,
        Nutrient::TotalCarbs,
        Nutrient::DietaryFiber,
        Nutrient::TotalSugars,
        Nutrient::AddedSugars,
        Nutrient::SugarAlcohol,
        Nutrient::Protein,
        Nutrient::VitaminD,
        Nutrient::Calcium,
        Nutrient::Iron,
        Nutrient::Potassium,
    ];

    /// Micronutrients shown in the vitamin/mineral section
    pub const MICRONUTRIENTS: [Nutrient; 4] = [
        Nutrient::VitaminD,
        Nutrient::Calcium,
        Nutrient::Iron,
        Nutrient::Potassium,
    ];

    pub fn unit(&self) -> MassUnit {
        match self {
            Nutrient::Cholesterol
            | Nutrient::Sodium
            | Nutrient::Calcium
            | Nutrient::Iron
            | Nutrient::Potassium => MassUnit::Mg,
            Nutrient::VitaminD => MassUnit::Mcg,
            _ => MassUnit::G,
        }
    }

    /// Full label name
    pub fn name(&self) -> &'static str {
        match self {
            Nutrient::TotalFat => "Total Fat",
            Nutrient::SaturatedFat => "Saturated Fat",
            Nutrient::TransFat => "Trans Fat",
            Nutrient::PolyunsaturatedFat => "Polyunsaturated Fat",
            Nutrient::MonounsaturatedFat => "Monounsaturated Fat",
            Nutrient::Cholesterol => "Cholesterol",
            Nutrient::Sodium => "Sodium",
            Nutrient::TotalCarbs => "Total Carbohydrate",
            Nutrient::DietaryFiber => "Dietary Fiber",
            Nutrient::TotalSugars => "Total Sugars",
            Nutrient::AddedSugars => "Added Sugars",
            Nutrient::SugarAlcohol => "Sugar Alcohol",
            Nutrient::Protein => "Protein",
            Nutrient::VitaminD => "Vitamin D",
            Nutrient::Calcium => "Calcium",
            Nutrient::Iron => "Iron",
            Nutrient::Potassium => "Potassium",
        }
    }

    /// Abbreviated name used by compact and linear layouts
    pub fn short_name(&self) -> &'static str {
        match self {
            Nutrient::SaturatedFat => "Sat. Fat",
            Nutrient::PolyunsaturatedFat => "Polyunsat. Fat",
            Nutrient::MonounsaturatedFat => "Monounsat. Fat",
            Nutrient::Cholesterol => "Cholest.",
            Nutrient::TotalCarbs => "Total Carb.",
            Nutrient::DietaryFiber => "Fiber",
            Nutrient::SugarAlcohol => "Sugar Alc.",
            Nutrient::VitaminD => "Vit. D",
            Nutrient::Calcium => "Calc.",
            Nutrient::Potassium => "Potas.",
            other => other.name(),
        }
    }

    /// Field key used in the JSON snapshot
    pub fn key(&self) -> &'static str {
        match self {
            Nutrient::TotalFat => "totalFat",
            Nutrient::SaturatedFat => "saturatedFat",
            Nutrient::TransFat => "transFat",
            Nutrient::PolyunsaturatedFat => "polyunsaturatedFat",
            Nutrient::MonounsaturatedFat => "monounsaturatedFat",
            Nutrient::Cholesterol => "cholesterol",
            Nutrient::Sodium => "sodium",
            Nutrient::TotalCarbs => "totalCarbs",
            Nutrient::DietaryFiber => "dietaryFiber",
            Nutrient::TotalSugars => "totalSugars",
            Nutrient::AddedSugars => "addedSugars",
            Nutrient::SugarAlcohol => "sugarAlcohol",
            Nutrient::Protein => "protein",
            Nutrient::VitaminD => "vitaminD",
            Nutrient::Calcium => "calcium",
            Nutrient::Iron => "iron",
            Nutrient::Potassium => "potassium",
        }
    }

    /// Parse a snapshot key or snake_case name
    pub fn from_key(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != ' ')
            .collect::<String>()
            .to_lowercase();
        Nutrient::ALL
            .iter()
            .copied()
            .find(|n| n.key().to_lowercase() == normalized)
    }

    /// Daily reference amount, if the FDA defines one
    pub fn reference_amount(&self) -> Option<f64> {
        match self {
            Nutrient::TotalFat => Some(78.0),
            Nutrient::SaturatedFat => Some(20.0),
            Nutrient::Cholesterol => Some(300.0),
            Nutrient::Sodium => Some(2300.0),
            Nutrient::TotalCarbs => Some(275.0),
            Nutrient::DietaryFiber => Some(28.0),
            Nutrient::AddedSugars => Some(50.0),
            Nutrient::VitaminD => Some(20.0),
            Nutrient::Calcium => Some(1300.0),
            Nutrient::Iron => Some(18.0),
            Nutrient::Potassium => Some(4700.0),
            Nutrient::Protein => Some(50.0),
            // No DV exists for these
            Nutrient::TransFat
            | Nutrient::TotalSugars
            | Nutrient::SugarAlcohol
            | Nutrient::PolyunsaturatedFat
            | Nutrient::MonounsaturatedFat => None,
        }
    }
}

/// Parse a user-entered amount. Blank or non-numeric input is `None`.
pub fn parse_amount(amount: &str) -> Option<f64> {
    let trimmed = amount.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Percent of the daily reference, rounded to 1 decimal.
///
/// Returns 0 for blank or non-numeric amounts and for a zero reference.
pub fn percent_of_daily_value(amount: &str, reference: f64) -> f64 {
    if reference == 0.0 || !reference.is_finite() {
        return 0.0;
    }
    match parse_amount(amount) {
        Some(value) => ((value / reference) * 100.0 * 10.0).round() / 10.0,
        None => 0.0,
    }
}

/// Percent of daily value for a nutrient, `None` when no DV exists
pub fn nutrient_daily_value(nutrient: Nutrient, amount: &str) -> Option<f64> {
    nutrient
        .reference_amount()
        .map(|reference| percent_of_daily_value(amount, reference))
}

/// Display a percentage the way the label prints it (`25.0` -> `"25"`)
pub fn format_percent(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}
