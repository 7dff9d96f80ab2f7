//! Nutrition form data
//!
//! All amounts are kept as the strings the user typed. Blank or non-numeric
//! values render as zero but are never rewritten in the stored snapshot.

use serde::{Deserialize, Serialize};

use crate::label::Nutrient;

/// Rounding annotation next to servings per container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Rounding {
    #[default]
    #[serde(alias = "")]
    Default,
    Usually,
    Varied,
}

impl Rounding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rounding::Default => "default",
            Rounding::Usually => "usually",
            Rounding::Varied => "varied",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "usually" => Rounding::Usually,
            "varied" => Rounding::Varied,
            _ => Rounding::Default,
        }
    }

    /// Annotation printed after the servings count, if any
    pub fn annotation(&self) -> Option<&'static str> {
        match self {
            Rounding::Default => None,
            Rounding::Usually => Some("usually"),
            Rounding::Varied => Some("varied"),
        }
    }
}

/// Product, serving and nutrient fields of a label
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NutritionData {
    pub product_name: String,

    // Serving info
    pub serving_size: String,
    pub servings_per_container: String,
    pub rounding: Rounding,
    pub serving_size_quantity: String,
    pub serving_size_quantity_unit: String,
    pub serving_size_unit: String,

    pub calories: String,
    pub total_fat: String,
    pub saturated_fat: String,
    pub trans_fat: String,
    pub polyunsaturated_fat: String,
    pub monounsaturated_fat: String,
    pub cholesterol: String,
    pub sodium: String,
    pub total_carbs: String,
    pub dietary_fiber: String,
    pub total_sugars: String,
    pub added_sugars: String,
    pub sugar_alcohol: String,
    pub protein: String,
    pub vitamin_d: String,
    pub calcium: String,
    pub iron: String,
    pub potassium: String,
}

impl NutritionData {
    /// Raw entered amount for a nutrient
    pub fn amount(&self, nutrient: Nutrient) -> &str {
        match nutrient {
            Nutrient::TotalFat => &self.total_fat,
            Nutrient::SaturatedFat => &self.saturated_fat,
            Nutrient::TransFat => &self.trans_fat,
            Nutrient::PolyunsaturatedFat => &self.polyunsaturated_fat,
            Nutrient::MonounsaturatedFat => &self.monounsaturated_fat,
            Nutrient::Cholesterol => &self.cholesterol,
            Nutrient::Sodium => &self.sodium,
            Nutrient::TotalCarbs => &self.total_carbs,
            Nutrient::DietaryFiber => &self.dietary_fiber,
            Nutrient::TotalSugars => &self.total_sugars,
            Nutrient::AddedSugars => &self.added_sugars,
            Nutrient::SugarAlcohol => &self.sugar_alcohol,
            Nutrient::Protein => &self.protein,
            Nutrient::VitaminD => &self.vitamin_d,
            Nutrient::Calcium => &self.calcium,
            Nutrient::Iron => &self.iron,
            Nutrient::Potassium => &self.potassium,
        }
    }

    /// Return a copy with one nutrient amount replaced
    pub fn with_amount(&self, nutrient: Nutrient, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let value = value.into();
        match nutrient {
            Nutrient::TotalFat => next.total_fat = value,
            Nutrient::SaturatedFat => next.saturated_fat = value,
            Nutrient::TransFat => next.trans_fat = value,
            Nutrient::PolyunsaturatedFat => next.polyunsaturated_fat = value,
            Nutrient::MonounsaturatedFat => next.monounsaturated_fat = value,
            Nutrient::Cholesterol => next.cholesterol = value,
            Nutrient::Sodium => next.sodium = value,
            Nutrient::TotalCarbs => next.total_carbs = value,
            Nutrient::DietaryFiber => next.dietary_fiber = value,
            Nutrient::TotalSugars => next.total_sugars = value,
            Nutrient::AddedSugars => next.added_sugars = value,
            Nutrient::SugarAlcohol => next.sugar_alcohol = value,
            Nutrient::Protein => next.protein = value,
            Nutrient::VitaminD => next.vitamin_d = value,
            Nutrient::Calcium => next.calcium = value,
            Nutrient::Iron => next.iron = value,
            Nutrient::Potassium => next.potassium = value,
        }
        next
    }

    /// Return a copy with any field replaced by its snapshot key.
    /// `None` for an unknown key.
    pub fn with_field(&self, key: &str, value: impl Into<String>) -> Option<Self> {
        if let Some(nutrient) = Nutrient::from_key(key) {
            return Some(self.with_amount(nutrient, value));
        }

        let normalized: String = key
            .chars()
            .filter(|c| *c != '_')
            .collect::<String>()
            .to_lowercase();
        let value = value.into();
        let mut next = self.clone();
        match normalized.as_str() {
            "productname" => next.product_name = value,
            "servingsize" => next.serving_size = value,
            "servingspercontainer" => next.servings_per_container = value,
            "rounding" => next.rounding = Rounding::from_str(&value),
            "servingsizequantity" => next.serving_size_quantity = value,
            "servingsizequantityunit" => next.serving_size_quantity_unit = value,
            "servingsizeunit" => next.serving_size_unit = value,
            "calories" => next.calories = value,
            _ => return None,
        }
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_keys_are_camel_case() {
        let data = NutritionData {
            total_fat: "10".to_string(),
            servings_per_container: "4".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["totalFat"], "10");
        assert_eq!(json["servingsPerContainer"], "4");
        assert_eq!(json["rounding"], "default");
        assert_eq!(json["vitaminD"], "");
    }

    #[test]
    fn test_missing_keys_default_to_empty() {
        let data: NutritionData =
            serde_json::from_str(r#"{"productName": "Oats", "rounding": ""}"#).unwrap();
        assert_eq!(data.product_name, "Oats");
        assert_eq!(data.rounding, Rounding::Default);
        assert_eq!(data.sodium, "");
    }

    #[test]
    fn test_amount_preserves_raw_text() {
        let data = NutritionData::default().with_amount(Nutrient::Sodium, "n/a");
        assert_eq!(data.amount(Nutrient::Sodium), "n/a");
        assert_eq!(data.amount(Nutrient::Iron), "");
    }

    #[test]
    fn test_with_field() {
        let data = NutritionData::default();
        assert_eq!(data.with_field("servings_per_container", "4").unwrap().servings_per_container, "4");
        assert_eq!(data.with_field("totalFat", "9").unwrap().total_fat, "9");
        assert_eq!(data.with_field("rounding", "varied").unwrap().rounding, Rounding::Varied);
        assert!(data.with_field("caffeine", "80").is_none());
    }

    #[test]
    fn test_rounding_annotation() {
        assert_eq!(Rounding::from_str("Usually").annotation(), Some("usually"));
        assert_eq!(Rounding::Default.annotation(), None);
    }
}
