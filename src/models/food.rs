use serde::{Deserialize, Serialize};

use crate::models::impact::{ImpactVector, Tolerance, approx_equal};
use crate::planner::constants::{KCAL_PER_G_CARB, KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN};

/// The six meal roles, in meal-slot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FoodCategory {
    ProteinSource,
    CarbSource,
    FatSource,
    Vegetable,
    Fruit,
    Extra,
}

impl FoodCategory {
    pub const ALL: [FoodCategory; 6] = [
        FoodCategory::ProteinSource,
        FoodCategory::CarbSource,
        FoodCategory::FatSource,
        FoodCategory::Vegetable,
        FoodCategory::Fruit,
        FoodCategory::Extra,
    ];

    /// Slot index of this role inside a meal.
    pub fn index(self) -> usize {
        match self {
            FoodCategory::ProteinSource => 0,
            FoodCategory::CarbSource => 1,
            FoodCategory::FatSource => 2,
            FoodCategory::Vegetable => 3,
            FoodCategory::Fruit => 4,
            FoodCategory::Extra => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FoodCategory::ProteinSource => "protein source",
            FoodCategory::CarbSource => "carb source",
            FoodCategory::FatSource => "fat source",
            FoodCategory::Vegetable => "vegetable",
            FoodCategory::Fruit => "fruit",
            FoodCategory::Extra => "extra",
        }
    }
}

/// Nutrients brought by one retail unit (1 kg or 1 L) of a food.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct NutrientProfile {
    pub kcal: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

impl NutrientProfile {
    pub fn new(kcal: f64, protein: f64, carbs: f64, fats: f64) -> Self {
        Self {
            kcal,
            protein,
            carbs,
            fats,
        }
    }

    /// Nutrients brought by `qty` retail units.
    #[inline]
    pub fn scaled(&self, qty: f64) -> NutrientProfile {
        NutrientProfile {
            kcal: self.kcal * qty,
            protein: self.protein * qty,
            carbs: self.carbs * qty,
            fats: self.fats * qty,
        }
    }

    /// Energy implied by the macro composition (4 / 4 / 8.8 kcal per gram).
    #[inline]
    pub fn kcal_from_macros(&self) -> f64 {
        KCAL_PER_G_PROTEIN * self.protein
            + KCAL_PER_G_CARB * self.carbs
            + KCAL_PER_G_FAT * self.fats
    }

    /// Whether the stated kcal agrees with the macro composition.
    pub fn is_consistent(&self) -> bool {
        approx_equal(self.kcal, self.kcal_from_macros(), Tolerance::KCAL)
    }

    pub fn plus(&self, other: &NutrientProfile) -> NutrientProfile {
        NutrientProfile {
            kcal: self.kcal + other.kcal,
            protein: self.protein + other.protein,
            carbs: self.carbs + other.carbs,
            fats: self.fats + other.fats,
        }
    }

    /// Basic validation: non-negative values.
    pub fn is_valid(&self) -> bool {
        self.kcal >= 0.0 && self.protein >= 0.0 && self.carbs >= 0.0 && self.fats >= 0.0
    }
}

/// One row of a food table file.
///
/// Numeric fields are optional so that a partially filled table still parses;
/// the gaps are reported by the completeness check before any enumeration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodRecord {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Category")]
    pub category: FoodCategory,

    #[serde(rename = "Kcal", default)]
    pub kcal: Option<f64>,

    #[serde(rename = "Protein", default)]
    pub protein: Option<f64>,

    #[serde(rename = "Carbs", default)]
    pub carbs: Option<f64>,

    #[serde(rename = "Fats", default)]
    pub fats: Option<f64>,

    #[serde(rename = "LandUse", default)]
    pub land_use: Option<f64>,

    #[serde(rename = "GhgEmissions", default)]
    pub ghg_emissions: Option<f64>,

    #[serde(rename = "AcidifyingEmissions", default)]
    pub acidifying_emissions: Option<f64>,

    #[serde(rename = "EutrophyingEmissions", default)]
    pub eutrophying_emissions: Option<f64>,

    #[serde(rename = "WaterUse", default)]
    pub water_use: Option<f64>,

    /// Typical serving size in retail units; only meaningful for extras.
    #[serde(rename = "Serving", default, skip_serializing_if = "Option::is_none")]
    pub serving: Option<f64>,
}

impl FoodRecord {
    /// Nutrient profile, if all four values are present.
    pub fn nutrients(&self) -> Option<NutrientProfile> {
        Some(NutrientProfile::new(
            self.kcal?,
            self.protein?,
            self.carbs?,
            self.fats?,
        ))
    }

    /// Per-unit impact, if all five values are present.
    pub fn impact(&self) -> Option<ImpactVector> {
        Some(ImpactVector::new(
            self.land_use?,
            self.ghg_emissions?,
            self.acidifying_emissions?,
            self.eutrophying_emissions?,
            self.water_use?,
        ))
    }

    /// Canonical key for lookups (lowercase name).
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bread() -> NutrientProfile {
        NutrientProfile::new(2490.0, 82.0, 514.1, 12.0)
    }

    #[test]
    fn test_kcal_from_macros() {
        assert!((bread().kcal_from_macros() - 2490.0).abs() < 1e-9);
        assert!(bread().is_consistent());
    }

    #[test]
    fn test_inconsistent_profile() {
        let mut p = bread();
        p.kcal = 3000.0;
        assert!(!p.is_consistent());
    }

    #[test]
    fn test_scaled() {
        let half = bread().scaled(0.5);
        assert!((half.kcal - 1245.0).abs() < 1e-9);
        assert!((half.protein - 41.0).abs() < 1e-9);
    }

    #[test]
    fn test_record_with_missing_fields() {
        let json = r#"{
            "Name": "Tofu", "Category": "ProteinSource",
            "Kcal": 765, "Protein": 82, "Carbs": 16.85
        }"#;
        let record: FoodRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.category, FoodCategory::ProteinSource);
        assert!(record.nutrients().is_none());
        assert!(record.impact().is_none());
    }

    #[test]
    fn test_category_order() {
        for (i, cat) in FoodCategory::ALL.iter().enumerate() {
            assert_eq!(cat.index(), i);
        }
    }
}
