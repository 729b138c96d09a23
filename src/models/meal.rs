use crate::error::{EcoError, Result};
use crate::models::food::{FoodCategory, NutrientProfile};
use crate::models::impact::ImpactVector;
use crate::state::FoodTables;

/// Number of role slots in a meal.
pub const ROLE_COUNT: usize = 6;

/// Outcome of solving a meal's quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feasibility {
    /// Quantities not computed yet.
    Unsolved,
    /// All six quantities are defined and non-negative.
    Feasible,
    /// The macro targets need a negative quantity; quantities stay undefined.
    Infeasible,
}

/// Six foods in role order [protein, carb, fat, vegetable, fruit, extra],
/// with their quantities in retail units once solved.
#[derive(Debug, Clone)]
pub struct Meal {
    foods: [String; ROLE_COUNT],
    quantities: Option<[f64; ROLE_COUNT]>,
    feasibility: Feasibility,
    impact: ImpactVector,
    rating: i32,
}

impl Meal {
    /// A meal with role assignments only.
    pub fn new(foods: [String; ROLE_COUNT]) -> Self {
        Self {
            foods,
            quantities: None,
            feasibility: Feasibility::Unsolved,
            impact: ImpactVector::zero(),
            rating: 0,
        }
    }

    /// A meal with known quantities, treated as feasible.
    pub fn with_quantities(foods: [String; ROLE_COUNT], quantities: [f64; ROLE_COUNT]) -> Self {
        Self {
            foods,
            quantities: Some(quantities),
            feasibility: Feasibility::Feasible,
            impact: ImpactVector::zero(),
            rating: 0,
        }
    }

    /// Build from borrowed names.
    pub fn from_names(names: [&str; ROLE_COUNT]) -> Self {
        Self::new(names.map(str::to_string))
    }

    pub fn foods(&self) -> &[String; ROLE_COUNT] {
        &self.foods
    }

    pub fn food(&self, role: FoodCategory) -> &str {
        &self.foods[role.index()]
    }

    pub fn quantities(&self) -> Option<&[f64; ROLE_COUNT]> {
        self.quantities.as_ref()
    }

    pub fn quantity(&self, role: FoodCategory) -> Option<f64> {
        self.quantities.map(|q| q[role.index()])
    }

    pub fn feasibility(&self) -> Feasibility {
        self.feasibility
    }

    pub fn is_feasible(&self) -> bool {
        self.feasibility == Feasibility::Feasible
    }

    pub fn impact(&self) -> &ImpactVector {
        &self.impact
    }

    pub fn rating(&self) -> i32 {
        self.rating
    }

    pub(crate) fn solved(mut self, quantities: [f64; ROLE_COUNT]) -> Self {
        self.quantities = Some(quantities);
        self.feasibility = Feasibility::Feasible;
        self
    }

    pub(crate) fn infeasible(mut self) -> Self {
        self.quantities = None;
        self.feasibility = Feasibility::Infeasible;
        self
    }

    pub(crate) fn with_impact(mut self, impact: ImpactVector) -> Self {
        self.impact = impact;
        self
    }

    pub(crate) fn with_rating(mut self, rating: i32) -> Self {
        self.rating = rating;
        self
    }

    /// Quantities, or an error naming the meal when they are undefined.
    pub fn require_quantities(&self) -> Result<&[f64; ROLE_COUNT]> {
        self.quantities
            .as_ref()
            .ok_or_else(|| EcoError::UnsolvedMeal(self.label()))
    }

    /// Summed nutrients over the six roles.
    pub fn nutrient_totals(&self, tables: &FoodTables) -> Result<NutrientProfile> {
        let quantities = self.require_quantities()?;
        let mut total = NutrientProfile::default();
        for (food, qty) in self.foods.iter().zip(quantities.iter()) {
            total = total.plus(&tables.nutrient(food)?.scaled(*qty));
        }
        Ok(total)
    }

    pub fn total_kcal(&self, tables: &FoodTables) -> Result<f64> {
        Ok(self.nutrient_totals(tables)?.kcal)
    }

    /// Impact within the thresholds (`<=`) in every dimension.
    pub fn is_environment_friendly(&self, thresholds: &ImpactVector) -> bool {
        self.impact.all_le(thresholds)
    }

    /// One export line: `"<qty> g or mL of <food>"` for each role, comma-separated.
    pub fn export_line(&self) -> Result<String> {
        let quantities = self.require_quantities()?;
        let parts: Vec<String> = self
            .foods
            .iter()
            .zip(quantities.iter())
            .map(|(food, qty)| format!("{:4.0} g or mL of {}", 1000.0 * qty, food))
            .collect();
        Ok(parts.join(", "))
    }

    /// Short label listing the six foods.
    pub fn label(&self) -> String {
        self.foods.join(" / ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_meal() -> Meal {
        Meal::with_quantities(
            [
                "Poultry Meat",
                "Wheat & Rye (Bread)",
                "Olive Oil",
                "Root Vegetables",
                "Berries & Grapes",
                "Coffee",
            ]
            .map(str::to_string),
            [0.050, 0.120, 0.016, 0.125, 0.050, 0.008],
        )
    }

    #[test]
    fn test_new_meal_is_unsolved() {
        let meal = Meal::from_names(["a", "b", "c", "d", "e", "f"]);
        assert_eq!(meal.feasibility(), Feasibility::Unsolved);
        assert!(meal.quantities().is_none());
        assert!(matches!(meal.export_line(), Err(EcoError::UnsolvedMeal(_))));
    }

    #[test]
    fn test_infeasible_keeps_quantities_undefined() {
        let meal = sample_meal().infeasible();
        assert!(!meal.is_feasible());
        assert!(meal.quantity(FoodCategory::Fruit).is_none());
    }

    #[test]
    fn test_role_accessors() {
        let meal = sample_meal();
        assert_eq!(meal.food(FoodCategory::FatSource), "Olive Oil");
        assert_eq!(meal.quantity(FoodCategory::Extra), Some(0.008));
    }

    #[test]
    fn test_export_line_format() {
        let line = sample_meal().export_line().unwrap();
        assert!(line.starts_with("  50 g or mL of Poultry Meat, "));
        assert!(line.ends_with("   8 g or mL of Coffee"));
        assert_eq!(line.split(", ").count(), 6);
    }
}
