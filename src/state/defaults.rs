use crate::models::food::{FoodCategory, NutrientProfile};
use crate::models::impact::ImpactVector;
use crate::state::tables::FoodTables;

use FoodCategory::*;

/// (name, role, [kcal, protein g, carbs g, fats g], [land, ghg, acid, eutro, water])
/// per retail unit.
type DefaultRow = (&'static str, FoodCategory, [f64; 4], [f64; 5]);

#[rustfmt::skip]
const DEFAULT_FOODS: [DefaultRow; 18] = [
    ("Tofu", ProteinSource, [765.0, 82.0, 16.85, 42.0], [3.4, 2.6, 6.0, 6.6, 32.0]),
    ("Bovine Meat (beef herd)", ProteinSource, [1500.0, 185.0, 16.2, 79.0], [170.4, 60.4, 270.9, 320.7, 441.0]),
    ("Poultry Meat", ProteinSource, [1220.0, 123.0, 12.6, 77.0], [11.0, 7.5, 64.7, 34.5, 334.0]),
    ("Eggs", ProteinSource, [1630.0, 113.0, 28.3, 121.0], [5.7, 4.2, 54.2, 21.3, 18621.0]),
    ("Wheat & Rye (Bread)", CarbSource, [2490.0, 82.0, 514.1, 12.0], [2.7, 1.3, 13.3, 5.4, 12822.0]),
    ("Maize (Meal)", CarbSource, [3630.0, 84.0, 797.1, 12.0], [1.8, 1.2, 10.2, 2.4, 350.0]),
    ("Potatoes", CarbSource, [670.0, 16.0, 149.3, 1.0], [0.8, 0.5, 3.6, 4.4, 78.0]),
    ("Rapeseed Oil", FatSource, [8096.0, 0.0, 0.0, 920.0], [9.4, 3.5, 23.2, 16.4, 14.0]),
    ("Olive Oil", FatSource, [8096.0, 0.0, 0.0, 920.0], [17.3, 5.1, 33.9, 39.1, 24396.0]),
    ("Tomatoes", Vegetable, [170.0, 8.0, 30.1, 2.0], [0.2, 0.7, 5.2, 1.9, 4481.0]),
    ("Root Vegetables", Vegetable, [380.0, 9.0, 81.6, 2.0], [0.3, 0.4, 2.9, 1.0, 38.0]),
    ("Other Vegetables", Vegetable, [220.0, 14.0, 36.6, 2.0], [0.2, 0.4, 3.7, 1.8, 2940.0]),
    ("Bananas", Fruit, [600.0, 7.0, 136.4, 3.0], [1.4, 0.8, 6.1, 2.1, 31.0]),
    ("Apples", Fruit, [480.0, 1.0, 112.4, 3.0], [0.5, 0.4, 4.0, 2.0, 1025.0]),
    ("Berries & Grapes", Fruit, [530.0, 5.0, 118.7, 4.0], [2.6, 1.4, 6.9, 1.0, 16245.0]),
    ("Beet Sugar", Extra, [3870.0, 0.0, 967.5, 0.0], [1.5, 1.8, 12.4, 4.3, 115.0]),
    ("Coffee", Extra, [560.0, 80.0, 60.0, 0.0], [11.9, 8.2, 87.2, 49.9, 341.0]),
    ("Dark Chocolate", Extra, [3930.0, 42.0, 155.1, 357.0], [53.8, 5.0, 29.0, 67.3, 220.0]),
];

/// Typical serving of each extra, in retail units.
const DEFAULT_SERVINGS: [(&str, f64); 3] = [
    ("Beet Sugar", 0.012),
    ("Coffee", 0.008),
    ("Dark Chocolate", 0.020),
];

/// Built-in dataset: 18 foods over the six roles.
pub fn default_tables() -> FoodTables {
    let mut tables = FoodTables::new();
    for (name, category, [kcal, protein, carbs, fats], impact) in DEFAULT_FOODS {
        tables.insert_food(
            name,
            category,
            Some(NutrientProfile::new(kcal, protein, carbs, fats)),
            Some(ImpactVector::from_array(impact)),
        );
    }
    for (name, serving) in DEFAULT_SERVINGS {
        tables.set_extra_serving(name, serving);
    }
    tables
}
