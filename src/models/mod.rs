pub mod catalog;
pub mod food;
pub mod impact;
pub mod meal;
pub mod meal_set;
pub mod user;

pub use catalog::Catalog;
pub use food::{FoodCategory, FoodRecord, NutrientProfile};
pub use impact::{ImpactDimension, ImpactVector, Tolerance, approx_equal};
pub use meal::{Feasibility, Meal, ROLE_COUNT};
pub use meal_set::MealSet;
pub use user::{ActivityLevel, Gender, MealSlot, Physiology};
