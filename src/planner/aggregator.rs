use std::collections::HashMap;

use tracing::debug;

use crate::error::Result;
use crate::models::{Catalog, ImpactVector, Meal};
use crate::planner::constants::DEFAULT_RATING;
use crate::state::FoodTables;

/// Food ratings keyed by lowercase name, 0 to 5. A 0 vetoes the food.
pub type Ratings = HashMap<String, u8>;

/// Impact of a solved meal: per-unit impact of each food times its quantity, summed.
pub fn meal_impact(meal: &Meal, tables: &FoodTables) -> Result<ImpactVector> {
    let quantities = meal.require_quantities()?;
    let mut total = ImpactVector::zero();
    for (food, qty) in meal.foods().iter().zip(quantities.iter()) {
        total = total.add(&tables.impact(food)?.scale(*qty));
    }
    Ok(total)
}

/// Attach its impact to a meal.
pub fn with_impact(meal: Meal, tables: &FoodTables) -> Result<Meal> {
    let impact = meal_impact(&meal, tables)?;
    Ok(meal.with_impact(impact))
}

/// Recompute the impact of every meal in a catalog.
pub fn assign_impacts(catalog: &mut Catalog, tables: &FoodTables) -> Result<()> {
    for meal in catalog.meals_mut().iter_mut() {
        let impact = meal_impact(meal, tables)?;
        *meal = meal.clone().with_impact(impact);
    }
    Ok(())
}

fn food_rating(food: &str, ratings: &Ratings) -> u8 {
    ratings
        .get(&food.to_lowercase())
        .copied()
        .unwrap_or(DEFAULT_RATING)
}

/// Sum of the six foods' ratings. Unrated foods count as neutral.
pub fn meal_rating(meal: &Meal, ratings: &Ratings) -> i32 {
    meal.foods()
        .iter()
        .map(|f| food_rating(f, ratings) as i32)
        .sum()
}

/// Whether any of the meal's foods is rated 0.
pub fn contains_vetoed_food(meal: &Meal, ratings: &Ratings) -> bool {
    meal.foods().iter().any(|f| food_rating(f, ratings) == 0)
}

pub fn assign_ratings(catalog: &mut Catalog, ratings: &Ratings) {
    for meal in catalog.meals_mut().iter_mut() {
        let rating = meal_rating(meal, ratings);
        *meal = meal.clone().with_rating(rating);
    }
    debug!(meals = catalog.len(), rated_foods = ratings.len(), "Assigned meal ratings");
}

/// Sum of impacts over any sequence of meals.
pub fn total_impact<'a>(meals: impl IntoIterator<Item = &'a Meal>) -> ImpactVector {
    meals
        .into_iter()
        .fold(ImpactVector::zero(), |acc, m| acc.add(m.impact()))
}
