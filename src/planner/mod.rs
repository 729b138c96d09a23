pub mod aggregator;
pub mod composer;
pub mod constants;
pub mod enumerator;
pub mod schedule;
pub mod search;

pub use aggregator::{
    Ratings, assign_impacts, assign_ratings, contains_vetoed_food, meal_impact, meal_rating,
    total_impact,
};
pub use composer::{MealComposer, compose_meal, solve_3x3};
pub use enumerator::{EnumerationReport, enumerate_meals, enumerate_meals_parallel};
pub use schedule::{DayPlan, sample_schedule};
pub use search::{
    SearchConfig, SearchLimits, SearchOutcome, SearchStats, search_meal_sets,
    search_meal_sets_parallel, search_meal_sets_with,
};
