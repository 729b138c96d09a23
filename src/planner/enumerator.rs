use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::Result;
use crate::models::{Catalog, FoodCategory, Meal, ROLE_COUNT};
use crate::planner::aggregator::with_impact;
use crate::planner::composer::MealComposer;
use crate::state::{CategoryLists, FoodTables};

/// Result of one enumeration pass.
#[derive(Debug, Clone)]
pub struct EnumerationReport {
    pub catalog: Catalog,
    /// Role combinations tried.
    pub combinations: usize,
    /// Combinations with no non-negative solution.
    pub infeasible: usize,
}

impl EnumerationReport {
    pub fn infeasible_fraction(&self) -> f64 {
        if self.combinations == 0 {
            return 0.0;
        }
        self.infeasible as f64 / self.combinations as f64
    }
}

/// Role assignment of the `index`-th combination, protein outermost and
/// extra innermost.
fn combination_at(lists: &CategoryLists, mut index: usize) -> [String; ROLE_COUNT] {
    let mut slots = [0usize; ROLE_COUNT];
    for category in FoodCategory::ALL.iter().rev() {
        let len = lists.get(*category).len();
        slots[category.index()] = index % len;
        index /= len;
    }
    FoodCategory::ALL.map(|c| lists.get(c)[slots[c.index()]].clone())
}

fn compose_one(
    composer: &MealComposer<'_>,
    tables: &FoodTables,
    foods: [String; ROLE_COUNT],
) -> Result<Meal> {
    let meal = composer.compose(foods)?;
    if meal.is_feasible() {
        with_impact(meal, tables)
    } else {
        Ok(meal)
    }
}

fn report(meals: Vec<Meal>) -> EnumerationReport {
    let combinations = meals.len();
    let catalog = Catalog::from_meals(meals);
    let infeasible = combinations - catalog.len();
    let report = EnumerationReport {
        catalog,
        combinations,
        infeasible,
    };
    info!(
        combinations,
        feasible = report.catalog.len(),
        infeasible,
        infeasible_pct = %format!("{:.1}", 100.0 * report.infeasible_fraction()),
        "Enumerated meals"
    );
    report
}

/// Compose every role combination and keep the feasible meals.
///
/// The tables are checked for completeness first; any gap aborts before
/// the first combination. Catalog order follows the role lists.
pub fn enumerate_meals(tables: &FoodTables, target_kcal: f64) -> Result<EnumerationReport> {
    tables.ensure_complete()?;
    let composer = MealComposer::new(tables, target_kcal)?;
    let lists = tables.categories();
    let total = lists.combination_count();
    debug!(total, target_kcal, "Enumerating role combinations");

    let mut meals = Vec::with_capacity(total);
    for index in 0..total {
        meals.push(compose_one(&composer, tables, combination_at(lists, index))?);
    }
    Ok(report(meals))
}

/// Same as [`enumerate_meals`], composing combinations on the rayon pool.
/// The catalog is identical to the sequential one.
pub fn enumerate_meals_parallel(
    tables: &FoodTables,
    target_kcal: f64,
) -> Result<EnumerationReport> {
    tables.ensure_complete()?;
    let composer = MealComposer::new(tables, target_kcal)?;
    let lists = tables.categories();
    let total = lists.combination_count();
    debug!(
        total,
        target_kcal,
        threads = rayon::current_num_threads(),
        "Enumerating role combinations in parallel"
    );

    let meals = (0..total)
        .into_par_iter()
        .map(|index| compose_one(&composer, tables, combination_at(lists, index)))
        .collect::<Result<Vec<Meal>>>()?;
    Ok(report(meals))
}
