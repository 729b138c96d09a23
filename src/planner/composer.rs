use tracing::warn;

use crate::error::{EcoError, Result};
use crate::models::food::{FoodCategory, NutrientProfile};
use crate::models::impact::{Tolerance, approx_equal};
use crate::models::meal::{Meal, ROLE_COUNT};
use crate::planner::constants::*;
use crate::state::FoodTables;

/// Solve `a · x = b` by Gaussian elimination with partial pivoting.
///
/// Returns `None` when a pivot is at or below `SINGULAR_PIVOT_EPS` times the
/// largest coefficient magnitude.
pub fn solve_3x3(a: [[f64; 3]; 3], b: [f64; 3]) -> Option<[f64; 3]> {
    let scale = a
        .iter()
        .flat_map(|row| row.iter())
        .fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if scale == 0.0 || !scale.is_finite() {
        return None;
    }

    let mut m = [[0.0; 4]; 3];
    for i in 0..3 {
        m[i][..3].copy_from_slice(&a[i]);
        m[i][3] = b[i];
    }

    for col in 0..3 {
        let pivot_row = (col..3).max_by(|&i, &j| m[i][col].abs().total_cmp(&m[j][col].abs()))?;
        if m[pivot_row][col].abs() <= SINGULAR_PIVOT_EPS * scale {
            return None;
        }
        m.swap(col, pivot_row);

        for row in col + 1..3 {
            let factor = m[row][col] / m[col][col];
            for k in col..4 {
                m[row][k] -= factor * m[col][k];
            }
        }
    }

    let mut x = [0.0; 3];
    for i in (0..3).rev() {
        let tail: f64 = (i + 1..3).map(|k| m[i][k] * x[k]).sum();
        x[i] = (m[i][3] - tail) / m[i][i];
    }

    x.iter().all(|v| v.is_finite()).then_some(x)
}

/// Solves the three free quantities of a meal for a kcal target.
///
/// Vegetable and fruit quantities are fixed; the extra uses its serving size.
/// Protein, carb and fat quantities are chosen so that 15% / 55% / 30% of the
/// target comes from each macro.
#[derive(Debug, Clone, Copy)]
pub struct MealComposer<'a> {
    tables: &'a FoodTables,
    target_kcal: f64,
}

impl<'a> MealComposer<'a> {
    pub fn new(tables: &'a FoodTables, target_kcal: f64) -> Result<Self> {
        if !(target_kcal > 0.0 && target_kcal.is_finite()) {
            return Err(EcoError::InvalidInput(format!(
                "kcal target must be positive, got {}",
                target_kcal
            )));
        }
        Ok(Self {
            tables,
            target_kcal,
        })
    }

    pub fn target_kcal(&self) -> f64 {
        self.target_kcal
    }

    /// Build and solve a meal.
    ///
    /// A negative free quantity yields an infeasible meal; a singular
    /// system is an error.
    pub fn compose(&self, foods: [String; ROLE_COUNT]) -> Result<Meal> {
        let meal = Meal::new(foods);
        let foods = meal.foods();

        let fixed = [
            (FoodCategory::Vegetable, VEGETABLE_QTY),
            (FoodCategory::Fruit, FRUIT_QTY),
            (
                FoodCategory::Extra,
                self.tables.extra_serving(&foods[FoodCategory::Extra.index()])?,
            ),
        ];

        let mut fixed_macros = NutrientProfile::default();
        for (role, qty) in fixed {
            let profile = self.tables.nutrient(&foods[role.index()])?;
            fixed_macros = fixed_macros.plus(&profile.scaled(qty));
        }

        let free = [
            self.tables.nutrient(&foods[FoodCategory::ProteinSource.index()])?,
            self.tables.nutrient(&foods[FoodCategory::CarbSource.index()])?,
            self.tables.nutrient(&foods[FoodCategory::FatSource.index()])?,
        ];

        // Rows are kcal from protein, carbs and fat.
        let mut a = [[0.0; 3]; 3];
        for (j, profile) in free.iter().enumerate() {
            a[0][j] = KCAL_PER_G_PROTEIN * profile.protein;
            a[1][j] = KCAL_PER_G_CARB * profile.carbs;
            a[2][j] = KCAL_PER_G_FAT * profile.fats;
        }
        let b = [
            PROTEIN_KCAL_SHARE * self.target_kcal - KCAL_PER_G_PROTEIN * fixed_macros.protein,
            CARB_KCAL_SHARE * self.target_kcal - KCAL_PER_G_CARB * fixed_macros.carbs,
            FAT_KCAL_SHARE * self.target_kcal - KCAL_PER_G_FAT * fixed_macros.fats,
        ];

        let x = solve_3x3(a, b).ok_or_else(|| EcoError::SingularSystem {
            foods: meal.label(),
        })?;

        if x.iter().any(|q| *q < 0.0) {
            return Ok(meal.infeasible());
        }

        let quantities = [x[0], x[1], x[2], fixed[0].1, fixed[1].1, fixed[2].1];
        let meal = meal.solved(quantities);

        let total = meal.total_kcal(self.tables)?;
        if !approx_equal(total, self.target_kcal, Tolerance::KCAL) {
            warn!(
                meal = %meal.label(),
                total_kcal = total,
                target_kcal = self.target_kcal,
                "Meal kcal differs from target; food tables may be kcal-inconsistent"
            );
        }

        Ok(meal)
    }
}

/// Solve a single meal. See [`MealComposer::compose`].
pub fn compose_meal(
    foods: [String; ROLE_COUNT],
    target_kcal: f64,
    tables: &FoodTables,
) -> Result<Meal> {
    MealComposer::new(tables, target_kcal)?.compose(foods)
}
