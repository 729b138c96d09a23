use std::collections::HashMap;
use std::sync::LazyLock;

/// Fixed vegetable quantity per meal, in retail units.
pub const VEGETABLE_QTY: f64 = 0.200;

/// Fixed fruit quantity per meal, in retail units.
pub const FRUIT_QTY: f64 = 0.100;

/// Share of the meal's kcal coming from protein.
pub const PROTEIN_KCAL_SHARE: f64 = 0.15;

/// Share of the meal's kcal coming from carbohydrate.
pub const CARB_KCAL_SHARE: f64 = 0.55;

/// Share of the meal's kcal coming from fat.
pub const FAT_KCAL_SHARE: f64 = 0.30;

pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_CARB: f64 = 4.0;

/// Fat energy density used throughout (not the usual 9).
pub const KCAL_PER_G_FAT: f64 = 8.8;

/// A pivot at or below this fraction of the largest coefficient is singular.
pub const SINGULAR_PIVOT_EPS: f64 = 1e-12;

// ─────────────────────────────────────────────────────────────────────────────
// Daily energy split
// ─────────────────────────────────────────────────────────────────────────────

pub const BREAKFAST_SHARE: f64 = 0.2;
pub const LUNCH_SHARE: f64 = 0.4;
pub const DINNER_SHARE: f64 = 0.4;

/// Daily requirement used when no physiology is given (1800 kcal).
pub const DEFAULT_DAILY_KCAL: f64 = 1800.0;

// ─────────────────────────────────────────────────────────────────────────────
// Ratings
// ─────────────────────────────────────────────────────────────────────────────

/// Highest food rating. A rating of 0 vetoes the food.
pub const MAX_RATING: u8 = 5;

/// Rating assumed for foods nobody rated.
pub const DEFAULT_RATING: u8 = 3;

/// Map from food rating to human-readable name.
pub static RATING_NAMES: LazyLock<HashMap<u8, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    m.insert(0, "never");
    m.insert(1, "bad");
    m.insert(2, "meh");
    m.insert(3, "neutral");
    m.insert(4, "good");
    m.insert(5, "favorite");
    m
});

/// Get the name for a rating.
pub fn rating_name(rating: u8) -> &'static str {
    RATING_NAMES.get(&rating).unwrap_or(&"unknown")
}

// ─────────────────────────────────────────────────────────────────────────────
// Search defaults
// ─────────────────────────────────────────────────────────────────────────────

/// Default number of meals per set.
pub const DEFAULT_SET_SIZE: usize = 2;

/// Default impact budget for a meal set, in record order.
pub const DEFAULT_THRESHOLD: [f64; 5] = [3.0, 2.0, 10.0, 6.0, 2000.0];
