use assert_float_eq::assert_float_relative_eq;

use eco_meal_finder_rs::EcoError;
use eco_meal_finder_rs::models::{
    Feasibility, FoodCategory, ImpactVector, Meal, NutrientProfile, Tolerance,
};
use eco_meal_finder_rs::planner::{MealComposer, compose_meal, meal_impact};
use eco_meal_finder_rs::state::{FoodTables, default_tables};

fn names(foods: [&str; 6]) -> [String; 6] {
    foods.map(str::to_string)
}

fn reference_meal() -> [String; 6] {
    names([
        "Poultry Meat",
        "Wheat & Rye (Bread)",
        "Olive Oil",
        "Root Vegetables",
        "Berries & Grapes",
        "Coffee",
    ])
}

#[test]
fn test_reference_meal_impact() {
    let meal = Meal::with_quantities(reference_meal(), [0.050, 0.120, 0.016, 0.125, 0.050, 0.008]);
    let impact = meal_impact(&meal, &default_tables()).unwrap();
    let expected = ImpactVector::new(1.4135, 0.7982, 6.7785, 3.5728, 2765.404);
    assert!(impact.approx_eq_default(&expected), "got {}", impact);
}

#[test]
fn test_reference_meal_not_environment_friendly() {
    let tables = default_tables();
    let meal = Meal::with_quantities(reference_meal(), [0.050, 0.120, 0.016, 0.125, 0.050, 0.008]);
    let impact = meal_impact(&meal, &tables).unwrap();
    let threshold = ImpactVector::new(2.0, 1.5, 7.0, 7.0, 1000.0);

    // Only water use is over.
    assert!(impact.water_use() > threshold.water_use());
    assert!(impact.land_use() < threshold.land_use());
    assert!(!impact.all_le(&threshold));
}

#[test]
fn test_reference_meal_solved_quantities() {
    let tables = default_tables();
    let meal = compose_meal(reference_meal(), 0.4 * 1800.0, &tables).unwrap();
    assert_eq!(meal.feasibility(), Feasibility::Feasible);

    let q = meal.quantities().unwrap();
    assert_float_relative_eq!(q[0], 0.10614259233357608, 1e-6);
    assert_float_relative_eq!(q[1], 0.13420074564597734, 1e-6);
    assert_float_relative_eq!(q[2], 0.015176158682627675, 1e-6);
    assert_eq!(q[3], 0.200);
    assert_eq!(q[4], 0.100);
    assert_eq!(q[5], 0.008);
}

#[test]
fn test_solved_meal_hits_kcal_target() {
    let tables = default_tables();
    for target in [400.0, 720.0, 1000.0] {
        let meal = compose_meal(reference_meal(), target, &tables).unwrap();
        let total = meal.total_kcal(&tables).unwrap();
        assert!(
            eco_meal_finder_rs::models::approx_equal(total, target, Tolerance::KCAL),
            "target {} got {}",
            target,
            total
        );
    }
}

#[test]
fn test_macro_split() {
    let tables = default_tables();
    let meal = compose_meal(reference_meal(), 720.0, &tables).unwrap();
    let totals = meal.nutrient_totals(&tables).unwrap();
    assert_float_relative_eq!(4.0 * totals.protein, 0.15 * 720.0, 1e-9);
    assert_float_relative_eq!(4.0 * totals.carbs, 0.55 * 720.0, 1e-9);
    assert_float_relative_eq!(8.8 * totals.fats, 0.30 * 720.0, 1e-9);
}

#[test]
fn test_first_catalog_meal_quantities() {
    let tables = default_tables();
    let foods = names([
        "Tofu",
        "Wheat & Rye (Bread)",
        "Rapeseed Oil",
        "Tomatoes",
        "Bananas",
        "Beet Sugar",
    ]);
    let meal = compose_meal(foods, 720.0, &tables).unwrap();
    assert_float_relative_eq!(
        meal.quantity(FoodCategory::ProteinSource).unwrap(),
        0.1752175992348158,
        1e-9
    );
    assert_float_relative_eq!(
        meal.quantity(FoodCategory::CarbSource).unwrap(),
        0.1260019129603061,
        1e-9
    );
    assert_float_relative_eq!(
        meal.quantity(FoodCategory::FatSource).unwrap(),
        0.01627640480659631,
        1e-9
    );
}

#[test]
fn test_overfull_extra_is_infeasible() {
    let mut tables = default_tables();
    tables.set_extra_serving("Beet Sugar", 1.0);
    let foods = names([
        "Tofu",
        "Wheat & Rye (Bread)",
        "Rapeseed Oil",
        "Tomatoes",
        "Bananas",
        "Beet Sugar",
    ]);
    let meal = compose_meal(foods, 720.0, &tables).unwrap();
    assert_eq!(meal.feasibility(), Feasibility::Infeasible);
    assert!(meal.quantities().is_none());
    assert!(matches!(meal.export_line(), Err(EcoError::UnsolvedMeal(_))));
}

#[test]
fn test_singular_system_is_an_error() {
    let mut tables = FoodTables::new();
    let impact = Some(ImpactVector::new(1.0, 1.0, 1.0, 1.0, 1.0));
    // Carb source is exactly twice the protein source: dependent columns.
    let rows = [
        ("A", FoodCategory::ProteinSource, NutrientProfile::new(100.0, 10.0, 10.0, 1.0)),
        ("B", FoodCategory::CarbSource, NutrientProfile::new(200.0, 20.0, 20.0, 2.0)),
        ("C", FoodCategory::FatSource, NutrientProfile::new(8096.0, 0.0, 0.0, 920.0)),
        ("D", FoodCategory::Vegetable, NutrientProfile::new(170.0, 8.0, 30.1, 2.0)),
        ("E", FoodCategory::Fruit, NutrientProfile::new(600.0, 7.0, 136.4, 3.0)),
        ("F", FoodCategory::Extra, NutrientProfile::new(560.0, 80.0, 60.0, 0.0)),
    ];
    for (name, category, profile) in rows {
        tables.insert_food(name, category, Some(profile), impact);
    }
    tables.set_extra_serving("F", 0.01);

    let composer = MealComposer::new(&tables, 720.0).unwrap();
    let result = composer.compose(names(["A", "B", "C", "D", "E", "F"]));
    match result {
        Err(EcoError::SingularSystem { foods }) => assert!(foods.contains("A / B")),
        other => panic!("expected SingularSystem, got {:?}", other),
    }
}
