use crate::error::Result;
use crate::models::{
    FoodCategory, ImpactDimension, ImpactVector, Meal, MealSet, MealSlot, Physiology,
};
use crate::planner::constants::{KCAL_PER_G_CARB, KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN};
use crate::planner::{DayPlan, EnumerationReport, SearchStats};
use crate::state::FoodTables;

/// Display the foods and quantities of a meal with its nutritional breakdown.
pub fn display_meal(meal: &Meal, tables: &FoodTables) -> Result<()> {
    println!();
    println!("=== Meal ===");
    println!();

    let Some(quantities) = meal.quantities() else {
        println!("Infeasible: no non-negative quantities meet the macro targets.");
        for role in FoodCategory::ALL {
            println!("  {:<14} {}", role.label(), meal.food(role));
        }
        println!();
        return Ok(());
    };

    let width = meal.foods().iter().map(String::len).max().unwrap_or(10);
    for role in FoodCategory::ALL {
        let qty = quantities[role.index()];
        let profile = tables.nutrient(meal.food(role))?.scaled(qty);
        println!(
            "  {:<14} {:<width$} {:>6.1} g | {:>5.0} kcal | P:{:>5.1} C:{:>5.1} F:{:>5.1}",
            role.label(),
            meal.food(role),
            1000.0 * qty,
            profile.kcal,
            profile.protein,
            profile.carbs,
            profile.fats,
            width = width
        );
    }

    let totals = meal.nutrient_totals(tables)?;
    let macro_kcal = totals.kcal_from_macros();
    println!();
    println!("--- Nutrition ---");
    println!("Total kcal: {:.1}", totals.kcal);
    if macro_kcal > 0.0 {
        println!(
            "Protein: {:.1} g ({:.0}%)  Carbs: {:.1} g ({:.0}%)  Fat: {:.1} g ({:.0}%)",
            totals.protein,
            100.0 * KCAL_PER_G_PROTEIN * totals.protein / macro_kcal,
            totals.carbs,
            100.0 * KCAL_PER_G_CARB * totals.carbs / macro_kcal,
            totals.fats,
            100.0 * KCAL_PER_G_FAT * totals.fats / macro_kcal,
        );
    }
    display_impact(meal.impact(), "Impact");
    Ok(())
}

/// Display an impact vector, one dimension per line with units.
pub fn display_impact(impact: &ImpactVector, title: &str) {
    println!();
    println!("--- {} ---", title);
    for dim in ImpactDimension::ALL {
        println!("  {:<22} {:>10.3} {}", dim.label(), impact.get(dim), dim.unit());
    }
    println!();
}

/// Display enumeration diagnostics.
pub fn display_enumeration(report: &EnumerationReport, target_kcal: f64) {
    println!();
    println!("=== Catalog ({:.0} kcal per meal) ===", target_kcal);
    println!("Combinations: {}", report.combinations);
    println!("Feasible: {}", report.catalog.len());
    println!(
        "Infeasible: {} ({:.1}%)",
        report.infeasible,
        100.0 * report.infeasible_fraction()
    );
}

fn median(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Display min / median / max of each impact dimension across meals.
pub fn display_impact_ranges(meals: &[Meal]) {
    if meals.is_empty() {
        println!("No meals to summarise.");
        return;
    }

    println!();
    println!("--- Impact ranges over {} meals ---", meals.len());
    println!("  {:<22} {:>10} {:>10} {:>10}", "", "min", "median", "max");
    for dim in ImpactDimension::ALL {
        let mut values: Vec<f64> = meals.iter().map(|m| m.impact().get(dim)).collect();
        values.sort_by(f64::total_cmp);
        println!(
            "  {:<22} {:>10.3} {:>10.3} {:>10.3}  {}",
            dim.label(),
            values[0],
            median(&values),
            values[values.len() - 1],
            dim.unit()
        );
    }
    println!();
}

/// Display meal sets with their totals, up to `limit` sets.
pub fn display_meal_sets(sets: &[MealSet], stats: &SearchStats, limit: usize) -> Result<()> {
    println!();
    println!("=== Meal sets ===");
    println!(
        "{} sets from {} candidate meals ({} expansions, {} dead ends){}",
        sets.len(),
        stats.restricted,
        stats.expanded,
        stats.exhausted,
        if stats.truncated { ", stopped at limit" } else { "" }
    );

    for (i, set) in sets.iter().take(limit).enumerate() {
        println!();
        println!("Set {} | rating {} | impact {}", i + 1, set.total_rating(), set.total_impact());
        for line in set.export_lines()? {
            println!("  {}", line);
        }
    }

    if sets.len() > limit {
        println!();
        println!("... {} more not shown", sets.len() - limit);
    }
    println!();
    Ok(())
}

/// Display energy requirement and per-meal targets.
pub fn display_energy(physiology: &Physiology) -> Result<()> {
    println!();
    println!("Basal metabolic rate: {:.1} kcal/day", physiology.basal_metabolic_rate()?);
    println!(
        "Daily requirement: {:.1} kcal/day (PAL {})",
        physiology.daily_energy_requirement()?,
        physiology.activity.pal()
    );
    for slot in MealSlot::ALL {
        println!(
            "  {:<10} {:>7.1} kcal ({:.0}%)",
            slot.label(),
            physiology.meal_target(slot)?,
            100.0 * slot.share()
        );
    }
    println!();
    Ok(())
}

/// Display a sampled schedule.
pub fn display_schedule(plan: &[DayPlan]) -> Result<()> {
    println!();
    println!("=== Schedule ===");
    let mut total = ImpactVector::zero();
    for day in plan {
        println!();
        println!("Day {}", day.day);
        println!("  lunch:  {}", day.lunch.export_line()?);
        println!("  dinner: {}", day.dinner.export_line()?);
        total = total.add(&day.impact());
    }
    display_impact(&total, "Schedule impact");
    Ok(())
}

/// Display foods per role with their table values.
pub fn display_food_tables(tables: &FoodTables) -> Result<()> {
    for (category, names) in tables.categories().iter() {
        println!();
        println!("=== {} ({} items) ===", category.label(), names.len());
        for name in names {
            let n = tables.nutrient(name)?;
            println!(
                "  {} - {} kcal, P:{} C:{} F:{}, impact {}",
                name,
                n.kcal,
                n.protein,
                n.carbs,
                n.fats,
                tables.impact(name)?
            );
        }
    }
    println!();
    Ok(())
}
