use std::path::Path;

use clap::Parser;
use tracing::{info, warn};

use eco_meal_finder_rs::cli::{CatalogArgs, Cli, Command};
use eco_meal_finder_rs::error::{EcoError, Result};
use eco_meal_finder_rs::interface::{
    PromptSupplier, display_energy, display_enumeration, display_food_tables,
    display_impact_ranges, display_meal, display_meal_sets, display_schedule, resolve_food_name,
};
use eco_meal_finder_rs::logging;
use eco_meal_finder_rs::models::{ActivityLevel, Catalog, Gender, ImpactVector, Physiology};
use eco_meal_finder_rs::planner::aggregator::with_impact;
use eco_meal_finder_rs::planner::{
    SearchConfig, SearchLimits, assign_ratings, compose_meal, enumerate_meals,
    enumerate_meals_parallel, sample_schedule, search_meal_sets, search_meal_sets_parallel,
};
use eco_meal_finder_rs::state::{
    CachedSupplier, FoodTables, StaticSupplier, default_tables, export_meal_sets, load_tables,
    save_impact_record, supply_extra_servings, supply_ratings, supply_thresholds,
    write_catalog_csv,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut cli = Cli::parse();
    logging::init(cli.verbose);

    let mut tables = match &cli.foods {
        Some(path) => {
            info!(path = %path.display(), "Loading food tables");
            load_tables(path)?
        }
        None => default_tables(),
    };

    let command = cli.command.take().unwrap_or_default();
    match command {
        Command::Check { list } => cmd_check(&tables, list),
        Command::Energy {
            gender,
            age,
            weight,
            height,
            activity,
        } => cmd_energy(gender, age, weight, height, activity),
        Command::Compose {
            foods,
            kcal,
            impact_out,
        } => cmd_compose(&tables, &foods, kcal, impact_out.as_deref()),
        Command::Catalog {
            catalog,
            output,
            friendly,
            threshold,
        } => {
            let meals = build_catalog(&cli, &catalog, &mut tables)?;
            let meals = if friendly {
                let thresholds = resolve_threshold(&cli, threshold, &tables)?;
                let kept = meals.environment_friendly(&thresholds);
                println!("Environment-friendly: {} of {}", kept.len(), meals.len());
                kept
            } else {
                meals
            };
            display_impact_ranges(meals.meals());
            if let Some(path) = output {
                write_catalog_csv(&path, &meals)?;
                println!("Catalog written to {}", path.display());
            }
            Ok(())
        }
        Command::Search {
            catalog,
            size,
            threshold,
            max_results,
            max_expanded,
            output,
            show,
        } => {
            let meals = build_catalog(&cli, &catalog, &mut tables)?;
            let config = SearchConfig {
                set_size: size,
                threshold: resolve_threshold(&cli, threshold, &tables)?,
                limits: SearchLimits {
                    max_results,
                    max_expanded,
                },
            };
            let outcome = if catalog.parallel {
                search_meal_sets_parallel(&meals, &config)?
            } else {
                search_meal_sets(&meals, &config)?
            };
            display_meal_sets(&outcome.sets, &outcome.stats, show)?;
            if let Some(path) = output {
                export_meal_sets(&path, &outcome.sets)?;
                println!("{} sets written to {}", outcome.sets.len(), path.display());
            }
            Ok(())
        }
        Command::Schedule {
            catalog,
            days,
            seed,
            threshold,
        } => {
            let mut meals = build_catalog(&cli, &catalog, &mut tables)?;
            if threshold.is_some() {
                let thresholds = resolve_threshold(&cli, threshold, &tables)?;
                meals = meals.environment_friendly(&thresholds);
            }
            let plan = sample_schedule(&meals, days, seed)?;
            display_schedule(&plan)
        }
    }
}

/// Report gaps and kcal inconsistencies in the tables.
fn cmd_check(tables: &FoodTables, list: bool) -> Result<()> {
    println!("Loaded {} foods", tables.len());

    let missing = tables.missing_entries();
    if missing.is_empty() {
        println!("All tables complete.");
    } else {
        println!("{} missing entries:", missing.len());
        for entry in &missing {
            println!("  {}", entry);
        }
    }

    let inconsistent = tables.kcal_inconsistencies();
    if inconsistent.is_empty() {
        println!("All kcal values agree with their macros.");
    } else {
        println!("{} foods with inconsistent kcal:", inconsistent.len());
        for (name, kcal, from_macros) in &inconsistent {
            println!("  {} - {} kcal stated, {:.1} from macros", name, kcal, from_macros);
        }
    }

    if list && missing.is_empty() {
        display_food_tables(tables)?;
    }

    tables.ensure_complete()
}

fn cmd_energy(
    gender: Gender,
    age: u32,
    weight: f64,
    height: f64,
    activity: ActivityLevel,
) -> Result<()> {
    let physiology = Physiology {
        gender,
        age,
        body_weight_kg: weight,
        height_cm: height,
        activity,
    };
    display_energy(&physiology)
}

/// Solve and display one meal.
fn cmd_compose(
    tables: &FoodTables,
    names: &[String],
    kcal: f64,
    impact_out: Option<&Path>,
) -> Result<()> {
    let resolved = names
        .iter()
        .map(|n| resolve_food_name(tables, n))
        .collect::<Result<Vec<String>>>()?;
    let foods: [String; 6] = resolved
        .try_into()
        .map_err(|_| EcoError::InvalidInput("exactly six foods are required".to_string()))?;

    let meal = compose_meal(foods, kcal, tables)?;
    if !meal.is_feasible() {
        display_meal(&meal, tables)?;
        return Ok(());
    }

    let meal = with_impact(meal, tables)?;
    display_meal(&meal, tables)?;

    if let Some(path) = impact_out {
        save_impact_record(path, meal.impact())?;
        println!("Impact record written to {}", path.display());
    }
    Ok(())
}

fn settings_supplier(cli: &Cli, tables: &FoodTables) -> Result<CachedSupplier<PromptSupplier>> {
    CachedSupplier::open(&cli.settings, cli.reuse, PromptSupplier::with_defaults(tables))
}

/// Thresholds from the command line, or from the settings cache and prompts.
fn resolve_threshold(
    cli: &Cli,
    given: Option<Vec<f64>>,
    tables: &FoodTables,
) -> Result<ImpactVector> {
    match given {
        Some(values) => {
            let values: [f64; 5] = values
                .try_into()
                .map_err(|_| EcoError::InvalidInput("threshold needs five values".to_string()))?;
            let mut supplier =
                StaticSupplier::new().with_threshold(&ImpactVector::from_array(values));
            supply_thresholds(&mut supplier)
        }
        None => supply_thresholds(&mut settings_supplier(cli, tables)?),
    }
}

/// Enumerate the catalog, applying servings and ratings when asked.
fn build_catalog(cli: &Cli, args: &CatalogArgs, tables: &mut FoodTables) -> Result<Catalog> {
    if args.ask_servings {
        let mut supplier = settings_supplier(cli, tables)?;
        supply_extra_servings(&mut supplier, tables)?;
    }

    let report = if args.parallel {
        enumerate_meals_parallel(tables, args.kcal)?
    } else {
        enumerate_meals(tables, args.kcal)?
    };
    display_enumeration(&report, args.kcal);

    let mut catalog = report.catalog;
    if catalog.is_empty() {
        warn!(kcal = args.kcal, "No feasible meal for this target");
    }

    if args.rate {
        let ratings = supply_ratings(&mut settings_supplier(cli, tables)?, tables)?;
        assign_ratings(&mut catalog, &ratings);
        let kept = catalog.without_vetoed(&ratings);
        println!("Kept {} of {} meals after vetoes", kept.len(), catalog.len());
        catalog = kept;

        if let Some(min) = args.min_rating {
            let kept = catalog.with_min_rating(min);
            println!("Kept {} of {} meals rated at least {}", kept.len(), catalog.len(), min);
            catalog = kept;
        }
    }

    Ok(catalog)
}
