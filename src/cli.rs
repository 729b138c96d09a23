use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::models::{ActivityLevel, Gender};

/// EcoMealFinder — solves meals for macro targets and searches low-impact meal sets.
#[derive(Parser, Debug)]
#[command(name = "eco_meal_finder")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Food table JSON file. The built-in dataset is used when omitted.
    #[arg(short, long, global = true)]
    pub foods: Option<PathBuf>,

    /// Settings cache remembering thresholds, servings and ratings.
    #[arg(short, long, global = true, default_value = "eco_settings.json")]
    pub settings: PathBuf,

    /// Reuse values from the settings cache instead of asking again.
    #[arg(short, long, global = true)]
    pub reuse: bool,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Options shared by every command that builds a catalog.
#[derive(Args, Debug, Clone)]
pub struct CatalogArgs {
    /// Energy target per meal, in kcal (default: 40% of 1800).
    #[arg(short, long, default_value_t = 720.0)]
    pub kcal: f64,

    /// Ask for a 0-5 rating of every food; meals with a food rated 0 are dropped.
    #[arg(long)]
    pub rate: bool,

    /// With --rate, keep only meals whose summed rating is at least this.
    #[arg(long, requires = "rate")]
    pub min_rating: Option<i32>,

    /// Ask for the serving size of every extra.
    #[arg(long)]
    pub ask_servings: bool,

    /// Compose meals on all cores.
    #[arg(long)]
    pub parallel: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check the food tables for gaps and kcal inconsistencies.
    Check {
        /// Also list every food with its values.
        #[arg(long)]
        list: bool,
    },

    /// Estimate daily energy requirement and per-meal targets.
    Energy {
        #[arg(long, value_enum)]
        gender: Gender,

        /// Age in years (18 or more).
        #[arg(long)]
        age: u32,

        /// Body weight in kg.
        #[arg(long)]
        weight: f64,

        /// Height in cm.
        #[arg(long)]
        height: f64,

        #[arg(long, value_enum, default_value = "light")]
        activity: ActivityLevel,
    },

    /// Solve one meal from six foods: protein, carb, fat, vegetable, fruit, extra.
    Compose {
        #[arg(
            num_args = 6,
            value_names = ["PROTEIN", "CARB", "FAT", "VEGETABLE", "FRUIT", "EXTRA"]
        )]
        foods: Vec<String>,

        /// Energy target in kcal.
        #[arg(short, long, default_value_t = 720.0)]
        kcal: f64,

        /// Write the meal's impact record to this file.
        #[arg(long)]
        impact_out: Option<PathBuf>,
    },

    /// Enumerate every feasible meal and summarise the catalog.
    Catalog {
        #[command(flatten)]
        catalog: CatalogArgs,

        /// Write the catalog as CSV.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only keep meals within the thresholds (asked for or given with --threshold).
        #[arg(long)]
        friendly: bool,

        /// Impact thresholds: land use, GHG, acidifying, eutrophying, water use.
        #[arg(short, long, num_args = 5, allow_negative_numbers = true)]
        threshold: Option<Vec<f64>>,
    },

    /// Search sets of meals whose total impact stays below the thresholds.
    Search {
        #[command(flatten)]
        catalog: CatalogArgs,

        /// Meals per set.
        #[arg(long, default_value_t = 2)]
        size: usize,

        /// Impact thresholds: land use, GHG, acidifying, eutrophying, water use.
        #[arg(short, long, num_args = 5, allow_negative_numbers = true)]
        threshold: Option<Vec<f64>>,

        /// Stop after this many sets.
        #[arg(long)]
        max_results: Option<usize>,

        /// Stop after this many expansions.
        #[arg(long)]
        max_expanded: Option<usize>,

        /// Write the sets as text, one line per meal.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of sets printed.
        #[arg(long, default_value_t = 5)]
        show: usize,
    },

    /// Draw a random lunch and dinner schedule from the catalog.
    Schedule {
        #[command(flatten)]
        catalog: CatalogArgs,

        #[arg(long, default_value_t = 7)]
        days: usize,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Only draw meals within these thresholds.
        #[arg(short, long, num_args = 5, allow_negative_numbers = true)]
        threshold: Option<Vec<f64>>,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Check { list: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_rating_needs_rate() {
        let missing_rate = ["eco_meal_finder", "catalog", "--min-rating", "20"];
        assert!(Cli::try_parse_from(missing_rate).is_err());

        let args = ["eco_meal_finder", "catalog", "--rate", "--min-rating", "20"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Some(Command::Catalog { catalog, .. }) => {
                assert!(catalog.rate);
                assert_eq!(catalog.min_rating, Some(20));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
