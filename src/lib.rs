pub mod cli;
pub mod error;
pub mod interface;
pub mod logging;
pub mod models;
pub mod planner;
pub mod state;

pub use error::{EcoError, Result};
pub use models::{Catalog, ImpactVector, Meal, MealSet};
