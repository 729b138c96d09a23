use std::collections::HashMap;

use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::error::{EcoError, Result};
use crate::models::{FoodCategory, ImpactDimension};
use crate::planner::constants::{DEFAULT_RATING, DEFAULT_THRESHOLD, MAX_RATING, rating_name};
use crate::state::{ConfigSupplier, FoodTables, SettingKey};

/// Asks the user for every value on the terminal.
#[derive(Debug, Clone, Default)]
pub struct PromptSupplier {
    defaults: HashMap<SettingKey, f64>,
}

impl PromptSupplier {
    /// A supplier offering the built-in thresholds and current serving sizes as defaults.
    pub fn with_defaults(tables: &FoodTables) -> Self {
        let mut defaults = HashMap::new();
        for dim in ImpactDimension::ALL {
            defaults.insert(SettingKey::Threshold(dim), DEFAULT_THRESHOLD[dim.index()]);
        }
        for name in tables.categories().get(FoodCategory::Extra) {
            if let Ok(serving) = tables.extra_serving(name) {
                defaults.insert(SettingKey::ExtraServing(name.clone()), serving);
            }
        }
        Self { defaults }
    }
}

impl ConfigSupplier for PromptSupplier {
    fn supply(&mut self, key: &SettingKey) -> Result<f64> {
        match key {
            SettingKey::Rating(food) => prompt_rating(food).map(f64::from),
            _ => prompt_number(&key.describe(), self.defaults.get(key).copied()),
        }
    }
}

/// Prompt for a non-negative number.
pub fn prompt_number(prompt: &str, default: Option<f64>) -> Result<f64> {
    let mut input = Input::<String>::new().with_prompt(prompt);
    if let Some(value) = default {
        input = input.default(value.to_string());
    }
    let text = input.interact_text()?;

    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| EcoError::InvalidInput(format!("Invalid number: {}", text)))?;
    if !(value >= 0.0 && value.is_finite()) {
        return Err(EcoError::InvalidInput(format!(
            "{} must be non-negative",
            prompt
        )));
    }
    Ok(value)
}

/// Prompt for a 0 to 5 food rating.
pub fn prompt_rating(food_name: &str) -> Result<u8> {
    let options: Vec<String> = (0..=MAX_RATING)
        .map(|r| format!("{} ({})", r, rating_name(r)))
        .collect();

    let selection = Select::new()
        .with_prompt(format!("Rate '{}'", food_name))
        .items(&options)
        .default(DEFAULT_RATING as usize)
        .interact()?;

    Ok(selection as u8)
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Resolve a typed food name: exact (case-insensitive) first, then fuzzy
/// matches confirmed by the user.
pub fn resolve_food_name(tables: &FoodTables, input: &str) -> Result<String> {
    if let Ok(name) = tables.canonical_name(input) {
        return Ok(name.to_string());
    }

    let needle = input.trim().to_lowercase();
    let mut candidates: Vec<(&String, f64)> = tables
        .food_names()
        .map(|name| (name, jaro_winkler(&name.to_lowercase(), &needle)))
        .filter(|(_, score)| *score > 0.7)
        .collect();
    candidates.sort_by(|a, b| b.1.total_cmp(&a.1));

    match candidates.len() {
        0 => Err(EcoError::FoodNotFound(input.to_string())),
        1 => {
            let name = candidates[0].0;
            if prompt_yes_no(&format!("Did you mean '{}'?", name), true)? {
                Ok(name.clone())
            } else {
                Err(EcoError::FoodNotFound(input.to_string()))
            }
        }
        _ => {
            let options: Vec<String> = candidates
                .iter()
                .take(5)
                .map(|(n, _)| (*n).clone())
                .collect();
            let mut selection_options = options.clone();
            selection_options.push("None of these".to_string());

            let selection = Select::new()
                .with_prompt(format!("Which food did you mean by '{}'?", input))
                .items(&selection_options)
                .default(0)
                .interact()?;

            options
                .get(selection)
                .cloned()
                .ok_or_else(|| EcoError::FoodNotFound(input.to_string()))
        }
    }
}
