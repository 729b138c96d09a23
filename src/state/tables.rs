use std::collections::HashMap;

use strsim::jaro_winkler;
use tracing::{debug, warn};

use crate::error::{EcoError, Result};
use crate::models::food::{FoodCategory, FoodRecord, NutrientProfile};
use crate::models::impact::ImpactVector;

/// Minimum similarity for a "did you mean" hint.
const NAME_HINT_MIN_SCORE: f64 = 0.8;

/// Food names per role, in input order.
#[derive(Debug, Clone, Default)]
pub struct CategoryLists {
    lists: [Vec<String>; 6],
}

impl CategoryLists {
    pub fn get(&self, category: FoodCategory) -> &[String] {
        &self.lists[category.index()]
    }

    pub fn push(&mut self, category: FoodCategory, name: impl Into<String>) {
        self.lists[category.index()].push(name.into());
    }

    /// Number of role combinations (product of list lengths).
    pub fn combination_count(&self) -> usize {
        self.lists.iter().map(Vec::len).product()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FoodCategory, &[String])> {
        FoodCategory::ALL
            .into_iter()
            .map(move |c| (c, self.get(c)))
    }
}

/// Per-unit nutrient and impact lookups, plus serving sizes for extras.
///
/// Built once and passed by reference to everything that needs it. Lookups
/// are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct FoodTables {
    categories: CategoryLists,
    names: HashMap<String, String>,
    nutrients: HashMap<String, NutrientProfile>,
    impacts: HashMap<String, ImpactVector>,
    extra_servings: HashMap<String, f64>,
}

impl FoodTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build tables from parsed records. A repeated name replaces the earlier entry.
    pub fn from_records(records: &[FoodRecord]) -> Self {
        let mut tables = Self::new();
        for record in records {
            tables.insert_food(&record.name, record.category, record.nutrients(), record.impact());
            if let Some(serving) = record.serving {
                tables.set_extra_serving(&record.name, serving);
            }
        }
        tables
    }

    /// Convert back to records, in category order.
    pub fn to_records(&self) -> Vec<FoodRecord> {
        let mut records = Vec::new();
        for (category, names) in self.categories.iter() {
            for name in names {
                let key = name.to_lowercase();
                let nutrients = self.nutrients.get(&key);
                let impact = self.impacts.get(&key);
                records.push(FoodRecord {
                    name: name.clone(),
                    category,
                    kcal: nutrients.map(|n| n.kcal),
                    protein: nutrients.map(|n| n.protein),
                    carbs: nutrients.map(|n| n.carbs),
                    fats: nutrients.map(|n| n.fats),
                    land_use: impact.map(|i| i.land_use()),
                    ghg_emissions: impact.map(|i| i.ghg_emissions()),
                    acidifying_emissions: impact.map(|i| i.acidifying_emissions()),
                    eutrophying_emissions: impact.map(|i| i.eutrophying_emissions()),
                    water_use: impact.map(|i| i.water_use()),
                    serving: self.extra_servings.get(&key).copied(),
                });
            }
        }
        records
    }

    /// Register a food under a role. Missing tables are allowed here and
    /// reported later by [`FoodTables::ensure_complete`].
    pub fn insert_food(
        &mut self,
        name: &str,
        category: FoodCategory,
        nutrients: Option<NutrientProfile>,
        impact: Option<ImpactVector>,
    ) {
        let key = name.to_lowercase();
        if self.names.insert(key.clone(), name.to_string()).is_none() {
            self.categories.push(category, name);
        }
        match nutrients {
            Some(n) => self.nutrients.insert(key.clone(), n),
            None => self.nutrients.remove(&key),
        };
        match impact {
            Some(i) => self.impacts.insert(key, i),
            None => self.impacts.remove(&key),
        };
    }

    pub fn set_extra_serving(&mut self, name: &str, serving: f64) {
        self.extra_servings.insert(name.to_lowercase(), serving);
    }

    pub fn categories(&self) -> &CategoryLists {
        &self.categories
    }

    pub fn food_names(&self) -> impl Iterator<Item = &String> {
        self.categories.lists.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn nutrient(&self, name: &str) -> Result<&NutrientProfile> {
        self.nutrients
            .get(&name.to_lowercase())
            .ok_or_else(|| self.not_found(name))
    }

    pub fn impact(&self, name: &str) -> Result<&ImpactVector> {
        self.impacts
            .get(&name.to_lowercase())
            .ok_or_else(|| self.not_found(name))
    }

    pub fn extra_serving(&self, name: &str) -> Result<f64> {
        self.extra_servings
            .get(&name.to_lowercase())
            .copied()
            .ok_or_else(|| self.not_found(name))
    }

    /// Canonical display name for a food, matching case-insensitively.
    pub fn canonical_name(&self, name: &str) -> Result<&str> {
        self.names
            .get(&name.trim().to_lowercase())
            .map(String::as_str)
            .ok_or_else(|| self.not_found(name))
    }

    /// Closest known food name, if one is similar enough.
    pub fn closest_name(&self, name: &str) -> Option<&str> {
        let needle = name.to_lowercase();
        self.names
            .iter()
            .map(|(key, display)| (display, jaro_winkler(key, &needle)))
            .filter(|(_, score)| *score >= NAME_HINT_MIN_SCORE)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(display, _)| display.as_str())
    }

    /// Every (food, table) pair a role list references but no table provides,
    /// plus nutrient profiles holding negative values.
    pub fn missing_entries(&self) -> Vec<String> {
        let mut missing = Vec::new();
        for (category, names) in self.categories.iter() {
            for name in names {
                let key = name.to_lowercase();
                match self.nutrients.get(&key) {
                    None => missing.push(format!("{} has no nutrient profile", name)),
                    Some(profile) if !profile.is_valid() => {
                        missing.push(format!("{} has negative nutrient values", name))
                    }
                    Some(_) => {}
                }
                if !self.impacts.contains_key(&key) {
                    missing.push(format!("{} has no impact values", name));
                }
                if category == FoodCategory::Extra && !self.extra_servings.contains_key(&key) {
                    missing.push(format!("{} has no serving size", name));
                }
            }
        }
        missing
    }

    /// Fail if any table is incomplete or a role has no foods.
    pub fn ensure_complete(&self) -> Result<()> {
        let mut missing = self.missing_entries();
        for (category, names) in self.categories.iter() {
            if names.is_empty() {
                missing.push(format!("no {} listed", category.label()));
            }
        }

        if missing.is_empty() {
            debug!(foods = self.len(), "Food tables complete");
            Ok(())
        } else {
            Err(EcoError::IncompleteTables(missing))
        }
    }

    /// Foods whose kcal disagrees with their macro composition.
    pub fn kcal_inconsistencies(&self) -> Vec<(String, f64, f64)> {
        let mut out = Vec::new();
        for name in self.food_names() {
            if let Some(profile) = self.nutrients.get(&name.to_lowercase()) {
                if !profile.is_consistent() {
                    warn!(
                        food = %name,
                        kcal = profile.kcal,
                        from_macros = profile.kcal_from_macros(),
                        "Inconsistent kcal"
                    );
                    out.push((name.clone(), profile.kcal, profile.kcal_from_macros()));
                }
            }
        }
        out
    }

    fn not_found(&self, name: &str) -> EcoError {
        match self.closest_name(name) {
            Some(hint) if !hint.eq_ignore_ascii_case(name) => {
                EcoError::FoodNotFound(format!("{} (did you mean '{}'?)", name, hint))
            }
            _ => EcoError::FoodNotFound(name.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::default_tables;

    #[test]
    fn test_default_tables_complete_and_consistent() {
        let tables = default_tables();
        assert_eq!(tables.len(), 18);
        assert!(tables.ensure_complete().is_ok());
        assert!(tables.kcal_inconsistencies().is_empty());
        assert_eq!(tables.categories().combination_count(), 648);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let tables = default_tables();
        assert_eq!(tables.nutrient("tofu").unwrap().kcal, 765.0);
        assert_eq!(tables.canonical_name("olive oil").unwrap(), "Olive Oil");
    }

    #[test]
    fn test_not_found_hint() {
        let tables = default_tables();
        let err = tables.impact("Tomatos").unwrap_err();
        assert!(err.to_string().contains("Tomatoes"));
    }

    #[test]
    fn test_missing_entries_listed() {
        let mut tables = FoodTables::new();
        tables.insert_food("Tofu", FoodCategory::ProteinSource, None, Some(ImpactVector::zero()));
        tables.insert_food(
            "Coffee",
            FoodCategory::Extra,
            Some(NutrientProfile::new(560.0, 80.0, 60.0, 0.0)),
            Some(ImpactVector::zero()),
        );

        let missing = tables.missing_entries();
        assert_eq!(missing.len(), 2);
        assert!(missing[0].contains("Tofu"));
        assert!(missing[1].contains("serving"));

        match tables.ensure_complete() {
            Err(EcoError::IncompleteTables(items)) => {
                assert!(items.iter().any(|m| m.contains("no fruit")));
            }
            other => panic!("expected IncompleteTables, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_nutrients_flagged() {
        let mut tables = default_tables();
        tables.insert_food(
            "Olive Oil",
            FoodCategory::FatSource,
            Some(NutrientProfile::new(8000.0, 0.0, 0.0, -10.0)),
            Some(ImpactVector::zero()),
        );

        let missing = tables.missing_entries();
        assert_eq!(missing, vec!["Olive Oil has negative nutrient values".to_string()]);
        assert!(matches!(
            tables.ensure_complete(),
            Err(EcoError::IncompleteTables(_))
        ));
    }

    #[test]
    fn test_records_roundtrip() {
        let tables = default_tables();
        let rebuilt = FoodTables::from_records(&tables.to_records());
        assert_eq!(rebuilt.len(), tables.len());
        assert_eq!(rebuilt.extra_serving("Coffee").unwrap(), 0.008);
        assert_eq!(
            rebuilt.categories().get(FoodCategory::Fruit),
            tables.categories().get(FoodCategory::Fruit)
        );
    }
}
