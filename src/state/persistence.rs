use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::models::{Catalog, FoodCategory, FoodRecord, ImpactDimension, ImpactVector, MealSet};
use crate::state::tables::FoodTables;

/// Load food records from a JSON file.
pub fn load_food_records<P: AsRef<Path>>(path: P) -> Result<Vec<FoodRecord>> {
    let content = fs::read_to_string(path)?;
    let records: Vec<FoodRecord> = serde_json::from_str(&content)?;
    Ok(records)
}

/// Save food records to a JSON file.
pub fn save_food_records<P: AsRef<Path>>(path: P, records: &[FoodRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load a food table file straight into lookup tables.
pub fn load_tables<P: AsRef<Path>>(path: P) -> Result<FoodTables> {
    Ok(FoodTables::from_records(&load_food_records(path)?))
}

pub fn save_impact_record<P: AsRef<Path>>(path: P, impact: &ImpactVector) -> Result<()> {
    fs::write(path, impact.to_record())?;
    Ok(())
}

pub fn load_impact_record<P: AsRef<Path>>(path: P) -> Result<ImpactVector> {
    ImpactVector::from_record(&fs::read_to_string(path)?)
}

/// Write meal sets as text, one line per meal, a blank line between sets.
pub fn export_meal_sets<P: AsRef<Path>>(path: P, sets: &[MealSet]) -> Result<()> {
    let mut file = fs::File::create(path)?;
    for (i, set) in sets.iter().enumerate() {
        if i > 0 {
            writeln!(file)?;
        }
        for line in set.export_lines()? {
            writeln!(file, "{}", line)?;
        }
    }
    file.flush()?;
    Ok(())
}

/// Write a catalog as CSV: foods, quantities (retail units), impacts, rating.
pub fn write_catalog_csv<P: AsRef<Path>>(path: P, catalog: &Catalog) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header: Vec<String> = FoodCategory::ALL
        .iter()
        .map(|c| c.label().replace(' ', "_"))
        .collect();
    header.extend(FoodCategory::ALL.iter().map(|c| format!("{}_qty", c.label().replace(' ', "_"))));
    header.extend(ImpactDimension::ALL.iter().map(|d| d.key().to_string()));
    header.push("rating".to_string());
    wtr.write_record(&header)?;

    for meal in catalog {
        let quantities = meal.require_quantities()?;
        let mut row: Vec<String> = meal.foods().to_vec();
        row.extend(quantities.iter().map(|q| format!("{:.6}", q)));
        row.extend(meal.impact().to_array().iter().map(|v| format!("{:.6}", v)));
        row.push(meal.rating().to_string());
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::default_tables;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_partial_records() {
        let json = r#"[
            {"Name": "Tofu", "Category": "ProteinSource",
             "Kcal": 765, "Protein": 82, "Carbs": 16.85, "Fats": 42,
             "LandUse": 3.4, "GhgEmissions": 2.6, "AcidifyingEmissions": 6.0,
             "EutrophyingEmissions": 6.6, "WaterUse": 32},
            {"Name": "Coffee", "Category": "Extra", "Kcal": 560}
        ]"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let tables = load_tables(file.path()).unwrap();
        assert_eq!(tables.len(), 2);
        assert!(tables.nutrient("Tofu").is_ok());
        let missing = tables.missing_entries();
        assert_eq!(missing.len(), 3);
    }

    #[test]
    fn test_save_and_reload_tables() {
        let tables = default_tables();
        let file = NamedTempFile::new().unwrap();
        save_food_records(file.path(), &tables.to_records()).unwrap();

        let reloaded = load_tables(file.path()).unwrap();
        assert_eq!(reloaded.len(), 18);
        assert!(reloaded.ensure_complete().is_ok());
        assert_eq!(reloaded.impact("Eggs").unwrap().water_use(), 18621.0);
    }

    #[test]
    fn test_impact_record_file() {
        let impact = ImpactVector::new(1.4135, 0.7982, 6.7785, 3.5728, 2765.404);
        let file = NamedTempFile::new().unwrap();
        save_impact_record(file.path(), &impact).unwrap();

        let text = fs::read_to_string(file.path()).unwrap();
        assert_eq!(text.lines().collect::<Vec<_>>()[4], "2765.404");
        assert!(load_impact_record(file.path()).unwrap().approx_eq_default(&impact));
    }
}
