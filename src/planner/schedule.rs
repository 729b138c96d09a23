use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index::sample;
use tracing::debug;

use crate::error::{EcoError, Result};
use crate::models::{Catalog, ImpactVector, Meal};

/// Lunch and dinner for one day.
#[derive(Debug, Clone)]
pub struct DayPlan {
    /// 1-based day number.
    pub day: usize,
    pub lunch: Meal,
    pub dinner: Meal,
}

impl DayPlan {
    pub fn impact(&self) -> ImpactVector {
        self.lunch.impact().add(self.dinner.impact())
    }
}

/// Draw `2 * days` distinct catalog meals, lunch then dinner for each day.
///
/// The same seed always yields the same schedule for the same catalog.
pub fn sample_schedule(catalog: &Catalog, days: usize, seed: u64) -> Result<Vec<DayPlan>> {
    let needed = 2 * days;
    if needed > catalog.len() {
        return Err(EcoError::InvalidInput(format!(
            "{} days need {} distinct meals but the catalog has {}",
            days,
            needed,
            catalog.len()
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let picks = sample(&mut rng, catalog.len(), needed).into_vec();
    debug!(days, seed, catalog = catalog.len(), "Sampled schedule");

    Ok(picks
        .chunks(2)
        .enumerate()
        .map(|(i, pair)| DayPlan {
            day: i + 1,
            lunch: catalog.meals()[pair[0]].clone(),
            dinner: catalog.meals()[pair[1]].clone(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn catalog(n: usize) -> Catalog {
        Catalog::from_meals(
            (0..n)
                .map(|i| {
                    Meal::from_names([format!("m{}", i).as_str(), "c", "f", "v", "fr", "x"])
                        .solved([0.1; 6])
                })
                .collect(),
        )
    }

    #[test]
    fn test_schedule_is_reproducible() {
        let catalog = catalog(20);
        let a = sample_schedule(&catalog, 5, 7).unwrap();
        let b = sample_schedule(&catalog, 5, 7).unwrap();
        assert_eq!(a.len(), 5);
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.lunch.label(), y.lunch.label());
            assert_eq!(x.dinner.label(), y.dinner.label());
        }
    }

    #[test]
    fn test_schedule_meals_distinct() {
        let catalog = catalog(10);
        let plan = sample_schedule(&catalog, 5, 1).unwrap();
        let labels: HashSet<String> = plan
            .iter()
            .flat_map(|d| [d.lunch.label(), d.dinner.label()])
            .collect();
        assert_eq!(labels.len(), 10);
        assert_eq!(plan[4].day, 5);
    }

    #[test]
    fn test_schedule_catalog_too_small() {
        assert!(matches!(
            sample_schedule(&catalog(3), 2, 1),
            Err(EcoError::InvalidInput(_))
        ));
    }
}
