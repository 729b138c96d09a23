use crate::models::impact::ImpactVector;
use crate::models::meal::Meal;
use crate::planner::aggregator::{Ratings, contains_vetoed_food};

/// Feasible meals from one enumeration pass, in enumeration order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    meals: Vec<Meal>,
}

impl Catalog {
    /// Wrap meals as-is. Infeasible meals are dropped.
    pub fn from_meals(meals: Vec<Meal>) -> Self {
        Self {
            meals: meals.into_iter().filter(Meal::is_feasible).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.meals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Meal> {
        self.meals.get(index)
    }

    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    pub fn iter(&self) -> impl Iterator<Item = &Meal> {
        self.meals.iter()
    }

    pub(crate) fn meals_mut(&mut self) -> &mut Vec<Meal> {
        &mut self.meals
    }

    /// Keep meals matching `pred`, preserving order.
    pub fn filter(&self, pred: impl Fn(&Meal) -> bool) -> Catalog {
        Catalog {
            meals: self.meals.iter().filter(|m| pred(m)).cloned().collect(),
        }
    }

    /// Meals with impact `<=` thresholds in every dimension.
    pub fn environment_friendly(&self, thresholds: &ImpactVector) -> Catalog {
        self.filter(|m| m.is_environment_friendly(thresholds))
    }

    /// Meals with impact strictly below the threshold in every dimension.
    pub fn below_threshold(&self, threshold: &ImpactVector) -> Catalog {
        self.filter(|m| m.impact().all_lt(threshold))
    }

    /// Drop meals containing a food rated 0.
    pub fn without_vetoed(&self, ratings: &Ratings) -> Catalog {
        self.filter(|m| !contains_vetoed_food(m, ratings))
    }

    /// Meals whose summed food rating is at least `min`.
    pub fn with_min_rating(&self, min: i32) -> Catalog {
        self.filter(|m| m.rating() >= min)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Meal;
    type IntoIter = std::slice::Iter<'a, Meal>;

    fn into_iter(self) -> Self::IntoIter {
        self.meals.iter()
    }
}
