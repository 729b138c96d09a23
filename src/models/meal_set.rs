use crate::error::{EcoError, Result};
use crate::models::impact::ImpactVector;
use crate::models::meal::Meal;

/// An ordered group of meals with running totals.
///
/// `total_impact` and `total_rating` are updated on every mutation by adding
/// the incoming meal and subtracting the outgoing one; they are never rebuilt
/// from the members.
#[derive(Debug, Clone, Default)]
pub struct MealSet {
    meals: Vec<Meal>,
    total_impact: ImpactVector,
    total_rating: i32,
}

impl MealSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_meals(meals: impl IntoIterator<Item = Meal>) -> Self {
        let mut set = Self::new();
        set.add_all(meals);
        set
    }

    pub fn len(&self) -> usize {
        self.meals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }

    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    pub fn get(&self, index: usize) -> Option<&Meal> {
        self.meals.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Meal> {
        self.meals.iter()
    }

    pub fn total_impact(&self) -> &ImpactVector {
        &self.total_impact
    }

    pub fn total_rating(&self) -> i32 {
        self.total_rating
    }

    /// Append a meal at the end.
    pub fn add(&mut self, meal: Meal) {
        self.total_impact = self.total_impact.add(meal.impact());
        self.total_rating += meal.rating();
        self.meals.push(meal);
    }

    pub fn add_all(&mut self, meals: impl IntoIterator<Item = Meal>) {
        for meal in meals {
            self.add(meal);
        }
    }

    /// Swap the meal at `index` for `meal`, returning the outgoing one.
    pub fn replace(&mut self, index: usize, meal: Meal) -> Result<Meal> {
        self.check_index(index)?;
        self.total_impact = self
            .total_impact
            .subtract(self.meals[index].impact())
            .add(meal.impact());
        self.total_rating += meal.rating() - self.meals[index].rating();
        Ok(std::mem::replace(&mut self.meals[index], meal))
    }

    /// Remove the meal at `index`, shifting later meals down.
    pub fn remove(&mut self, index: usize) -> Result<Meal> {
        self.check_index(index)?;
        let meal = self.meals.remove(index);
        self.total_impact = self.total_impact.subtract(meal.impact());
        self.total_rating -= meal.rating();
        Ok(meal)
    }

    /// Sum of member impacts computed from scratch, for verification.
    pub fn recomputed_impact(&self) -> ImpactVector {
        self.meals
            .iter()
            .fold(ImpactVector::zero(), |acc, m| acc.add(m.impact()))
    }

    /// Export lines, one per meal.
    pub fn export_lines(&self) -> Result<Vec<String>> {
        self.meals.iter().map(Meal::export_line).collect()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.meals.len() {
            return Err(EcoError::IndexOutOfRange {
                index,
                len: self.meals.len(),
            });
        }
        Ok(())
    }
}
