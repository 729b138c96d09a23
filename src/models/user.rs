use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{EcoError, Result};
use crate::planner::constants::{BREAKFAST_SHARE, DINNER_SHARE, LUNCH_SHARE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Gender {
    #[value(name = "f")]
    Female,
    #[value(name = "m")]
    Male,
}

/// Physical activity level, mapped to a PAL multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Intense,
    VeryIntense,
}

impl ActivityLevel {
    pub fn pal(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.4,
            ActivityLevel::Light => 1.6,
            ActivityLevel::Moderate => 1.75,
            ActivityLevel::Intense => 1.9,
            ActivityLevel::VeryIntense => 2.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    pub const ALL: [MealSlot; 3] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];

    /// Share of the daily requirement allotted to this meal.
    pub fn share(self) -> f64 {
        match self {
            MealSlot::Breakfast => BREAKFAST_SHARE,
            MealSlot::Lunch => LUNCH_SHARE,
            MealSlot::Dinner => DINNER_SHARE,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
        }
    }
}

/// Inputs to the energy requirement estimate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Physiology {
    pub gender: Gender,
    pub age: u32,
    pub body_weight_kg: f64,
    pub height_cm: f64,
    pub activity: ActivityLevel,
}

impl Physiology {
    pub fn validate(&self) -> Result<()> {
        if self.age < 18 {
            return Err(EcoError::InvalidInput(format!(
                "age must be at least 18, got {}",
                self.age
            )));
        }
        if self.body_weight_kg <= 0.0 {
            return Err(EcoError::InvalidInput(format!(
                "body weight must be positive, got {}",
                self.body_weight_kg
            )));
        }
        if self.height_cm <= 0.0 {
            return Err(EcoError::InvalidInput(format!(
                "height must be positive, got {}",
                self.height_cm
            )));
        }
        Ok(())
    }

    /// Mifflin-St Jeor basal metabolic rate, kcal/day.
    pub fn basal_metabolic_rate(&self) -> Result<f64> {
        self.validate()?;
        let base = 10.0 * self.body_weight_kg + 6.25 * self.height_cm - 5.0 * self.age as f64;
        Ok(match self.gender {
            Gender::Female => base - 161.0,
            Gender::Male => base + 5.0,
        })
    }

    pub fn daily_energy_requirement(&self) -> Result<f64> {
        Ok(self.activity.pal() * self.basal_metabolic_rate()?)
    }

    pub fn meal_target(&self, slot: MealSlot) -> Result<f64> {
        Ok(slot.share() * self.daily_energy_requirement()?)
    }
}
