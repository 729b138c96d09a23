use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{EcoError, Result};
use crate::models::{FoodCategory, ImpactDimension, ImpactVector};
use crate::planner::aggregator::Ratings;
use crate::planner::constants::MAX_RATING;
use crate::state::tables::FoodTables;

/// A value the pipeline needs from its caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SettingKey {
    /// Impact budget for one dimension.
    Threshold(ImpactDimension),
    /// Serving size of an extra, in retail units.
    ExtraServing(String),
    /// Rating (0 to 5) of a food.
    Rating(String),
}

impl SettingKey {
    /// Stable key used in the settings file.
    pub fn cache_key(&self) -> String {
        match self {
            SettingKey::Threshold(dim) => format!("threshold.{}", dim.key()),
            SettingKey::ExtraServing(food) => format!("serving.{}", food.to_lowercase()),
            SettingKey::Rating(food) => format!("rating.{}", food.to_lowercase()),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            SettingKey::Threshold(dim) => format!("{} threshold ({})", dim.label(), dim.unit()),
            SettingKey::ExtraServing(food) => format!("Serving of {} (kg or L)", food),
            SettingKey::Rating(food) => format!("Rating of {} (0-{})", food, MAX_RATING),
        }
    }
}

/// Source of caller-provided values. The core never knows how a value was obtained.
pub trait ConfigSupplier {
    fn supply(&mut self, key: &SettingKey) -> Result<f64>;
}

/// Fixed in-memory values with an optional fallback for unknown keys.
#[derive(Debug, Clone, Default)]
pub struct StaticSupplier {
    values: HashMap<SettingKey, f64>,
    fallback: Option<f64>,
}

impl StaticSupplier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: SettingKey, value: f64) -> Self {
        self.values.insert(key, value);
        self
    }

    pub fn with_threshold(mut self, threshold: &ImpactVector) -> Self {
        for dim in ImpactDimension::ALL {
            self.values.insert(SettingKey::Threshold(dim), threshold.get(dim));
        }
        self
    }

    pub fn with_fallback(mut self, value: f64) -> Self {
        self.fallback = Some(value);
        self
    }
}

impl ConfigSupplier for StaticSupplier {
    fn supply(&mut self, key: &SettingKey) -> Result<f64> {
        self.values
            .get(key)
            .copied()
            .or(self.fallback)
            .ok_or_else(|| EcoError::InvalidInput(format!("no value for {}", key.cache_key())))
    }
}

/// Remembers supplied values in a JSON settings file.
///
/// With `reuse` set, a cached value is returned without asking the inner
/// supplier. Every value obtained from the inner supplier is written back.
pub struct CachedSupplier<S> {
    inner: S,
    path: PathBuf,
    reuse: bool,
    cache: BTreeMap<String, f64>,
}

impl<S: ConfigSupplier> CachedSupplier<S> {
    /// Open the settings file. A missing file starts an empty cache.
    pub fn open<P: AsRef<Path>>(path: P, reuse: bool, inner: S) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let cache = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            BTreeMap::new()
        };
        debug!(path = %path.display(), entries = cache.len(), reuse, "Opened settings cache");
        Ok(Self {
            inner,
            path,
            reuse,
            cache,
        })
    }

    pub fn cached(&self, key: &SettingKey) -> Option<f64> {
        self.cache.get(&key.cache_key()).copied()
    }

    pub fn save(&self) -> Result<()> {
        fs::write(&self.path, serde_json::to_string_pretty(&self.cache)?)?;
        Ok(())
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: ConfigSupplier> ConfigSupplier for CachedSupplier<S> {
    fn supply(&mut self, key: &SettingKey) -> Result<f64> {
        if self.reuse {
            if let Some(value) = self.cached(key) {
                return Ok(value);
            }
        }
        let value = self.inner.supply(key)?;
        self.cache.insert(key.cache_key(), value);
        self.save()?;
        Ok(value)
    }
}

/// Ask for all five threshold components.
pub fn supply_thresholds(supplier: &mut dyn ConfigSupplier) -> Result<ImpactVector> {
    let mut values = [0.0; 5];
    for dim in ImpactDimension::ALL {
        let value = supplier.supply(&SettingKey::Threshold(dim))?;
        if !(value >= 0.0 && value.is_finite()) {
            return Err(EcoError::InvalidInput(format!(
                "{} threshold must be a non-negative number, got {}",
                dim.label(),
                value
            )));
        }
        values[dim.index()] = value;
    }
    Ok(ImpactVector::from_array(values))
}

/// Ask for the serving size of every extra and store it in the tables.
pub fn supply_extra_servings(
    supplier: &mut dyn ConfigSupplier,
    tables: &mut FoodTables,
) -> Result<()> {
    let extras = tables.categories().get(FoodCategory::Extra).to_vec();
    for name in extras {
        let serving = supplier.supply(&SettingKey::ExtraServing(name.clone()))?;
        if !(serving >= 0.0 && serving.is_finite()) {
            return Err(EcoError::InvalidInput(format!(
                "serving of {} must be non-negative, got {}",
                name, serving
            )));
        }
        tables.set_extra_serving(&name, serving);
    }
    Ok(())
}

/// Ask for a 0 to 5 rating of every food.
pub fn supply_ratings(supplier: &mut dyn ConfigSupplier, tables: &FoodTables) -> Result<Ratings> {
    let mut ratings = Ratings::new();
    for name in tables.food_names() {
        let value = supplier.supply(&SettingKey::Rating(name.clone()))?;
        if value.fract() != 0.0 || !(0.0..=MAX_RATING as f64).contains(&value) {
            return Err(EcoError::InvalidInput(format!(
                "rating of {} must be an integer from 0 to {}, got {}",
                name, MAX_RATING, value
            )));
        }
        ratings.insert(name.to_lowercase(), value as u8);
    }
    Ok(ratings)
}
