mod defaults;
mod persistence;
pub mod settings;
mod tables;

pub use defaults::default_tables;
pub use persistence::{
    export_meal_sets, load_food_records, load_impact_record, load_tables, save_food_records,
    save_impact_record, write_catalog_csv,
};
pub use settings::{
    CachedSupplier, ConfigSupplier, SettingKey, StaticSupplier, supply_extra_servings,
    supply_ratings, supply_thresholds,
};
pub use tables::{CategoryLists, FoodTables};
