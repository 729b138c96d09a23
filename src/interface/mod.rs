pub mod prompts;
pub mod render;

pub use prompts::{PromptSupplier, prompt_number, prompt_rating, prompt_yes_no, resolve_food_name};
pub use render::{
    display_energy, display_enumeration, display_food_tables, display_impact,
    display_impact_ranges, display_meal, display_meal_sets, display_schedule,
};
