use thiserror::Error;

#[derive(Debug, Error)]
pub enum EcoError {
    #[error("Food not found: {0}")]
    FoodNotFound(String),

    #[error("Incomplete food tables: {}", .0.join("; "))]
    IncompleteTables(Vec<String>),

    #[error("Singular nutrient system for meal [{foods}]")]
    SingularSystem { foods: String },

    #[error("Meal [{0}] has no computed quantities")]
    UnsolvedMeal(String),

    #[error("Index {index} out of range for a meal set of {len} meals")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Number parse error: {0}")]
    ParseFloat(#[from] std::num::ParseFloatError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, EcoError>;
