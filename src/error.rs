use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("plan error: {0}")]
    Plan(#[from] mealplan::PlanError),

    #[error("storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("recipe error: {0}")]
    Recipe(#[from] recipe::RecipeError),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid date: {0}")]
    Date(#[from] chrono::ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
