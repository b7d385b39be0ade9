pub mod error;
pub mod index;
pub mod model;
pub mod source;

pub use error::RecipeError;
pub use index::RecipeIndex;
pub use model::Recipe;
pub use source::{InMemoryRecipeSource, JsonFileRecipeSource, RecipeSource};
