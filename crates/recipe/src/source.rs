use std::fs;
use std::path::PathBuf;

use crate::error::RecipeError;
use crate::model::Recipe;

/// Recipe lookup collaborator for the meal planner.
pub trait RecipeSource {
    fn recipes_for_meal_plan(&self, member_id: &str) -> Result<Vec<Recipe>, RecipeError>;
}

/// Fixed recipe list, used in tests and fixtures.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRecipeSource {
    recipes: Vec<Recipe>,
}

impl InMemoryRecipeSource {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }
}

impl RecipeSource for InMemoryRecipeSource {
    fn recipes_for_meal_plan(&self, _member_id: &str) -> Result<Vec<Recipe>, RecipeError> {
        Ok(self.recipes.clone())
    }
}

/// Recipe catalog read from a JSON file (an array of recipes).
///
/// The catalog is household-wide; the member id does not select a
/// different file. A missing catalog is an empty one.
pub struct JsonFileRecipeSource {
    path: PathBuf,
}

impl JsonFileRecipeSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecipeSource for JsonFileRecipeSource {
    fn recipes_for_meal_plan(&self, _member_id: &str) -> Result<Vec<Recipe>, RecipeError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no recipe catalog, lookups will be empty");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(RecipeError::CatalogRead {
                    path: self.path.display().to_string(),
                    source,
                });
            }
        };
        serde_json::from_str(&raw).map_err(|source| RecipeError::CatalogParse {
            path: self.path.display().to_string(),
            source,
        })
    }
}
