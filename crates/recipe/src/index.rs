use std::collections::HashMap;

use crate::model::Recipe;

/// Exact-name recipe lookup.
///
/// Slot items are matched against recipe names case-sensitively; a miss is
/// not an error, it simply means "no protein data, no prep flag" for that
/// item.
#[derive(Debug, Default, Clone)]
pub struct RecipeIndex {
    by_name: HashMap<String, Recipe>,
}

impl RecipeIndex {
    pub fn new(recipes: impl IntoIterator<Item = Recipe>) -> Self {
        let by_name = recipes
            .into_iter()
            .map(|recipe| (recipe.name.clone(), recipe))
            .collect();
        RecipeIndex { by_name }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Recipe> {
        self.by_name.get(name)
    }

    pub fn protein_for(&self, name: &str) -> Option<f64> {
        self.by_name.get(name).and_then(|recipe| recipe.protein)
    }

    pub fn requires_prep(&self, name: &str) -> bool {
        self.by_name
            .get(name)
            .map(|recipe| recipe.requires_prep)
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
