use crate::model::{Recipe, RecipeDetails};
use serde::Deserialize;

/// Body of `GET /api/recipes/v2`
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub hits: Vec<RecipeHit>,
}

#[derive(Debug, Deserialize)]
pub struct RecipeHit {
    pub recipe: Recipe,
}

impl SearchResponse {
    pub fn into_recipes(self) -> Vec<Recipe> {
        self.hits.into_iter().map(|hit| hit.recipe).collect()
    }
}

/// Body of `GET /api/recipes/v2/{id}`
#[derive(Debug, Deserialize)]
pub struct RecipeDetailsResponse {
    pub recipe: RecipeDetails,
}
