mod client;
mod response;

pub use client::{recipe_id, SearchClient, ACCOUNT_USER_HEADER};
pub use response::{RecipeDetailsResponse, RecipeHit, SearchResponse};

use crate::error::FetchError;
use crate::model::{Recipe, RecipeDetails};
use async_trait::async_trait;

/// Anything that can look recipes up remotely
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Recipes matching all the given ingredients, in the order the source ranks them
    async fn search_by_ingredients(&self, ingredients: &[String])
        -> Result<Vec<Recipe>, FetchError>;

    /// Full details for one recipe, by uri or bare recipe id
    async fn fetch_by_uri(&self, uri: &str) -> Result<RecipeDetails, FetchError>;
}
