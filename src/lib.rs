//! Recipe data access for the Reciplease app
//!
//! Two independent parts:
//! - [`SearchClient`] looks recipes up on the remote recipe API, by
//!   ingredients or by recipe uri.
//! - [`FavoritesStore`] keeps the user's favorite recipes on the device.
//!
//! They only share the [`Recipe`] and [`RecipeDetails`] shapes.

pub mod config;
pub mod error;
pub mod favorites;
pub mod ingredients;
pub mod model;
pub mod search;
pub mod uniffi_bindings;

pub use config::{ApiConfig, FavoritesConfig, RecipleaseConfig};
pub use error::{FetchError, RecipleaseError, StoreError};
pub use favorites::FavoritesStore;
pub use ingredients::IngredientList;
pub use model::{FavoriteRecord, Recipe, RecipeDetails, RecipeSummary};
pub use search::{RecipeSource, SearchClient};

use log::debug;

/// Flip the favorite status of the recipe behind `uri`
///
/// A favorite is removed. Anything else has its details fetched from
/// `source` and is stored. Returns the new status.
///
/// `uri` must be the recipe uri as issued by the API, since that is the key
/// favorites are stored under.
///
/// # Example
/// ```no_run
/// # use reciplease::{toggle_favorite, ApiConfig, FavoritesStore, SearchClient};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = SearchClient::new(&ApiConfig::new("app-id", "app-key"))?;
/// let store = FavoritesStore::open("favorites.lmdb")?;
/// let now_favorite = toggle_favorite(
///     &client,
///     &store,
///     "http://www.edamam.com/ontologies/edamam.owl#recipe_abc123",
/// ).await?;
/// # Ok(())
/// # }
/// ```
pub async fn toggle_favorite(
    source: &dyn RecipeSource,
    store: &FavoritesStore,
    uri: &str,
) -> Result<bool, RecipleaseError> {
    if store.try_is_favorite(uri)? {
        store.remove_favorite(uri)?;
        return Ok(false);
    }

    debug!("Fetching {} before adding it to favorites", uri);
    let details = source.fetch_by_uri(uri).await?;
    store.add_favorite(&details)?;
    Ok(true)
}

/// Search recipes with configuration loaded from file and environment
///
/// See [`RecipleaseConfig::load`] for where configuration comes from.
pub async fn search_recipes(ingredients: &IngredientList) -> Result<Vec<Recipe>, RecipleaseError> {
    let config = RecipleaseConfig::load()?;
    let client = SearchClient::new(&config.api)?;
    Ok(client.search_by_ingredients(ingredients.as_slice()).await?)
}
