//! UniFFI bindings for reciplease
//!
//! This module provides FFI-compatible types and functions for use with iOS and Android.
//! It wraps the async Rust API with synchronous functions that manage their own tokio runtime.

use std::fmt;
use std::sync::Arc;

use crate::{
    ApiConfig, FavoriteRecord, FavoritesStore, FetchError, Recipe, RecipeDetails, SearchClient,
    StoreError,
};

// Re-export UniFFI macro
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();

/// FFI-compatible search result
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiRecipe {
    pub label: String,
    pub image: Option<String>,
    pub ingredient_lines: Vec<String>,
    /// Minutes
    pub total_time: Option<f64>,
    pub uri: String,
    pub calories: Option<f64>,
}

impl From<Recipe> for FfiRecipe {
    fn from(recipe: Recipe) -> Self {
        FfiRecipe {
            label: recipe.label,
            image: recipe.image,
            ingredient_lines: recipe.ingredient_lines,
            total_time: recipe.total_time,
            uri: recipe.uri,
            calories: recipe.calories,
        }
    }
}

/// FFI-compatible single recipe
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiRecipeDetails {
    pub label: String,
    pub image: Option<String>,
    pub ingredient_lines: Vec<String>,
    pub calories: Option<f64>,
    pub total_time: Option<f64>,
    pub uri: String,
    /// Directions page, empty when unavailable
    pub url: String,
}

impl From<RecipeDetails> for FfiRecipeDetails {
    fn from(details: RecipeDetails) -> Self {
        FfiRecipeDetails {
            label: details.label,
            image: details.image,
            ingredient_lines: details.ingredient_lines,
            calories: details.calories,
            total_time: details.total_time,
            uri: details.uri,
            url: details.url,
        }
    }
}

impl From<FfiRecipeDetails> for RecipeDetails {
    fn from(ffi: FfiRecipeDetails) -> Self {
        RecipeDetails {
            label: ffi.label,
            image: ffi.image,
            ingredient_lines: ffi.ingredient_lines,
            calories: ffi.calories,
            total_time: ffi.total_time,
            uri: ffi.uri,
            url: ffi.url,
        }
    }
}

impl From<FavoriteRecord> for FfiRecipeDetails {
    fn from(record: FavoriteRecord) -> Self {
        record.details().into()
    }
}

/// API settings passed from the host app
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiApiConfig {
    pub app_id: String,
    pub app_key: String,
    /// Optional API host (uses the public API if not specified)
    pub base_url: Option<String>,
    /// Optional `Edamam-Account-User` value (uses "Reciplease" if not specified)
    pub account_user: Option<String>,
    /// Optional timeout in seconds (uses default if not specified)
    pub timeout_seconds: Option<u64>,
}

impl From<FfiApiConfig> for ApiConfig {
    fn from(ffi: FfiApiConfig) -> Self {
        let mut config = ApiConfig::new(ffi.app_id, ffi.app_key);
        if let Some(base_url) = ffi.base_url {
            config.base_url = base_url;
        }
        if let Some(account_user) = ffi.account_user {
            config.account_user = account_user;
        }
        if let Some(timeout) = ffi.timeout_seconds {
            config.timeout = timeout;
        }
        config
    }
}

/// FFI-compatible error type
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error))]
pub enum FfiRecipleaseError {
    /// Network failure before a response arrived
    Transport { message: String },
    /// The API answered with a non-2xx status
    HttpStatus { code: u16 },
    /// The API response did not have the expected shape
    Decode { message: String },
    /// Stored favorites could not be read
    StoreRead { message: String },
    /// Favorites could not be written
    StoreWrite { message: String },
    /// Invalid client configuration
    Config { message: String },
    /// Runtime error (tokio)
    Runtime { message: String },
}

impl fmt::Display for FfiRecipleaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FfiRecipleaseError::Transport { message } => write!(f, "Transport error: {}", message),
            FfiRecipleaseError::HttpStatus { code } => write!(f, "Unexpected HTTP status: {}", code),
            FfiRecipleaseError::Decode { message } => write!(f, "Decode error: {}", message),
            FfiRecipleaseError::StoreRead { message } => write!(f, "Store read error: {}", message),
            FfiRecipleaseError::StoreWrite { message } => {
                write!(f, "Store write error: {}", message)
            }
            FfiRecipleaseError::Config { message } => write!(f, "Config error: {}", message),
            FfiRecipleaseError::Runtime { message } => write!(f, "Runtime error: {}", message),
        }
    }
}

impl std::error::Error for FfiRecipleaseError {}

impl From<FetchError> for FfiRecipleaseError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Transport(e) => FfiRecipleaseError::Transport {
                message: e.to_string(),
            },
            FetchError::HttpStatus { code } => FfiRecipleaseError::HttpStatus { code },
            FetchError::Decode(e) => FfiRecipleaseError::Decode {
                message: e.to_string(),
            },
        }
    }
}

impl From<StoreError> for FfiRecipleaseError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Read(message) => FfiRecipleaseError::StoreRead { message },
            StoreError::Write(message) => FfiRecipleaseError::StoreWrite { message },
        }
    }
}

impl From<crate::RecipleaseError> for FfiRecipleaseError {
    fn from(err: crate::RecipleaseError) -> Self {
        match err {
            crate::RecipleaseError::Fetch(e) => e.into(),
            crate::RecipleaseError::Store(e) => e.into(),
            other => FfiRecipleaseError::Config {
                message: other.to_string(),
            },
        }
    }
}

/// Create a new tokio runtime for FFI calls
fn create_runtime() -> Result<tokio::runtime::Runtime, FfiRecipleaseError> {
    tokio::runtime::Runtime::new().map_err(|e| FfiRecipleaseError::Runtime {
        message: format!("Failed to create async runtime: {}", e),
    })
}

/// Search recipes containing all the given ingredients
///
/// # Arguments
/// * `config` - API credentials and settings
/// * `ingredients` - Ingredients typed by the user
///
/// # Returns
/// The matching recipes in the API's ranking order. An empty list is a
/// successful search with no match.
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn search_recipes_by_ingredients(
    config: FfiApiConfig,
    ingredients: Vec<String>,
) -> Result<Vec<FfiRecipe>, FfiRecipleaseError> {
    let config: ApiConfig = config.into();
    let client = SearchClient::new(&config)?;
    let rt = create_runtime()?;
    let recipes = rt.block_on(client.search_by_ingredients(ingredients.as_slice()))?;
    Ok(recipes.into_iter().map(FfiRecipe::from).collect())
}

/// Fetch the details of one recipe
///
/// # Arguments
/// * `config` - API credentials and settings
/// * `uri` - Recipe uri from a search result, or a bare recipe id
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn fetch_recipe_details(
    config: FfiApiConfig,
    uri: String,
) -> Result<FfiRecipeDetails, FfiRecipleaseError> {
    let config: ApiConfig = config.into();
    let client = SearchClient::new(&config)?;
    let rt = create_runtime()?;
    let details = rt.block_on(client.fetch_by_uri(&uri))?;
    Ok(details.into())
}

/// Recipe id part of a recipe uri
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn recipe_id_from_uri(uri: String) -> String {
    crate::search::recipe_id(&uri).to_string()
}

/// Get the library version
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Favorites store handle for the host app
#[cfg_attr(feature = "uniffi", derive(uniffi::Object))]
pub struct FfiFavorites {
    store: FavoritesStore,
}

#[cfg_attr(feature = "uniffi", uniffi::export)]
impl FfiFavorites {
    /// Open (or create) the favorites store directory at `path`
    #[cfg_attr(feature = "uniffi", uniffi::constructor)]
    pub fn open(path: String) -> Result<Arc<Self>, FfiRecipleaseError> {
        Ok(Arc::new(FfiFavorites {
            store: FavoritesStore::open(path)?,
        }))
    }

    /// Volatile store, for previews and UI tests
    #[cfg_attr(feature = "uniffi", uniffi::constructor)]
    pub fn in_memory() -> Arc<Self> {
        Arc::new(FfiFavorites {
            store: FavoritesStore::in_memory(),
        })
    }

    pub fn is_favorite(&self, uri: String) -> bool {
        self.store.is_favorite(&uri)
    }

    pub fn list_favorites(&self) -> Vec<FfiRecipe> {
        self.store
            .list_favorites()
            .into_iter()
            .map(FfiRecipe::from)
            .collect()
    }

    pub fn get_favorite(&self, uri: String) -> Result<Option<FfiRecipeDetails>, FfiRecipleaseError> {
        Ok(self.store.get_favorite(&uri)?.map(FfiRecipeDetails::from))
    }

    pub fn add_favorite(&self, details: FfiRecipeDetails) -> Result<(), FfiRecipleaseError> {
        let details: RecipeDetails = details.into();
        self.store.add_favorite(&details)?;
        Ok(())
    }

    /// Returns how many records were removed (0 or 1)
    pub fn remove_favorite(&self, uri: String) -> Result<u32, FfiRecipleaseError> {
        let removed = self.store.remove_favorite(&uri)?;
        Ok(removed as u32)
    }
}
