mod backend;
mod lmdb_backend;

pub use backend::{FavoritesBackend, MemoryBackend};
pub use lmdb_backend::LmdbBackend;

use crate::config::FavoritesConfig;
use crate::error::StoreError;
use crate::model::{FavoriteRecord, Recipe, RecipeDetails};
use log::{info, warn};
use std::path::PathBuf;

/// The user's favorite recipes, keyed by recipe `uri`
///
/// A recipe is a favorite exactly when a record with its uri exists.
/// `is_favorite` and `list_favorites` never fail: read errors are logged and
/// reported as "not a favorite" / "no favorites". Use the `try_` variants to
/// observe them.
pub struct FavoritesStore {
    backend: Box<dyn FavoritesBackend>,
}

impl FavoritesStore {
    pub fn new(backend: impl FavoritesBackend + 'static) -> Self {
        FavoritesStore {
            backend: Box::new(backend),
        }
    }

    /// Store that lives only as long as the process
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// Durable store in the LMDB directory at `path`
    ///
    /// Any number of stores may be open on the same directory, in this process
    /// or others. Their writes are serialized.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let backend = LmdbBackend::open(path)?;
        info!("Favorites store opened at {}", backend.path().display());
        Ok(Self::new(backend))
    }

    pub fn from_config(config: &FavoritesConfig) -> Result<Self, StoreError> {
        Self::open(config.path.clone())
    }

    pub fn is_favorite(&self, uri: &str) -> bool {
        self.try_is_favorite(uri).unwrap_or_else(|e| {
            warn!("Could not check favorite status of {}: {}", uri, e);
            false
        })
    }

    pub fn try_is_favorite(&self, uri: &str) -> Result<bool, StoreError> {
        Ok(!self.backend.find_where(&|r| r.uri == uri)?.is_empty())
    }

    /// Favorites in the store's natural order, as search-result shapes
    pub fn list_favorites(&self) -> Vec<Recipe> {
        self.try_list_favorites().unwrap_or_else(|e| {
            warn!("Could not list favorites: {}", e);
            Vec::new()
        })
    }

    pub fn try_list_favorites(&self) -> Result<Vec<Recipe>, StoreError> {
        Ok(self
            .backend
            .all()?
            .iter()
            .map(FavoriteRecord::to_recipe)
            .collect())
    }

    /// The stored record for `uri`, with everything needed to show it offline
    pub fn get_favorite(&self, uri: &str) -> Result<Option<FavoriteRecord>, StoreError> {
        Ok(self
            .backend
            .find_where(&|r| r.uri == uri)?
            .into_iter()
            .next())
    }

    /// Mark a recipe as favorite
    ///
    /// Adding a uri that is already stored refreshes its fields and keeps the
    /// original record id, so a uri never has two records.
    pub fn add_favorite(&self, details: &RecipeDetails) -> Result<FavoriteRecord, StoreError> {
        let record = self
            .backend
            .upsert_by_uri(FavoriteRecord::from_details(details))
            .map_err(|e| {
                warn!("Could not add {} to favorites: {}", details.uri, e);
                e
            })?;
        info!("Added '{}' to favorites", record.label);
        Ok(record)
    }

    /// Remove every record for `uri`. Unknown uris are a no-op.
    ///
    /// Returns how many records were removed.
    pub fn remove_favorite(&self, uri: &str) -> Result<usize, StoreError> {
        let removed = self.backend.delete_where(&|r| r.uri == uri).map_err(|e| {
            warn!("Could not remove {} from favorites: {}", uri, e);
            e
        })?;
        if removed > 0 {
            info!("Removed {} from favorites", uri);
        }
        Ok(removed)
    }
}
