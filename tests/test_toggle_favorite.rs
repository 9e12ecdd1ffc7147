use async_trait::async_trait;
use reciplease::{
    toggle_favorite, FavoritesStore, FetchError, Recipe, RecipeDetails, RecipeSource,
    RecipleaseError,
};
use std::sync::atomic::{AtomicUsize, Ordering};

const URI: &str = "http://www.edamam.com/ontologies/edamam.owl#recipe_abc123";

/// Source answering every detail request with the same recipe
#[derive(Default)]
struct StubSource {
    fail: bool,
    fetches: AtomicUsize,
}

#[async_trait]
impl RecipeSource for StubSource {
    async fn search_by_ingredients(
        &self,
        _ingredients: &[String],
    ) -> Result<Vec<Recipe>, FetchError> {
        Ok(Vec::new())
    }

    async fn fetch_by_uri(&self, uri: &str) -> Result<RecipeDetails, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(FetchError::HttpStatus { code: 503 });
        }
        Ok(RecipeDetails {
            label: "Pizza Margherita".to_string(),
            image: None,
            ingredient_lines: vec!["Tomate".to_string()],
            calories: Some(800.0),
            total_time: Some(30.0),
            uri: uri.to_string(),
            url: "https://example.com/pizza".to_string(),
        })
    }
}

#[tokio::test]
async fn test_toggle_adds_then_removes() {
    let source = StubSource::default();
    let store = FavoritesStore::in_memory();

    assert!(toggle_favorite(&source, &store, URI).await.unwrap());
    assert!(store.is_favorite(URI));
    assert_eq!(source.fetches.load(Ordering::SeqCst), 1);

    assert!(!toggle_favorite(&source, &store, URI).await.unwrap());
    assert!(!store.is_favorite(URI));
    // Removing needs no network
    assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_toggle_fetch_failure_leaves_store_untouched() {
    let source = StubSource {
        fail: true,
        ..Default::default()
    };
    let store = FavoritesStore::in_memory();

    let result = toggle_favorite(&source, &store, URI).await;

    assert!(matches!(
        result,
        Err(RecipleaseError::Fetch(FetchError::HttpStatus { code: 503 }))
    ));
    assert!(store.list_favorites().is_empty());
}
