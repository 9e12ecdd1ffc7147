use reciplease::favorites::FavoritesBackend;
use reciplease::{FavoriteRecord, FavoritesStore, RecipeDetails, StoreError};
use std::path::PathBuf;
use uuid::Uuid;

fn details(uri: &str, label: &str) -> RecipeDetails {
    RecipeDetails {
        label: label.to_string(),
        image: Some("test_image_url".to_string()),
        ingredient_lines: vec!["Tomate".to_string(), "Oignon".to_string()],
        calories: Some(100.0),
        total_time: Some(20.0),
        uri: uri.to_string(),
        url: "https://example.com/directions".to_string(),
    }
}

fn temp_store_path() -> PathBuf {
    std::env::temp_dir().join(format!("reciplease-store-{}", Uuid::new_v4()))
}

/// Backend whose every operation fails, like a store that never loaded
struct BrokenBackend;

impl FavoritesBackend for BrokenBackend {
    fn all(&self) -> Result<Vec<FavoriteRecord>, StoreError> {
        Err(StoreError::Read("store not initialized".to_string()))
    }

    fn upsert_by_uri(&self, _record: FavoriteRecord) -> Result<FavoriteRecord, StoreError> {
        Err(StoreError::Write("disk full".to_string()))
    }

    fn delete_where(
        &self,
        _predicate: &dyn Fn(&FavoriteRecord) -> bool,
    ) -> Result<usize, StoreError> {
        Err(StoreError::Write("disk full".to_string()))
    }
}

#[test]
fn test_add_then_check_and_list() {
    let store = FavoritesStore::in_memory();

    store.add_favorite(&details("test_uri", "Test Recipe")).unwrap();

    assert!(store.is_favorite("test_uri"));
    let favorites = store.list_favorites();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].label, "Test Recipe");
    assert_eq!(favorites[0].calories, Some(100.0));
    assert_eq!(favorites[0].total_time, Some(20.0));
    assert_eq!(favorites[0].ingredient_lines, vec!["Tomate", "Oignon"]);
}

#[test]
fn test_unknown_uri_is_not_favorite() {
    let store = FavoritesStore::in_memory();
    assert!(!store.is_favorite("never_added"));

    store.add_favorite(&details("test_uri", "Test Recipe")).unwrap();
    assert!(!store.is_favorite("never_added"));
}

#[test]
fn test_favorite_state_transitions() {
    let store = FavoritesStore::in_memory();

    assert!(!store.is_favorite("test_uri"));
    store.add_favorite(&details("test_uri", "Test Recipe")).unwrap();
    assert!(store.is_favorite("test_uri"));
    assert_eq!(store.remove_favorite("test_uri").unwrap(), 1);
    assert!(!store.is_favorite("test_uri"));
    assert!(store.list_favorites().is_empty());
}

#[test]
fn test_list_grows_and_shrinks_by_one() {
    let store = FavoritesStore::in_memory();

    for (i, uri) in ["a", "b", "c"].iter().enumerate() {
        store.add_favorite(&details(uri, "Recipe")).unwrap();
        assert_eq!(store.list_favorites().len(), i + 1);
    }

    store.remove_favorite("b").unwrap();
    assert_eq!(store.list_favorites().len(), 2);
}

#[test]
fn test_list_keeps_insertion_order() {
    let store = FavoritesStore::in_memory();
    store.add_favorite(&details("first", "First")).unwrap();
    store.add_favorite(&details("second", "Second")).unwrap();
    store.add_favorite(&details("third", "Third")).unwrap();

    let labels: Vec<String> = store.list_favorites().into_iter().map(|r| r.label).collect();
    assert_eq!(labels, vec!["First", "Second", "Third"]);
}

#[test]
fn test_remove_unknown_uri_is_a_noop() {
    let store = FavoritesStore::in_memory();
    store.add_favorite(&details("test_uri", "Test Recipe")).unwrap();

    assert_eq!(store.remove_favorite("other_uri").unwrap(), 0);
    assert_eq!(store.list_favorites().len(), 1);
}

#[test]
fn test_adding_same_uri_twice_keeps_one_record() {
    let store = FavoritesStore::in_memory();

    let first = store.add_favorite(&details("test_uri", "Old Label")).unwrap();
    let second = store.add_favorite(&details("test_uri", "New Label")).unwrap();

    assert_eq!(first.id, second.id);
    let favorites = store.list_favorites();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].label, "New Label");
}

#[test]
fn test_get_favorite_keeps_directions() {
    let store = FavoritesStore::in_memory();
    assert!(store.get_favorite("test_uri").unwrap().is_none());

    let added = store.add_favorite(&details("test_uri", "Test Recipe")).unwrap();
    let record = store.get_favorite("test_uri").unwrap().unwrap();

    assert_eq!(record, added);
    assert!(record.is_favorite);
    assert_eq!(record.url, "https://example.com/directions");
    assert_eq!(record.details(), details("test_uri", "Test Recipe"));
}

#[test]
fn test_broken_backend_reads_fail_safe() {
    let store = FavoritesStore::new(BrokenBackend);

    assert!(!store.is_favorite("test_uri"));
    assert!(store.list_favorites().is_empty());

    assert!(matches!(
        store.try_is_favorite("test_uri"),
        Err(StoreError::Read(_))
    ));
    assert!(matches!(store.try_list_favorites(), Err(StoreError::Read(_))));
}

#[test]
fn test_broken_backend_writes_are_reported() {
    let store = FavoritesStore::new(BrokenBackend);

    assert!(store
        .add_favorite(&details("test_uri", "Test Recipe"))
        .is_err());
    assert!(matches!(
        store.remove_favorite("test_uri"),
        Err(StoreError::Write(_))
    ));
}

#[test]
fn test_favorites_survive_restart() {
    let path = temp_store_path();
    {
        let store = FavoritesStore::open(&path).unwrap();
        store.add_favorite(&details("test_uri", "Test Recipe")).unwrap();
        store.add_favorite(&details("other_uri", "Other Recipe")).unwrap();
        store.remove_favorite("other_uri").unwrap();
    }

    let store = FavoritesStore::open(&path).unwrap();
    assert!(store.is_favorite("test_uri"));
    assert!(!store.is_favorite("other_uri"));
    assert_eq!(store.list_favorites().len(), 1);
}

#[test]
fn test_open_from_config() {
    let config = reciplease::FavoritesConfig {
        path: temp_store_path(),
    };
    let store = FavoritesStore::from_config(&config).unwrap();
    assert!(store.list_favorites().is_empty());
}

#[test]
fn test_second_handle_sees_writes_immediately() {
    let path = temp_store_path();
    let writer = FavoritesStore::open(&path).unwrap();
    let reader = FavoritesStore::open(&path).unwrap();

    writer.add_favorite(&details("test_uri", "Test Recipe")).unwrap();
    assert!(reader.is_favorite("test_uri"));

    reader.remove_favorite("test_uri").unwrap();
    assert!(!writer.is_favorite("test_uri"));
}

#[test]
fn test_concurrent_adds_through_two_handles_are_all_kept() {
    let path = temp_store_path();
    let stores = [
        FavoritesStore::open(&path).unwrap(),
        FavoritesStore::open(&path).unwrap(),
    ];

    std::thread::scope(|s| {
        for (n, store) in stores.iter().enumerate() {
            s.spawn(move || {
                for i in 0..100 {
                    let uri = format!("uri_{}_{}", n, i);
                    store.add_favorite(&details(&uri, "Recipe")).unwrap();
                }
            });
        }
    });

    for store in &stores {
        assert_eq!(store.try_list_favorites().unwrap().len(), 200);
    }
    drop(stores);

    let reopened = FavoritesStore::open(&path).unwrap();
    assert_eq!(reopened.try_list_favorites().unwrap().len(), 200);
}

#[test]
fn test_concurrent_adds_of_the_same_uris_never_duplicate() {
    let path = temp_store_path();
    let stores = [
        FavoritesStore::open(&path).unwrap(),
        FavoritesStore::open(&path).unwrap(),
    ];

    std::thread::scope(|s| {
        for store in &stores {
            s.spawn(move || {
                for i in 0..100 {
                    let uri = format!("uri_{}", i);
                    store.add_favorite(&details(&uri, "Recipe")).unwrap();
                }
            });
        }
    });

    let favorites = stores[0].try_list_favorites().unwrap();
    assert_eq!(favorites.len(), 100);
    for i in 0..100 {
        let uri = format!("uri_{}", i);
        assert_eq!(favorites.iter().filter(|r| r.uri == uri).count(), 1);
    }
}

#[test]
fn test_concurrent_adds_of_one_uri_keep_one_record() {
    let stores = [
        FavoritesStore::in_memory(),
        FavoritesStore::open(temp_store_path()).unwrap(),
    ];

    for store in &stores {
        let ids: Vec<Uuid> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    s.spawn(move || {
                        store
                            .add_favorite(&details("test_uri", "Test Recipe"))
                            .unwrap()
                            .id
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(store.list_favorites().len(), 1);
        let stored = store.get_favorite("test_uri").unwrap().unwrap();
        assert!(ids.iter().all(|id| *id == stored.id));
    }
}
