use crate::error::StoreError;
use crate::model::FavoriteRecord;
use std::sync::Mutex;

/// Record collection underneath the favorites store
///
/// Implementations keep records in a stable natural order (insertion order
/// for the bundled backends) and make each call durable before returning.
pub trait FavoritesBackend: Send + Sync {
    /// Every stored record
    fn all(&self) -> Result<Vec<FavoriteRecord>, StoreError>;

    /// Store `record` under its uri as one atomic step
    ///
    /// When the uri is already stored, the existing record is replaced in
    /// place and keeps its id. Returns the record as stored.
    fn upsert_by_uri(&self, record: FavoriteRecord) -> Result<FavoriteRecord, StoreError>;

    /// Delete every record matching `predicate`, returning how many went
    fn delete_where(&self, predicate: &dyn Fn(&FavoriteRecord) -> bool)
        -> Result<usize, StoreError>;

    fn find_where(
        &self,
        predicate: &dyn Fn(&FavoriteRecord) -> bool,
    ) -> Result<Vec<FavoriteRecord>, StoreError> {
        Ok(self.all()?.into_iter().filter(|r| predicate(r)).collect())
    }
}

/// Replace the record sharing `record.uri` in place, or append it
fn replace_or_push(
    records: &mut Vec<FavoriteRecord>,
    mut record: FavoriteRecord,
) -> FavoriteRecord {
    match records.iter_mut().find(|r| r.uri == record.uri) {
        Some(existing) => {
            record.id = existing.id;
            *existing = record.clone();
        }
        None => records.push(record.clone()),
    }
    record
}

/// Volatile backend, for tests and previews
#[derive(Debug, Default)]
pub struct MemoryBackend {
    records: Mutex<Vec<FavoriteRecord>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FavoritesBackend for MemoryBackend {
    fn all(&self) -> Result<Vec<FavoriteRecord>, StoreError> {
        let records = self
            .records
            .lock()
            .map_err(|e| StoreError::Read(e.to_string()))?;
        Ok(records.clone())
    }

    fn upsert_by_uri(&self, record: FavoriteRecord) -> Result<FavoriteRecord, StoreError> {
        let mut records = self
            .records
            .lock()
            .map_err(|e| StoreError::Write(e.to_string()))?;
        Ok(replace_or_push(&mut records, record))
    }

    fn delete_where(
        &self,
        predicate: &dyn Fn(&FavoriteRecord) -> bool,
    ) -> Result<usize, StoreError> {
        let mut records = self
            .records
            .lock()
            .map_err(|e| StoreError::Write(e.to_string()))?;
        let before = records.len();
        records.retain(|r| !predicate(r));
        Ok(before - records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecipeDetails;

    fn record(uri: &str) -> FavoriteRecord {
        FavoriteRecord::from_details(&RecipeDetails {
            label: format!("Recipe {}", uri),
            image: None,
            ingredient_lines: vec![],
            calories: None,
            total_time: None,
            uri: uri.to_string(),
            url: String::new(),
        })
    }

    #[test]
    fn test_upsert_keeps_id_and_position() {
        let backend = MemoryBackend::new();
        let first = backend.upsert_by_uri(record("a")).unwrap();
        backend.upsert_by_uri(record("b")).unwrap();

        let mut renamed = record("a");
        renamed.label = "Renamed".to_string();
        let stored = backend.upsert_by_uri(renamed).unwrap();

        assert_eq!(stored.id, first.id);
        let all = backend.all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].label, "Renamed");
        assert_eq!(all[0].id, first.id);
        assert_eq!(all[1].uri, "b");
    }

    #[test]
    fn test_concurrent_upserts_of_one_uri_keep_one_record() {
        let backend = MemoryBackend::new();
        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..50 {
                        backend.upsert_by_uri(record("a")).unwrap();
                    }
                });
            }
        });
        assert_eq!(backend.all().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_and_find_where() {
        let backend = MemoryBackend::new();
        backend.upsert_by_uri(record("a")).unwrap();
        backend.upsert_by_uri(record("b")).unwrap();

        let found = backend.find_where(&|r| r.uri == "b").unwrap();
        assert_eq!(found.len(), 1);

        assert_eq!(backend.delete_where(&|r| r.uri == "a").unwrap(), 1);
        assert_eq!(backend.delete_where(&|r| r.uri == "a").unwrap(), 0);
        assert_eq!(backend.all().unwrap().len(), 1);
    }
}
