use crate::error::StoreError;
use crate::favorites::backend::FavoritesBackend;
use crate::model::FavoriteRecord;
use lmdb::{Cursor, Database, DatabaseFlags, Environment, Transaction, WriteFlags};
use log::{debug, info};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, Weak};

const FORMAT_VERSION: &str = "1";
const FORMAT_VERSION_KEY: &str = "format_version";
const RECORDS_DB: &str = "favorites";
const META_DB: &str = "meta";
const MAP_SIZE: usize = 16 * 1024 * 1024;

/// An open LMDB environment with its named databases
///
/// LMDB allows one environment per file per process, so every backend on the
/// same directory shares one of these through [`shared_environment`].
struct FavoritesEnv {
    env: Environment,
    // seq (u64 big-endian) -> JSON record; key order is insertion order
    records: Database,
    meta: Database,
}

impl FavoritesEnv {
    fn open(dir: &Path) -> Result<Self, StoreError> {
        let env = Environment::new()
            .set_max_dbs(2)
            .set_map_size(MAP_SIZE)
            .open(dir)
            .map_err(|e| read_error(dir, e))?;
        let records = env
            .create_db(Some(RECORDS_DB), DatabaseFlags::empty())
            .map_err(|e| read_error(dir, e))?;
        let meta = env
            .create_db(Some(META_DB), DatabaseFlags::empty())
            .map_err(|e| read_error(dir, e))?;

        let shared = FavoritesEnv { env, records, meta };
        shared.check_format(dir)?;
        Ok(shared)
    }

    fn check_format(&self, dir: &Path) -> Result<(), StoreError> {
        let mut txn = self.env.begin_rw_txn().map_err(|e| write_error(dir, e))?;
        match txn.get(self.meta, &FORMAT_VERSION_KEY) {
            Ok(version) if version == FORMAT_VERSION.as_bytes() => return Ok(()),
            Ok(version) => {
                return Err(StoreError::Read(format!(
                    "{} has unsupported format version {}",
                    dir.display(),
                    String::from_utf8_lossy(version)
                )))
            }
            Err(lmdb::Error::NotFound) => {}
            Err(e) => return Err(read_error(dir, e)),
        }

        txn.put(
            self.meta,
            &FORMAT_VERSION_KEY,
            &FORMAT_VERSION,
            WriteFlags::empty(),
        )
        .map_err(|e| write_error(dir, e))?;
        txn.commit().map_err(|e| write_error(dir, e))?;
        info!("Initialized favorites store at {}", dir.display());
        Ok(())
    }
}

fn shared_environment(dir: &Path) -> Result<Arc<FavoritesEnv>, StoreError> {
    static OPEN: OnceLock<Mutex<HashMap<PathBuf, Weak<FavoritesEnv>>>> = OnceLock::new();

    let mut open = OPEN
        .get_or_init(Default::default)
        .lock()
        .map_err(|e| StoreError::Read(e.to_string()))?;
    if let Some(shared) = open.get(dir).and_then(Weak::upgrade) {
        debug!("Reusing open favorites store at {}", dir.display());
        return Ok(shared);
    }

    let shared = Arc::new(FavoritesEnv::open(dir)?);
    open.insert(dir.to_path_buf(), Arc::downgrade(&shared));
    Ok(shared)
}

/// Durable backend on an LMDB environment directory
///
/// Every mutation runs in one write transaction. LMDB admits a single writer
/// at a time across threads and processes, so concurrent handles on the same
/// directory never overwrite each other's commits.
pub struct LmdbBackend {
    path: PathBuf,
    shared: Arc<FavoritesEnv>,
}

impl LmdbBackend {
    /// Open the store directory at `path`, creating it when missing
    ///
    /// An unreadable store or one written in an unknown format is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        fs::create_dir_all(&path)
            .map_err(|e| StoreError::Write(format!("cannot create {}: {}", path.display(), e)))?;
        let path = fs::canonicalize(&path)
            .map_err(|e| StoreError::Read(format!("{}: {}", path.display(), e)))?;

        let shared = shared_environment(&path)?;
        Ok(Self { path, shared })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_error(&self, e: lmdb::Error) -> StoreError {
        read_error(&self.path, e)
    }

    fn write_error(&self, e: lmdb::Error) -> StoreError {
        write_error(&self.path, e)
    }
}

impl FavoritesBackend for LmdbBackend {
    fn all(&self) -> Result<Vec<FavoriteRecord>, StoreError> {
        let txn = self
            .shared
            .env
            .begin_ro_txn()
            .map_err(|e| self.read_error(e))?;
        let records = scan(&txn, self.shared.records, &self.path)?;
        Ok(records.into_iter().map(|(_, record)| record).collect())
    }

    fn upsert_by_uri(&self, mut record: FavoriteRecord) -> Result<FavoriteRecord, StoreError> {
        let db = self.shared.records;
        let mut txn = self
            .shared
            .env
            .begin_rw_txn()
            .map_err(|e| self.write_error(e))?;

        let stored = scan(&txn, db, &self.path)?;
        let seq = match stored.iter().find(|(_, r)| r.uri == record.uri) {
            Some((seq, existing)) => {
                record.id = existing.id;
                *seq
            }
            None => stored.last().map_or(0, |(seq, _)| seq + 1),
        };

        let value = serde_json::to_vec(&record).map_err(|e| StoreError::Write(e.to_string()))?;
        txn.put(db, &seq.to_be_bytes(), &value, WriteFlags::empty())
            .map_err(|e| self.write_error(e))?;
        txn.commit().map_err(|e| self.write_error(e))?;

        debug!("Stored {} at position {}", record.uri, seq);
        Ok(record)
    }

    fn delete_where(
        &self,
        predicate: &dyn Fn(&FavoriteRecord) -> bool,
    ) -> Result<usize, StoreError> {
        let db = self.shared.records;
        let mut txn = self
            .shared
            .env
            .begin_rw_txn()
            .map_err(|e| self.write_error(e))?;

        let doomed: Vec<u64> = scan(&txn, db, &self.path)?
            .into_iter()
            .filter(|(_, record)| predicate(record))
            .map(|(seq, _)| seq)
            .collect();
        if doomed.is_empty() {
            txn.abort();
            return Ok(0);
        }

        for seq in &doomed {
            txn.del(db, &seq.to_be_bytes(), None)
                .map_err(|e| self.write_error(e))?;
        }
        txn.commit().map_err(|e| self.write_error(e))?;
        Ok(doomed.len())
    }
}

/// Every record in key order, paired with its sequence key
fn scan<T: Transaction>(
    txn: &T,
    db: Database,
    path: &Path,
) -> Result<Vec<(u64, FavoriteRecord)>, StoreError> {
    let mut cursor = txn.open_ro_cursor(db).map_err(|e| read_error(path, e))?;
    let mut records = Vec::new();
    for (key, value) in cursor.iter_start() {
        let seq = <[u8; 8]>::try_from(key)
            .map(u64::from_be_bytes)
            .map_err(|_| StoreError::Read(format!("{} has a malformed key", path.display())))?;
        let record = serde_json::from_slice(value).map_err(|e| {
            StoreError::Read(format!("{} holds a corrupt record: {}", path.display(), e))
        })?;
        records.push((seq, record));
    }
    Ok(records)
}

fn read_error(path: &Path, e: lmdb::Error) -> StoreError {
    StoreError::Read(format!("{}: {}", path.display(), e))
}

fn write_error(path: &Path, e: lmdb::Error) -> StoreError {
    StoreError::Write(format!("{}: {}", path.display(), e))
}
