//! # Store
//!
//! File access, self-healing and locking for the three JSON collections.
//!
//! ## Self-Healing Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    What happens on read                                 │
//! │                                                                         │
//! │  read(products)                                                        │
//! │       │                                                                 │
//! │       ├── file missing ──► create it with []  ──► return []            │
//! │       │                                                                 │
//! │       ├── file unparseable ──► rename aside to                         │
//! │       │       products.json.broken.<epoch-millis>                      │
//! │       │       recreate with []  ──► return []                          │
//! │       │                                                                 │
//! │       ├── other I/O failure ──► log error ──► return []                │
//! │       │       (reads never crash the server)                           │
//! │       │                                                                 │
//! │       └── ok ──► return records                                        │
//! │                                                                         │
//! │  This is self-healing, not data recovery: a corrupt file's contents    │
//! │  are parked in the .broken file and the collection restarts empty.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! Every mutation is a full read-modify-write of one collection. Each
//! collection has its own async mutex; repositories hold it across the whole
//! cycle, so concurrent requests serialize instead of racing last-writer-wins.
//! There is no cross-collection transactionality.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, error, info, warn};

use crate::collection::Collection;
use crate::error::{StoreError, StoreResult};
use crate::repository::product::ProductRepository;
use crate::repository::transaction::TransactionRepository;
use crate::repository::user::UserRepository;

// =============================================================================
// Configuration
// =============================================================================

/// Record store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding the collection files. Created if missing.
    pub data_dir: PathBuf,
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        StoreConfig {
            data_dir: data_dir.into(),
        }
    }
}

// =============================================================================
// Store
// =============================================================================

struct Shared {
    dir: PathBuf,
    /// One lock per collection, indexed by `Collection::lock_index`.
    locks: [Mutex<()>; 3],
}

/// Handle to the record store. Cheap to clone; all clones share the
/// per-collection locks.
#[derive(Clone)]
pub struct Store {
    shared: Arc<Shared>,
}

impl Store {
    /// Opens the store: ensures the data directory exists and heals every
    /// collection file (missing → created empty, corrupt → quarantined).
    pub async fn open(config: StoreConfig) -> StoreResult<Self> {
        fs::create_dir_all(&config.data_dir)
            .await
            .map_err(|e| StoreError::io(&config.data_dir, e))?;

        let store = Store {
            shared: Arc::new(Shared {
                dir: config.data_dir,
                locks: [Mutex::new(()), Mutex::new(()), Mutex::new(())],
            }),
        };

        for collection in Collection::ALL {
            store.heal(collection).await?;
        }

        info!(dir = %store.shared.dir.display(), "record store ready");
        Ok(store)
    }

    /// The data directory this store reads and writes.
    pub fn data_dir(&self) -> &Path {
        &self.shared.dir
    }

    // =========================================================================
    // Repositories
    // =========================================================================

    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.clone())
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.clone())
    }

    pub fn transactions(&self) -> TransactionRepository {
        TransactionRepository::new(self.clone())
    }

    // =========================================================================
    // Collection File Access
    // =========================================================================

    /// Reads a whole collection, degrading to empty on any failure. Reads
    /// never propagate errors - a broken disk logs and serves nothing.
    pub async fn read<T: DeserializeOwned>(&self, collection: Collection) -> Vec<T> {
        match self.try_read(collection).await {
            Ok(records) => records,
            Err(err) => {
                error!(collection = %collection, %err, "read failed, returning empty collection");
                Vec::new()
            }
        }
    }

    async fn try_read<T: DeserializeOwned>(&self, collection: Collection) -> StoreResult<Vec<T>> {
        let path = self.path(collection);

        let raw = match fs::read(&path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(collection = %collection, "collection file missing, creating empty");
                self.write_default(collection).await?;
                return Ok(Vec::new());
            }
            Err(err) => return Err(StoreError::io(&path, err)),
        };

        match serde_json::from_slice(&raw) {
            Ok(records) => Ok(records),
            Err(err) => {
                warn!(collection = %collection, %err, "corrupt collection file");
                self.quarantine(collection).await?;
                Ok(Vec::new())
            }
        }
    }

    /// Rewrites a whole collection. The records are serialized to a temp
    /// file and renamed into place, so readers observe either the old or the
    /// new file, never a torn one. (No durability guarantee against crashes;
    /// that is an accepted non-goal.)
    pub async fn write<T: Serialize>(
        &self,
        collection: Collection,
        records: &[T],
    ) -> StoreResult<()> {
        let path = self.path(collection);
        let tmp = self
            .shared
            .dir
            .join(format!("{}.tmp", collection.file_name()));

        let bytes = serde_json::to_vec_pretty(records)?;
        fs::write(&tmp, bytes)
            .await
            .map_err(|e| StoreError::io(&tmp, e))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| StoreError::io(&path, e))?;

        debug!(collection = %collection, count = records.len(), "collection written");
        Ok(())
    }

    /// Acquires the collection's write lock. Repositories hold this across
    /// a full read-modify-write cycle.
    pub(crate) async fn lock(&self, collection: Collection) -> MutexGuard<'_, ()> {
        self.shared.locks[collection.lock_index()].lock().await
    }

    // =========================================================================
    // Self-Healing
    // =========================================================================

    /// Ensures a collection file exists and holds parseable JSON; otherwise
    /// quarantines it and recreates it empty.
    async fn heal(&self, collection: Collection) -> StoreResult<()> {
        let path = self.path(collection);

        let raw = match fs::read(&path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return self.write_default(collection).await;
            }
            Err(err) => return Err(StoreError::io(&path, err)),
        };

        if serde_json::from_slice::<Vec<serde_json::Value>>(&raw).is_err() {
            warn!(collection = %collection, "corrupt collection file found at startup");
            self.quarantine(collection).await?;
        }

        Ok(())
    }

    /// Renames a broken collection file aside (timestamped) and recreates
    /// the collection empty. Existing bad data is parked, not repaired.
    async fn quarantine(&self, collection: Collection) -> StoreResult<()> {
        let path = self.path(collection);
        let broken = self.shared.dir.join(format!(
            "{}.broken.{}",
            collection.file_name(),
            Utc::now().timestamp_millis()
        ));

        fs::rename(&path, &broken)
            .await
            .map_err(|e| StoreError::io(&path, e))?;
        warn!(
            collection = %collection,
            backup = %broken.display(),
            "quarantined corrupt collection file"
        );

        self.write_default(collection).await
    }

    async fn write_default(&self, collection: Collection) -> StoreResult<()> {
        self.write::<serde_json::Value>(collection, &[]).await
    }

    fn path(&self, collection: Collection) -> PathBuf {
        self.shared.dir.join(collection.file_name())
    }
}

// =============================================================================
// Tests
// =============================================================================
