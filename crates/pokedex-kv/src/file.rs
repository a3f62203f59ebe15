//! Filesystem-backed key-value store.
//!
//! ## Directory Structure
//!
//! ```text
//! $ROOT/
//! ├── kv.json       # full key space snapshot
//! ├── kv.json.tmp   # next snapshot while a commit is being written
//! └── kv.lock       # advisory lock shared by every process using $ROOT
//! ```
//!
//! Every write reloads the snapshot under an exclusive lock, applies the
//! mutation in memory, then replaces `kv.json` with a rename. Readers hold a
//! shared lock, so they observe either the old or the new snapshot in full.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use fs2::FileExt;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use pokedex_core::Result;
use pokedex_core::error::StoreError;
use pokedex_core::kv::{AtomicOperation, CommitOutcome, Entry};
use pokedex_core::traits::KvStore;
use pokedex_core::types::Key;

use crate::keyspace::{Keyspace, Snapshot};

const SNAPSHOT_FILE: &str = "kv.json";
const LOCK_FILE: &str = "kv.lock";

/// A key-value store persisted as a single snapshot file.
#[derive(Debug, Clone)]
pub struct FileKv {
    root: PathBuf,
    // Serializes writers within this process; the file lock covers other processes.
    writer: Arc<Mutex<()>>,
}

impl FileKv {
    /// Open (creating if needed) a store rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(StoreError::from)?;
        debug!(root = %root.display(), "Opened file store");
        Ok(Self {
            root,
            writer: Arc::new(Mutex::new(())),
        })
    }

    /// Get the root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn snapshot_path(&self) -> PathBuf {
        self.root.join(SNAPSHOT_FILE)
    }

    fn lock_path(&self) -> PathBuf {
        self.root.join(LOCK_FILE)
    }

    fn open_lock(&self) -> Result<File> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())
            .map_err(StoreError::from)?;
        Ok(file)
    }

    fn load(&self) -> Result<Keyspace> {
        let path = self.snapshot_path();

        if !path.exists() {
            return Ok(Keyspace::default());
        }

        let content = fs::read_to_string(&path).map_err(StoreError::from)?;
        let snapshot: Snapshot =
            serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
                message: format!("{}: {}", path.display(), e),
            })?;

        Ok(Keyspace::from_snapshot(snapshot))
    }

    fn persist(&self, keyspace: &Keyspace) -> Result<()> {
        let path = self.snapshot_path();
        let temp_path = path.with_extension("json.tmp");

        let content = serde_json::to_string(&keyspace.to_snapshot()).map_err(|e| {
            StoreError::Corrupt {
                message: e.to_string(),
            }
        })?;

        let mut file = File::create(&temp_path).map_err(StoreError::from)?;
        file.write_all(content.as_bytes())
            .map_err(StoreError::from)?;
        file.sync_data().map_err(StoreError::from)?;
        fs::rename(&temp_path, &path).map_err(StoreError::from)?;

        Ok(())
    }

    /// Run `f` against the current key space under a shared lock.
    fn read<T>(&self, f: impl FnOnce(&Keyspace) -> T) -> Result<T> {
        let lock_file = self.open_lock()?;
        lock_file.lock_shared().map_err(StoreError::from)?;

        let result = self.load().map(|keyspace| f(&keyspace));

        lock_file.unlock().map_err(StoreError::from)?;
        result
    }

    /// Run `f` against the current key space under an exclusive lock and
    /// persist the result if `f` succeeds and reports a change.
    async fn write<T>(
        &self,
        f: impl FnOnce(&mut Keyspace) -> Result<(T, bool)>,
    ) -> Result<T> {
        let _guard = self.writer.lock().await;

        let lock_file = self.open_lock()?;
        lock_file.lock_exclusive().map_err(StoreError::from)?;

        let result = self.load().and_then(|mut keyspace| {
            let (value, changed) = f(&mut keyspace)?;
            if changed {
                self.persist(&keyspace)?;
            }
            Ok(value)
        });

        lock_file.unlock().map_err(StoreError::from)?;
        result
    }
}

#[async_trait]
impl KvStore for FileKv {
    async fn get(&self, key: &Key) -> Result<Option<Entry>> {
        self.read(|keyspace| keyspace.get(key))
    }

    async fn list(&self, prefix: &Key) -> Result<Vec<Entry>> {
        self.read(|keyspace| keyspace.list(prefix))
    }

    #[instrument(skip(self, op), fields(root = %self.root.display(), mutations = op.mutations().len()))]
    async fn commit(&self, op: AtomicOperation) -> Result<CommitOutcome> {
        let outcome = self
            .write(|keyspace| {
                let outcome = keyspace.commit(&op)?;
                Ok((outcome, outcome.is_ok()))
            })
            .await?;
        debug!(?outcome, "Committed atomic operation");
        Ok(outcome)
    }

    #[instrument(skip(self, key), fields(root = %self.root.display(), %key))]
    async fn increment(&self, key: &Key, delta: u64) -> Result<u64> {
        self.write(|keyspace| Ok((keyspace.increment(key, delta)?, true)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokedex_core::types::KeyPart;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_snapshot_is_empty() {
        let dir = TempDir::new().unwrap();
        let kv = FileKv::open(dir.path()).unwrap();
        let prefix = Key::new(["pokemons".into()]);
        assert!(kv.list(&prefix).await.unwrap().is_empty());
        assert!(!dir.path().join(SNAPSHOT_FILE).exists());
    }

    #[tokio::test]
    async fn failed_check_does_not_rewrite_snapshot() {
        let dir = TempDir::new().unwrap();
        let kv = FileKv::open(dir.path()).unwrap();
        let key = Key::new(["pokemons".into(), KeyPart::Int(1)]);

        let op = AtomicOperation::new()
            .check(key.clone(), Some(pokedex_core::Versionstamp::new(7)))
            .set(key, json!({}));
        assert_eq!(kv.commit(op).await.unwrap(), CommitOutcome::CheckFailed);
        assert!(!dir.path().join(SNAPSHOT_FILE).exists());
    }

    #[tokio::test]
    async fn corrupt_snapshot_is_reported() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SNAPSHOT_FILE), "not json").unwrap();
        let kv = FileKv::open(dir.path()).unwrap();

        let err = kv.get(&Key::new(["x".into()])).await.unwrap_err();
        assert!(err.to_string().contains("corrupt snapshot"));
    }
}
