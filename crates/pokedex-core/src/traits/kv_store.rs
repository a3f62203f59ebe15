//! Ordered key-value store trait.

use async_trait::async_trait;

use crate::kv::{AtomicOperation, CommitOutcome, Entry, KvValue, Versionstamp};
use crate::types::Key;
use crate::Result;

/// An ordered key-value store with atomic counters and atomic commits.
///
/// Single-key operations are linearizable. [`list`](KvStore::list) returns a
/// point-in-time snapshot that is not serialized with concurrent writers.
/// No operation retries internally; a failing backend surfaces its error
/// immediately.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Point lookup of a single key.
    async fn get(&self, key: &Key) -> Result<Option<Entry>>;

    /// List every entry whose key strictly extends `prefix`, in key order.
    async fn list(&self, prefix: &Key) -> Result<Vec<Entry>>;

    /// Apply all checks and mutations of `op` together, or none of them.
    async fn commit(&self, op: AtomicOperation) -> Result<CommitOutcome>;

    /// Atomically add `delta` to the counter at `key` and return the new value.
    ///
    /// A missing key counts as zero.
    async fn increment(&self, key: &Key, delta: u64) -> Result<u64>;

    /// Unconditionally store `value` under `key`.
    async fn set(&self, key: Key, value: KvValue) -> Result<Versionstamp> {
        match self.commit(AtomicOperation::new().set(key, value)).await? {
            CommitOutcome::Committed(versionstamp) => Ok(versionstamp),
            // An operation without checks cannot fail its checks.
            CommitOutcome::CheckFailed => Ok(Versionstamp::ZERO),
        }
    }

    /// Remove `key`. Deleting a missing key succeeds.
    async fn delete(&self, key: &Key) -> Result<()> {
        self.commit(AtomicOperation::new().delete(key.clone()))
            .await
            .map(|_| ())
    }

    /// Start an empty atomic operation.
    fn atomic(&self) -> AtomicOperation {
        AtomicOperation::new()
    }
}
