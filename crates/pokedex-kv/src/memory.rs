//! In-process key-value store.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use pokedex_core::Result;
use pokedex_core::kv::{AtomicOperation, CommitOutcome, Entry};
use pokedex_core::traits::KvStore;
use pokedex_core::types::Key;

use crate::keyspace::Keyspace;

/// A key-value store held entirely in memory.
///
/// Clones share the same key space, so one instance can be constructed at
/// startup and handed to every consumer.
#[derive(Debug, Clone, Default)]
pub struct MemoryKv {
    inner: Arc<RwLock<Keyspace>>,
}

impl MemoryKv {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// True if no keys are stored.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl KvStore for MemoryKv {
    async fn get(&self, key: &Key) -> Result<Option<Entry>> {
        Ok(self.inner.read().await.get(key))
    }

    async fn list(&self, prefix: &Key) -> Result<Vec<Entry>> {
        Ok(self.inner.read().await.list(prefix))
    }

    #[instrument(skip(self, op), fields(mutations = op.mutations().len()))]
    async fn commit(&self, op: AtomicOperation) -> Result<CommitOutcome> {
        let outcome = self.inner.write().await.commit(&op)?;
        debug!(?outcome, "Committed atomic operation");
        Ok(outcome)
    }

    async fn increment(&self, key: &Key, delta: u64) -> Result<u64> {
        self.inner.write().await.increment(key, delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokedex_core::kv::KvValue;
    use pokedex_core::types::KeyPart;

    #[tokio::test]
    async fn clones_share_one_key_space() {
        let kv = MemoryKv::new();
        let other = kv.clone();
        assert!(kv.is_empty().await);

        other
            .set(Key::new(["pokemons".into(), KeyPart::Int(1)]), KvValue::U64(1))
            .await
            .unwrap();
        other
            .increment(&Key::new(["counter".into(), "pokemons".into()]), 1)
            .await
            .unwrap();

        assert_eq!(kv.len().await, 2);
        assert!(!kv.is_empty().await);
    }
}
