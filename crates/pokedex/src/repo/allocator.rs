//! Identifier allocation.

use std::sync::Arc;

use tracing::{debug, warn};

use pokedex_core::{Key, KvStore, PokemonId};

use super::{RepoError, RepoResult};

/// Namespace holding one counter per collection.
pub const COUNTER_NAMESPACE: &str = "counter";

/// Hands out unique, increasing identifiers for one collection.
///
/// Allocation is a single increment-and-return on the store, so two callers
/// can never observe the same value. Identifiers are not guaranteed to be
/// returned in call order when callers race. Deleting the counter key
/// restarts allocation at 1.
#[derive(Clone)]
pub struct IdAllocator {
    store: Arc<dyn KvStore>,
    key: Key,
}

impl IdAllocator {
    /// Create an allocator for `collection` backed by `store`.
    pub fn new(store: Arc<dyn KvStore>, collection: &str) -> Self {
        Self {
            store,
            key: Key::new([COUNTER_NAMESPACE.into(), collection.into()]),
        }
    }

    /// The key of the counter cell.
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Allocate the next identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError::AllocationFailure`] if the increment does not
    /// commit. Callers must not write a record in that case.
    pub async fn next(&self) -> RepoResult<PokemonId> {
        match self.store.increment(&self.key, 1).await {
            Ok(n) => {
                debug!(counter = %self.key, id = n, "Allocated id");
                Ok(PokemonId::new(n))
            }
            Err(source) => {
                warn!(counter = %self.key, error = %source, "Id allocation failed");
                Err(RepoError::AllocationFailure { source })
            }
        }
    }
}

impl std::fmt::Debug for IdAllocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdAllocator").field("key", &self.key).finish()
    }
}
