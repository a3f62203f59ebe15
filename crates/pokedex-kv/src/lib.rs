//! pokedex-kv - Key-value store backends.
//!
//! Two backends implement [`KvStore`]: [`MemoryKv`] for a process-local key
//! space and [`FileKv`] for one persisted under a directory. [`open`] picks
//! one from a [`StoreUrl`].

mod file;
mod keyspace;
mod memory;

use std::sync::Arc;

use pokedex_core::error::InvalidInputError;
use pokedex_core::{KvStore, Result, StoreUrl};

pub use file::FileKv;
pub use memory::MemoryKv;

/// Open the backend named by `url` as a shared store handle.
///
/// # Errors
///
/// Returns an error if a `file://` directory cannot be created.
pub fn open(url: &StoreUrl) -> Result<Arc<dyn KvStore>> {
    if url.is_memory() {
        return Ok(Arc::new(MemoryKv::new()));
    }

    match url.to_file_path() {
        Some(path) => Ok(Arc::new(FileKv::open(path)?)),
        None => Err(InvalidInputError::StoreUrl {
            value: url.to_string(),
            reason: "no backend for this URL".to_string(),
        }
        .into()),
    }
}
