//! Identifier allocation and the resource repository.
//!
//! The repository is the only component with invariants to protect:
//! unique ids, no partially written records, all-or-nothing bulk deletes.
//! Every guarantee rests on the store's atomic primitives; nothing here
//! locks or caches.

mod allocator;
mod error;
mod repository;

pub use allocator::{COUNTER_NAMESPACE, IdAllocator};
pub use error::{RepoError, RepoResult};
pub use repository::{DEFAULT_COLLECTION, PokemonRepository};
