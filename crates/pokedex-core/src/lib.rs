//! pokedex-core - Core types and traits for the pokedex resource store.

pub mod error;
pub mod kv;
pub mod record;
pub mod traits;
pub mod types;

pub use error::Error;
pub use kv::{AtomicOperation, CommitOutcome, Entry, KvValue, Mutation, Versionstamp};
pub use record::Record;
pub use traits::KvStore;
pub use types::{Key, KeyPart, PokemonId, StoreUrl};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
