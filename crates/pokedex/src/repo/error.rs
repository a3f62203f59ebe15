//! Repository outcome errors.

use thiserror::Error;

use pokedex_core::PokemonId;

/// Every way a repository operation can fail.
///
/// Each variant is a typed outcome; mapping to a transport status is left to
/// the caller (see [`crate::http`]).
#[derive(Debug, Error)]
pub enum RepoError {
    /// Path identifier is not a well-formed non-negative integer.
    #[error("invalid identifier '{value}'")]
    InvalidIdentifier { value: String },

    /// Write payload is not a JSON object.
    #[error("invalid record: {reason}")]
    InvalidRecord { reason: String },

    /// Update payload carries an `id` different from the path identifier.
    #[error("record id {found} does not match path id {id}")]
    IdentityMismatch { id: PokemonId, found: String },

    /// No record with this identifier exists.
    #[error("no pokemon with id {id}")]
    NotFound { id: PokemonId },

    /// The collection holds no records at all.
    #[error("the {collection} collection is empty")]
    EmptyCollection { collection: String },

    /// The counter increment did not commit; no record was written.
    #[error("failed to allocate an id: {source}")]
    AllocationFailure {
        #[source]
        source: pokedex_core::Error,
    },

    /// The bulk delete did not commit; the store is unchanged.
    #[error("bulk delete failed: {reason}")]
    AtomicFailure { reason: String },

    /// The record changed between the existence check and the write.
    #[error("pokemon {id} was modified concurrently")]
    Conflict { id: PokemonId },

    /// Any other store failure.
    #[error(transparent)]
    Store(#[from] pokedex_core::Error),
}

/// Result type alias for repository operations.
pub type RepoResult<T> = std::result::Result<T, RepoError>;
