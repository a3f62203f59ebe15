//! Error types for pokedex-core.
//!
//! This module provides a unified error type with explicit variants for
//! store, key space and input validation errors.

use thiserror::Error;

/// The unified error type for store and value operations.
///
/// Callers can match on the nested enums to tell an unavailable backend
/// apart from a malformed input or a misuse of a key.
#[derive(Debug, Error)]
pub enum Error {
    /// Backend failures (I/O, corrupt snapshot, unavailable store).
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Key space misuse (summing a non-counter, counter overflow).
    #[error("kv error: {0}")]
    Kv(#[from] KvError),

    /// Input validation errors (identifier, record, store URL format).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

/// Backend-level errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem or lock failure.
    #[error("I/O error: {message}")]
    Io { message: String },

    /// The persisted snapshot could not be decoded.
    #[error("corrupt snapshot: {message}")]
    Corrupt { message: String },

    /// The store refused or could not serve the request.
    #[error("store unavailable: {message}")]
    Unavailable { message: String },
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Store(StoreError::from(err))
    }
}

/// Errors raised by the key space itself.
#[derive(Debug, Error)]
pub enum KvError {
    /// A `sum` or `increment` targeted a key holding a non-counter value.
    #[error("value at '{key}' is not a counter")]
    NotACounter { key: String },

    /// A counter would exceed `u64::MAX`.
    #[error("counter at '{key}' overflowed")]
    Overflow { key: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Identifier is not a well-formed non-negative integer.
    #[error("invalid identifier '{value}': {reason}")]
    Identifier { value: String, reason: String },

    /// Record payload is not a JSON object.
    #[error("invalid record: {reason}")]
    Record { reason: String },

    /// Invalid store URL format.
    #[error("invalid store URL '{value}': {reason}")]
    StoreUrl { value: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_maps_to_store() {
        let err: Error = std::io::Error::other("disk gone").into();
        assert!(matches!(err, Error::Store(StoreError::Io { .. })));
        assert!(err.to_string().contains("disk gone"));
    }

    #[test]
    fn nested_display() {
        let err: Error = KvError::NotACounter {
            key: "pokemons/1".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "kv error: value at 'pokemons/1' is not a counter"
        );
    }
}
