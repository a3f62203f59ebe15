//! pokedex - CRUD API over an ordered key-value store.
//!
//! The [`PokemonRepository`] implements create, read, update and delete for
//! one collection on top of any [`KvStore`](pokedex_core::KvStore); the
//! [`http`] module exposes it over HTTP.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use pokedex::PokemonRepository;
//! use pokedex_core::Record;
//! use pokedex_kv::MemoryKv;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), pokedex::RepoError> {
//! let repo = PokemonRepository::new(Arc::new(MemoryKv::new()));
//!
//! let created = repo.create(Record::new(json!({ "name": "Pikachu" }))?).await?;
//! let id = created.id().unwrap();
//!
//! assert_eq!(repo.get_one(id).await?.get("name"), Some(&json!("Pikachu")));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod http;
pub mod repo;

pub use config::ServerConfig;
pub use repo::{IdAllocator, PokemonRepository, RepoError, RepoResult};
