//! Core traits for store behavior.

mod kv_store;

pub use kv_store::KvStore;
