//! Key space model shared by every store backend.
//!
//! The actual operations are methods on [`KvStore`](crate::KvStore).

mod atomic;
mod entry;

pub use atomic::{AtomicOperation, Check, CommitOutcome, Mutation};
pub use entry::{Entry, KvValue, Versionstamp};
