//! Stored values and entries.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Key;

/// Commit sequence number of a store.
///
/// Each successful commit gets a strictly larger versionstamp than the one
/// before it, and every entry carries the versionstamp of the commit that
/// last wrote it.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Versionstamp(u64);

impl Versionstamp {
    /// The versionstamp preceding the first commit of an empty store.
    pub const ZERO: Versionstamp = Versionstamp(0);

    /// Wrap a raw sequence number.
    pub const fn new(n: u64) -> Self {
        Self(n)
    }

    /// Returns the raw sequence number.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the following versionstamp.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for Versionstamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:020}", self.0)
    }
}

/// A value held by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum KvValue {
    /// Arbitrary JSON document.
    Json(serde_json::Value),
    /// Counter cell, the only value `sum` and `increment` accept.
    U64(u64),
}

impl KvValue {
    /// Returns the JSON document, if this is one.
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            KvValue::Json(v) => Some(v),
            KvValue::U64(_) => None,
        }
    }

    /// Returns the counter value, if this is one.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            KvValue::U64(n) => Some(*n),
            KvValue::Json(_) => None,
        }
    }

    /// Consume and return the JSON document, if this is one.
    pub fn into_json(self) -> Option<serde_json::Value> {
        match self {
            KvValue::Json(v) => Some(v),
            KvValue::U64(_) => None,
        }
    }
}

impl From<serde_json::Value> for KvValue {
    fn from(value: serde_json::Value) -> Self {
        KvValue::Json(value)
    }
}

/// A key with its current value and versionstamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// The key this entry is stored under.
    pub key: Key,
    /// The stored value.
    pub value: KvValue,
    /// Versionstamp of the commit that last wrote this entry.
    pub versionstamp: Versionstamp,
}
