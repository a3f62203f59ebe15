//! Atomic multi-key operations.

use crate::types::Key;

use super::{KvValue, Versionstamp};

/// A precondition evaluated before any mutation of a commit is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    /// Key to inspect.
    pub key: Key,
    /// Expected versionstamp; `None` requires the key to be absent.
    pub versionstamp: Option<Versionstamp>,
}

/// A single staged write.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Store `value` under `key`, replacing any previous value.
    Set { key: Key, value: KvValue },
    /// Remove `key`; a missing key is not an error.
    Delete { key: Key },
    /// Add `delta` to the counter at `key`, treating a missing key as zero.
    Sum { key: Key, delta: u64 },
}

impl Mutation {
    /// The key this mutation writes.
    pub fn key(&self) -> &Key {
        match self {
            Mutation::Set { key, .. } | Mutation::Delete { key } | Mutation::Sum { key, .. } => {
                key
            }
        }
    }
}

/// Result of a commit that reached the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Every mutation was applied under this versionstamp.
    Committed(Versionstamp),
    /// A check did not hold; nothing was applied.
    CheckFailed,
}

impl CommitOutcome {
    /// True if the commit was applied.
    pub fn is_ok(&self) -> bool {
        matches!(self, CommitOutcome::Committed(_))
    }
}

/// A batch of checks and mutations committed all-or-nothing.
///
/// # Example
///
/// ```
/// use pokedex_core::{AtomicOperation, Key, KeyPart};
///
/// let counter = Key::new(["counter".into(), "pokemons".into()]);
/// let op = AtomicOperation::new()
///     .check(counter.clone(), None)
///     .sum(counter, 1);
///
/// assert_eq!(op.checks().len(), 1);
/// assert_eq!(op.mutations().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomicOperation {
    checks: Vec<Check>,
    mutations: Vec<Mutation>,
}

impl AtomicOperation {
    /// Start an empty operation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `key` to be at `versionstamp` (or absent for `None`).
    pub fn check(mut self, key: Key, versionstamp: Option<Versionstamp>) -> Self {
        self.checks.push(Check { key, versionstamp });
        self
    }

    /// Stage a write.
    pub fn set(mut self, key: Key, value: impl Into<KvValue>) -> Self {
        self.mutations.push(Mutation::Set {
            key,
            value: value.into(),
        });
        self
    }

    /// Stage a delete.
    pub fn delete(mut self, key: Key) -> Self {
        self.mutations.push(Mutation::Delete { key });
        self
    }

    /// Stage a counter increment.
    pub fn sum(mut self, key: Key, delta: u64) -> Self {
        self.mutations.push(Mutation::Sum { key, delta });
        self
    }

    /// Staged checks, in insertion order.
    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    /// Staged mutations, in insertion order.
    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    /// True if nothing has been staged.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty() && self.mutations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KeyPart;

    fn pokemon(n: i64) -> Key {
        Key::new(["pokemons".into(), KeyPart::Int(n)])
    }

    #[test]
    fn mutations_keep_order_and_keys() {
        let counter = Key::new(["counter".into(), "pokemons".into()]);
        let op = AtomicOperation::new()
            .set(pokemon(1), KvValue::U64(0))
            .delete(pokemon(2))
            .sum(counter.clone(), 1);

        let keys: Vec<&Key> = op.mutations().iter().map(Mutation::key).collect();
        assert_eq!(keys, [&pokemon(1), &pokemon(2), &counter]);
    }

    #[test]
    fn empty_operation() {
        assert!(AtomicOperation::new().is_empty());
        assert!(!AtomicOperation::new().check(pokemon(1), None).is_empty());
    }

    #[test]
    fn outcome_is_ok() {
        assert!(CommitOutcome::Committed(Versionstamp::new(1)).is_ok());
        assert!(!CommitOutcome::CheckFailed.is_ok());
    }
}
