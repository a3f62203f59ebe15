//! The ordered key space both backends are built on.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use pokedex_core::Result;
use pokedex_core::error::KvError;
use pokedex_core::kv::{AtomicOperation, CommitOutcome, Entry, KvValue, Mutation, Versionstamp};
use pokedex_core::types::Key;

/// An in-memory ordered key space with commit versionstamps.
///
/// This type holds no lock; callers serialize access to it.
#[derive(Debug, Clone, Default)]
pub(crate) struct Keyspace {
    entries: BTreeMap<Key, Entry>,
    versionstamp: Versionstamp,
}

/// On-disk shape of a [`Keyspace`].
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct Snapshot {
    pub versionstamp: Versionstamp,
    pub entries: Vec<Entry>,
}

impl Keyspace {
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let entries = snapshot
            .entries
            .into_iter()
            .map(|entry| (entry.key.clone(), entry))
            .collect();
        Self {
            entries,
            versionstamp: snapshot.versionstamp,
        }
    }

    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            versionstamp: self.versionstamp,
            entries: self.entries.values().cloned().collect(),
        }
    }

    pub fn get(&self, key: &Key) -> Option<Entry> {
        self.entries.get(key).cloned()
    }

    pub fn list(&self, prefix: &Key) -> Vec<Entry> {
        // Extensions of a prefix form one contiguous run starting at the prefix.
        self.entries
            .range(prefix.clone()..)
            .skip_while(|(key, _)| *key == prefix)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(_, entry)| entry.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Evaluate checks, stage every mutation, then apply them together.
    ///
    /// Nothing is written if a check fails or a mutation is invalid.
    pub fn commit(&mut self, op: &AtomicOperation) -> Result<CommitOutcome> {
        for check in op.checks() {
            let current = self.entries.get(&check.key).map(|e| e.versionstamp);
            if current != check.versionstamp {
                return Ok(CommitOutcome::CheckFailed);
            }
        }

        let mut staged: BTreeMap<Key, Option<KvValue>> = BTreeMap::new();

        for mutation in op.mutations() {
            match mutation {
                Mutation::Set { key, value } => {
                    staged.insert(key.clone(), Some(value.clone()));
                }
                Mutation::Delete { key } => {
                    staged.insert(key.clone(), None);
                }
                Mutation::Sum { key, delta } => {
                    let current = match staged.get(key) {
                        Some(pending) => pending.clone(),
                        None => self.entries.get(key).map(|e| e.value.clone()),
                    };
                    let base = match current {
                        None => 0,
                        Some(KvValue::U64(n)) => n,
                        Some(KvValue::Json(_)) => {
                            return Err(KvError::NotACounter {
                                key: key.to_string(),
                            }
                            .into());
                        }
                    };
                    let next = base.checked_add(*delta).ok_or_else(|| KvError::Overflow {
                        key: key.to_string(),
                    })?;
                    staged.insert(key.clone(), Some(KvValue::U64(next)));
                }
            }
        }

        let versionstamp = self.versionstamp.next();

        for (key, value) in staged {
            match value {
                Some(value) => {
                    self.entries.insert(
                        key.clone(),
                        Entry {
                            key,
                            value,
                            versionstamp,
                        },
                    );
                }
                None => {
                    self.entries.remove(&key);
                }
            }
        }

        self.versionstamp = versionstamp;

        Ok(CommitOutcome::Committed(versionstamp))
    }

    /// Sum into a counter and read it back under the same exclusive access.
    pub fn increment(&mut self, key: &Key, delta: u64) -> Result<u64> {
        self.commit(&AtomicOperation::new().sum(key.clone(), delta))?;
        Ok(self
            .entries
            .get(key)
            .and_then(|e| e.value.as_u64())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokedex_core::Error;
    use pokedex_core::types::KeyPart;
    use serde_json::json;

    fn pokemon(n: i64) -> Key {
        Key::new(["pokemons".into(), KeyPart::Int(n)])
    }

    fn prefix() -> Key {
        Key::new(["pokemons".into()])
    }

    #[test]
    fn list_is_ordered_and_bounded() {
        let mut ks = Keyspace::default();
        let op = AtomicOperation::new()
            .set(pokemon(10), json!({ "id": 10 }))
            .set(pokemon(2), json!({ "id": 2 }))
            .set(Key::new(["counter".into(), "pokemons".into()]), KvValue::U64(10))
            .set(Key::new(["pokemonz".into(), KeyPart::Int(1)]), json!({}));
        ks.commit(&op).unwrap();

        let keys: Vec<Key> = ks.list(&prefix()).into_iter().map(|e| e.key).collect();
        assert_eq!(keys, vec![pokemon(2), pokemon(10)]);
    }

    #[test]
    fn list_skips_exact_prefix_key() {
        let mut ks = Keyspace::default();
        ks.commit(&AtomicOperation::new().set(prefix(), json!("root")))
            .unwrap();
        ks.commit(&AtomicOperation::new().set(pokemon(1), json!({})))
            .unwrap();
        assert_eq!(ks.list(&prefix()).len(), 1);
    }

    #[test]
    fn failed_check_applies_nothing() {
        let mut ks = Keyspace::default();
        ks.commit(&AtomicOperation::new().set(pokemon(1), json!({})))
            .unwrap();

        let op = AtomicOperation::new()
            .check(pokemon(1), None)
            .delete(pokemon(1))
            .set(pokemon(2), json!({}));
        assert_eq!(ks.commit(&op).unwrap(), CommitOutcome::CheckFailed);
        assert_eq!(ks.len(), 1);
    }

    #[test]
    fn sum_on_document_applies_nothing() {
        let mut ks = Keyspace::default();
        ks.commit(&AtomicOperation::new().set(pokemon(1), json!({})))
            .unwrap();

        let op = AtomicOperation::new()
            .set(pokemon(2), json!({}))
            .sum(pokemon(1), 1);
        let err = ks.commit(&op).unwrap_err();
        assert!(matches!(err, Error::Kv(KvError::NotACounter { .. })));
        assert!(ks.get(&pokemon(2)).is_none());
    }

    #[test]
    fn versionstamps_increase_per_commit() {
        let mut ks = Keyspace::default();
        let CommitOutcome::Committed(first) = ks
            .commit(&AtomicOperation::new().set(pokemon(1), json!({})))
            .unwrap()
        else {
            panic!("expected commit");
        };
        let CommitOutcome::Committed(second) = ks
            .commit(&AtomicOperation::new().set(pokemon(1), json!({ "x": 1 })))
            .unwrap()
        else {
            panic!("expected commit");
        };
        assert!(second > first);
        assert_eq!(ks.get(&pokemon(1)).unwrap().versionstamp, second);
    }

    #[test]
    fn increment_starts_from_zero() {
        let mut ks = Keyspace::default();
        let counter = Key::new(["counter".into(), "pokemons".into()]);
        assert_eq!(ks.increment(&counter, 1).unwrap(), 1);
        assert_eq!(ks.increment(&counter, 1).unwrap(), 2);
    }

    #[test]
    fn snapshot_round_trip_preserves_versionstamp() {
        let mut ks = Keyspace::default();
        ks.commit(&AtomicOperation::new().set(pokemon(1), json!({})))
            .unwrap();
        let restored = Keyspace::from_snapshot(ks.to_snapshot());
        assert_eq!(restored.len(), 1);
        assert_eq!(
            restored.get(&pokemon(1)).unwrap().versionstamp,
            ks.get(&pokemon(1)).unwrap().versionstamp
        );
    }
}
