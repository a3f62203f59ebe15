//! Ordered composite keys.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One component of a [`Key`].
///
/// Integers sort before strings; within a variant the natural ordering
/// applies, so `pokemons/2` sorts before `pokemons/10`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyPart {
    /// Signed integer component.
    Int(i64),
    /// UTF-8 string component.
    Str(String),
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPart::Int(n) => write!(f, "{}", n),
            KeyPart::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for KeyPart {
    fn from(s: &str) -> Self {
        KeyPart::Str(s.to_string())
    }
}

impl From<String> for KeyPart {
    fn from(s: String) -> Self {
        KeyPart::Str(s)
    }
}

impl From<i64> for KeyPart {
    fn from(n: i64) -> Self {
        KeyPart::Int(n)
    }
}

/// A key in the ordered key space: a tuple of [`KeyPart`]s.
///
/// # Example
///
/// ```
/// use pokedex_core::{Key, KeyPart};
///
/// let key = Key::new(["pokemons".into(), KeyPart::Int(1)]);
/// assert!(key.starts_with(&Key::new(["pokemons".into()])));
/// assert_eq!(key.to_string(), "pokemons/1");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(Vec<KeyPart>);

impl Key {
    /// Build a key from its parts.
    pub fn new(parts: impl IntoIterator<Item = KeyPart>) -> Self {
        Self(parts.into_iter().collect())
    }

    /// Returns the key parts.
    pub fn parts(&self) -> &[KeyPart] {
        &self.0
    }

    /// Returns a new key with `part` appended.
    pub fn child(&self, part: impl Into<KeyPart>) -> Self {
        let mut parts = self.0.clone();
        parts.push(part.into());
        Self(parts)
    }

    /// True if `prefix` is a proper prefix of this key.
    ///
    /// A key never counts as its own prefix, so listing a prefix does not
    /// return an entry stored under the prefix key itself.
    pub fn starts_with(&self, prefix: &Key) -> bool {
        self.0.len() > prefix.0.len() && self.0[..prefix.0.len()] == prefix.0[..]
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", part)?;
        }
        Ok(())
    }
}
