//! Resource identifier type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// A validated resource identifier.
///
/// Identifiers are server-assigned, non-negative integers handed out by the
/// counter of a collection. Parsing from a path segment accepts ASCII digits
/// only, so `"1.5"`, `"-1"`, `"1e3"` and `""` are all rejected.
///
/// # Example
///
/// ```
/// use pokedex_core::PokemonId;
///
/// let id: PokemonId = "25".parse().unwrap();
/// assert_eq!(id.get(), 25);
/// assert!("pikachu".parse::<PokemonId>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PokemonId(u64);

impl PokemonId {
    /// Wrap an already-allocated integer.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the integer value.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Parse an identifier from a path segment.
    ///
    /// # Errors
    ///
    /// Returns an error if the segment is not a non-negative integer no
    /// larger than `i64::MAX`.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidInputError::Identifier {
                value: s.to_string(),
                reason: "cannot be empty".to_string(),
            }
            .into());
        }

        if let Some(c) = trimmed.chars().find(|c| !c.is_ascii_digit()) {
            return Err(InvalidInputError::Identifier {
                value: s.to_string(),
                reason: format!("contains invalid character '{}'", c),
            }
            .into());
        }

        // Keys store ids as signed integers, so the upper bound is i64::MAX.
        trimmed.parse::<i64>().map(|n| Self(n.unsigned_abs())).map_err(|_| {
            InvalidInputError::Identifier {
                value: s.to_string(),
                reason: "out of range".to_string(),
            }
            .into()
        })
    }
}

impl fmt::Display for PokemonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PokemonId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<PokemonId> for u64 {
    fn from(id: PokemonId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_integer() {
        assert_eq!(PokemonId::parse("25").unwrap().get(), 25);
    }

    #[test]
    fn zero_parses() {
        assert_eq!(PokemonId::parse("0").unwrap().get(), 0);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(PokemonId::parse(" 7 ").unwrap().get(), 7);
    }

    #[test]
    fn invalid_empty() {
        assert!(PokemonId::parse("").is_err());
        assert!(PokemonId::parse("   ").is_err());
    }

    #[test]
    fn invalid_fraction() {
        assert!(PokemonId::parse("1.5").is_err());
    }

    #[test]
    fn invalid_negative() {
        assert!(PokemonId::parse("-1").is_err());
    }

    #[test]
    fn invalid_word() {
        let err = PokemonId::parse("abc").unwrap_err();
        assert!(err.to_string().contains("invalid character 'a'"));
    }

    #[test]
    fn invalid_overflow() {
        assert!(PokemonId::parse("9223372036854775808").is_err());
        assert!(PokemonId::parse("9223372036854775807").is_ok());
    }

    #[test]
    fn serializes_as_number() {
        let json = serde_json::to_value(PokemonId::new(3)).unwrap();
        assert_eq!(json, serde_json::json!(3));
    }
}
