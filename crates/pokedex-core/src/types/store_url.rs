//! Store URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated store location.
///
/// Two schemes are understood:
///
/// - `memory:` selects a process-local key space that is lost on exit.
/// - `file:///path/to/dir` selects a key space persisted under a directory.
///
/// # Example
///
/// ```
/// use pokedex_core::StoreUrl;
///
/// let mem = StoreUrl::new("memory:").unwrap();
/// assert!(mem.is_memory());
///
/// let file = StoreUrl::new("file:///tmp/pokedex").unwrap();
/// assert!(file.is_file());
///
/// assert!(StoreUrl::new("https://example.com").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StoreUrl(Url);

impl StoreUrl {
    /// Create a new store URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse or uses an unknown scheme.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::StoreUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// Build a `file://` store URL from a directory path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not absolute.
    pub fn from_directory_path(path: impl AsRef<std::path::Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let url = Url::from_directory_path(path).map_err(|_| InvalidInputError::StoreUrl {
            value: path.display().to_string(),
            reason: "path must be absolute".to_string(),
        })?;
        Ok(Self(url))
    }

    /// Returns the URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the URL scheme ("memory" or "file").
    pub fn scheme(&self) -> &str {
        self.0.scheme()
    }

    /// Returns true for the in-process `memory:` store.
    pub fn is_memory(&self) -> bool {
        self.0.scheme() == "memory"
    }

    /// Returns true for a directory-backed `file://` store.
    pub fn is_file(&self) -> bool {
        self.0.scheme() == "file"
    }

    /// Returns the directory for `file://` URLs, `None` otherwise.
    pub fn to_file_path(&self) -> Option<PathBuf> {
        if self.is_file() {
            self.0.to_file_path().ok()
        } else {
            None
        }
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        match url.scheme() {
            "memory" => Ok(()),
            "file" => {
                if url.path().is_empty() || url.to_file_path().is_err() {
                    return Err(InvalidInputError::StoreUrl {
                        value: original.to_string(),
                        reason: "file:// URL must have an absolute path".to_string(),
                    }
                    .into());
                }
                Ok(())
            }
            other => Err(InvalidInputError::StoreUrl {
                value: original.to_string(),
                reason: format!("unsupported scheme '{}'", other),
            }
            .into()),
        }
    }
}

impl fmt::Display for StoreUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StoreUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for StoreUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for StoreUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        StoreUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_scheme() {
        let url = StoreUrl::new("memory:").unwrap();
        assert!(url.is_memory());
        assert!(url.to_file_path().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn file_scheme_path() {
        let url = StoreUrl::new("file:///var/lib/pokedex").unwrap();
        assert!(url.is_file());
        assert_eq!(url.to_file_path().unwrap(), PathBuf::from("/var/lib/pokedex"));
    }

    #[test]
    fn rejects_network_scheme() {
        let err = StoreUrl::new("http://localhost:8000").unwrap_err();
        assert!(err.to_string().contains("unsupported scheme 'http'"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(StoreUrl::new("not a url").is_err());
    }

    #[test]
    fn from_relative_path_fails() {
        assert!(StoreUrl::from_directory_path("relative/dir").is_err());
    }
}
