//! Server configuration.

use std::path::PathBuf;

use pokedex_core::StoreUrl;

use crate::repo::DEFAULT_COLLECTION;

/// Default TCP listen address.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8000";

/// Default directory for static files.
pub const DEFAULT_PUBLIC_DIR: &str = "./public";

/// Configuration for one server process.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TCP listen address (host:port).
    pub listen_addr: String,

    /// Store backend location.
    pub store: StoreUrl,

    /// Directory served for non-API `GET` requests.
    pub public_dir: PathBuf,

    /// Collection name; also the API path segment and counter name.
    pub collection: String,
}

impl ServerConfig {
    /// Configuration with defaults for everything but the store.
    pub fn new(store: StoreUrl) -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            store,
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }

    /// Set the TCP listen address.
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.listen_addr = addr.into();
        self
    }

    /// Set the static file directory.
    pub fn public_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.public_dir = dir.into();
        self
    }

    /// Set the collection name.
    pub fn collection(mut self, name: impl Into<String>) -> Self {
        self.collection = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ServerConfig::new(StoreUrl::new("memory:").unwrap());
        assert_eq!(config.listen_addr, "127.0.0.1:8000");
        assert_eq!(config.collection, "pokemons");
        assert_eq!(config.public_dir, PathBuf::from("./public"));
    }

    #[test]
    fn overrides() {
        let config = ServerConfig::new(StoreUrl::new("memory:").unwrap())
            .listen_addr("0.0.0.0:3000")
            .public_dir("/srv/www")
            .collection("digimons");
        assert_eq!(config.listen_addr, "0.0.0.0:3000");
        assert_eq!(config.collection, "digimons");
        assert_eq!(config.public_dir, PathBuf::from("/srv/www"));
    }
}
