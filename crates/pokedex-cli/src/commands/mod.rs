//! Subcommand implementations.

pub mod create;
pub mod get;
pub mod list;
pub mod reset;
pub mod serve;

use anyhow::{Context, Result};
use clap::Args;

use pokedex::PokemonRepository;
use pokedex_core::StoreUrl;

/// Store selection shared by the admin subcommands.
#[derive(Args, Debug)]
pub struct StoreArgs {
    /// Store URL (`memory:` or `file:///path/to/dir`)
    #[arg(long, env = "POKEDEX_STORE")]
    pub store: StoreUrl,
}

impl StoreArgs {
    /// Open the store and wrap it in a repository.
    pub fn open(&self) -> Result<PokemonRepository> {
        let store = pokedex_kv::open(&self.store)
            .with_context(|| format!("Failed to open store {}", self.store))?;
        Ok(PokemonRepository::new(store))
    }
}
