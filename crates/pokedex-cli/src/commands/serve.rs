//! Serve command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use pokedex::config::{DEFAULT_LISTEN_ADDR, DEFAULT_PUBLIC_DIR};
use pokedex::http::{self, AppState};
use pokedex::ServerConfig;
use pokedex_core::StoreUrl;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "POKEDEX_LISTEN", default_value = DEFAULT_LISTEN_ADDR)]
    pub listen: String,

    /// Store URL (`memory:` or `file:///path/to/dir`)
    #[arg(long, env = "POKEDEX_STORE", default_value = "memory:")]
    pub store: StoreUrl,

    /// Directory of static files served outside the API
    #[arg(long, env = "POKEDEX_PUBLIC", default_value = DEFAULT_PUBLIC_DIR)]
    pub public: PathBuf,
}

impl ServeArgs {
    fn into_config(self) -> ServerConfig {
        ServerConfig::new(self.store)
            .listen_addr(self.listen)
            .public_dir(self.public)
    }
}

pub async fn run(args: ServeArgs) -> Result<()> {
    let config = args.into_config();
    info!(
        store = %config.store,
        public = %config.public_dir.display(),
        version = env!("POKEDEX_VERSION"),
        "Starting pokedex"
    );

    let state = AppState::from_config(&config).context("Failed to open store")?;
    http::serve(state, &config.listen_addr)
        .await
        .with_context(|| format!("Server on {} failed", config.listen_addr))?;

    Ok(())
}
