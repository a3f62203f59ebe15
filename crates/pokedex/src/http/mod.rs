//! HTTP adapter mapping requests onto repository calls.
//!
//! ## Routes
//!
//! | Method & path | Success |
//! |---|---|
//! | `POST /api/pokemons` | 201, `Location` of the new record |
//! | `GET /api/pokemons/:id` | 200, the record |
//! | `GET /api/pokemons` | 200, every record |
//! | `PUT /api/pokemons/:id` | 204 |
//! | `DELETE /api/pokemons/:id` | 204 |
//! | `DELETE /api/pokemons` | 204 |
//! | `GET /health` | 200, `{ "ok": true }` |
//!
//! Writes carry the record as JSON text in a form field named `record`.
//! Errors respond with `{ "message": "..." }`. Any other `GET` is served
//! from the public directory.
//!
//! ## Example
//!
//! ```no_run
//! use pokedex::http::{self, AppState};
//! use pokedex::ServerConfig;
//! use pokedex_core::StoreUrl;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::new(StoreUrl::new("memory:")?);
//! let state = AppState::from_config(&config)?;
//! http::serve(state, &config.listen_addr).await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod form;
mod handlers;
mod static_files;

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::repo::PokemonRepository;

pub use error::{ApiError, status_for};
pub use form::{RECORD_FIELD, RecordForm};

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    repo: Arc<PokemonRepository>,
    public_dir: Arc<PathBuf>,
}

impl AppState {
    /// Build state around an existing repository.
    pub fn new(repo: PokemonRepository, public_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo: Arc::new(repo),
            public_dir: Arc::new(public_dir.into()),
        }
    }

    /// Open the configured store and build state around it.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be opened.
    pub fn from_config(config: &ServerConfig) -> pokedex_core::Result<Self> {
        let store = pokedex_kv::open(&config.store)?;
        let repo = PokemonRepository::with_collection(store, config.collection.clone());
        Ok(Self::new(repo, config.public_dir.clone()))
    }

    /// The repository.
    pub fn repo(&self) -> &PokemonRepository {
        &self.repo
    }

    /// Directory static files are served from.
    pub fn public_dir(&self) -> &Path {
        &self.public_dir
    }
}

/// Build an axum `Router` serving the collection and static files.
pub fn router(state: AppState) -> Router {
    let collection = format!("/api/{}", state.repo().collection());
    let member = format!("{}/:id", collection);

    Router::new()
        .route("/health", get(handlers::health))
        .route(
            &collection,
            get(handlers::list_pokemons)
                .post(handlers::create_pokemon)
                .delete(handlers::delete_all_pokemons),
        )
        .route(
            &member,
            get(handlers::get_pokemon)
                .put(handlers::update_pokemon)
                .delete(handlers::delete_pokemon),
        )
        .fallback(static_files::serve_static)
        .with_state(state)
}

/// Serve on `addr` until the process receives Ctrl+C.
pub async fn serve(state: AppState, addr: &str) -> Result<(), std::io::Error> {
    let listener = TcpListener::bind(addr).await?;
    serve_with_shutdown(listener, state, shutdown_signal()).await
}

/// Serve on an already-bound listener until `shutdown` resolves.
pub async fn serve_with_shutdown(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    info!(addr = %listener.local_addr()?, "Listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down"),
        Err(e) => {
            warn!(error = %e, "Ctrl+C handler unavailable; serving until killed");
            std::future::pending::<()>().await
        }
    }
}
