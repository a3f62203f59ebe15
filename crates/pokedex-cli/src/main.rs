//! pokedex - serve the pokedex HTTP API or administer its store.
//!
//! A thin wrapper over the `pokedex` library. `serve` runs the HTTP server;
//! the other subcommands open the store directly.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{create, get, list, reset, serve};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    match cli.command {
        Commands::Serve(args) => serve::run(args).await,
        Commands::Create(args) => create::run(args).await,
        Commands::List(args) => list::run(args).await,
        Commands::Get(args) => get::run(args).await,
        Commands::Reset(args) => reset::run(args).await,
    }
}

/// Install the global subscriber on stderr. `RUST_LOG` wins over `-v` flags.
fn init_logging(verbosity: u8, json: bool) {
    const LEVELS: [&str; 4] = ["warn", "info", "debug", "trace"];
    let default = LEVELS[usize::from(verbosity).min(LEVELS.len() - 1)];
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let layer = fmt::layer().with_writer(std::io::stderr);
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(layer.json()).init();
    } else {
        registry.with(layer.with_target(false)).init();
    }
}
