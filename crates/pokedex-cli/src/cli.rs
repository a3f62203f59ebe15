//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::{create, get, list, reset, serve};

/// Pokedex HTTP API server and store administration.
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(author, version = env!("POKEDEX_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Serve(serve::ServeArgs),

    /// Create a pokemon from a JSON object
    Create(create::CreateArgs),

    /// List every pokemon
    List(list::ListArgs),

    /// Fetch a single pokemon
    Get(get::GetArgs),

    /// Delete every pokemon and restart ids at 1
    Reset(reset::ResetArgs),
}
