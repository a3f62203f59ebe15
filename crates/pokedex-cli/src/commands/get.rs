//! Get command implementation.

use anyhow::{Context, Result};
use clap::Args;

use pokedex::PokemonRepository;

use super::StoreArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct GetArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Pokemon id
    pub id: String,
}

pub async fn run(args: GetArgs) -> Result<()> {
    let id = PokemonRepository::parse_id(&args.id)?;
    let repo = args.store.open()?;

    let record = repo.get_one(id).await.context("Failed to get record")?;
    output::json_pretty(&record)?;

    Ok(())
}
