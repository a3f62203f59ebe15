//! List command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use pokedex::RepoError;

use super::StoreArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: ListArgs) -> Result<()> {
    let repo = args.store.open()?;

    let records = match repo.get_all().await {
        Ok(records) => records,
        Err(RepoError::EmptyCollection { .. }) => {
            eprintln!("{}", "No pokemons found.".dimmed());
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to list records"),
    };

    for record in &records {
        if args.pretty {
            output::json_pretty(record)?;
        } else {
            output::json(record)?;
        }
    }

    Ok(())
}
