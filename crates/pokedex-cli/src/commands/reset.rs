//! Reset command implementation.

use anyhow::{Context, Result};
use clap::Args;

use super::StoreArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct ResetArgs {
    #[command(flatten)]
    pub store: StoreArgs,
}

pub async fn run(args: ResetArgs) -> Result<()> {
    let repo = args.store.open()?;

    repo.delete_all().await.context("Failed to reset collection")?;
    output::success(&format!("Removed every record in '{}'", repo.collection()));

    Ok(())
}
