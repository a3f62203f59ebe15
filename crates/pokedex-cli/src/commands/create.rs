//! Create command implementation.

use anyhow::{Context, Result};
use clap::Args;

use pokedex_core::Record;

use super::StoreArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Record as a JSON object, e.g. '{"name":"Pikachu"}'
    pub record: String,
}

pub async fn run(args: CreateArgs) -> Result<()> {
    let repo = args.store.open()?;
    let fields = Record::from_json_str(&args.record).context("Invalid record")?;

    let record = repo.create(fields).await.context("Failed to create record")?;

    if let Some(id) = record.id() {
        output::success("Created pokemon");
        output::field("Path", &repo.resource_path(id));
    }
    output::json(&record)?;

    Ok(())
}
