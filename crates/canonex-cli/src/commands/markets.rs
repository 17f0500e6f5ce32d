use serde::Serialize;

use canonex_core::{BitvavoAdapter, Exchange, Market};

use crate::cli::MarketsArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct MarketsResponseData {
    count: usize,
    markets: Vec<Market>,
}

pub async fn run(args: &MarketsArgs, adapter: &BitvavoAdapter) -> Result<CommandResult, CliError> {
    let mut markets = adapter.fetch_markets().await?;
    if args.active_only {
        markets.retain(|market| market.active);
    }

    let data = serde_json::to_value(MarketsResponseData {
        count: markets.len(),
        markets,
    })?;

    Ok(CommandResult::ok(adapter.id(), data))
}
