use std::str::FromStr;

use serde::Serialize;

use canonex_core::{BitvavoAdapter, CodeCollisionPolicy, CurrencyMap, Exchange};

use crate::cli::CurrenciesArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct CurrenciesResponseData {
    count: usize,
    policy: CodeCollisionPolicy,
    currencies: CurrencyMap,
}

pub async fn run(args: &CurrenciesArgs, adapter: BitvavoAdapter) -> Result<CommandResult, CliError> {
    let adapter = match &args.on_collision {
        Some(raw) => adapter.with_collision_policy(CodeCollisionPolicy::from_str(raw)?),
        None => adapter,
    };

    let currencies = adapter.fetch_currencies().await?;
    let data = serde_json::to_value(CurrenciesResponseData {
        count: currencies.len(),
        policy: adapter.collision_policy(),
        currencies,
    })?;

    Ok(CommandResult::ok(adapter.id(), data))
}
