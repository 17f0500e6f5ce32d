use serde::Serialize;

use canonex_core::{BitvavoAdapter, Exchange, Liquidity, TradingFees};

use crate::cli::FeesArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct ApplicableRates {
    volume: f64,
    maker: f64,
    taker: f64,
}

#[derive(Debug, Serialize)]
struct FeesResponseData<'a> {
    schedule: &'a TradingFees,
    #[serde(skip_serializing_if = "Option::is_none")]
    applicable: Option<ApplicableRates>,
}

pub fn run(args: &FeesArgs, adapter: &BitvavoAdapter) -> Result<CommandResult, CliError> {
    let schedule = &adapter.descriptor().fees;
    let applicable = args.volume.map(|volume| ApplicableRates {
        volume,
        maker: schedule.rate_for(Liquidity::Maker, volume),
        taker: schedule.rate_for(Liquidity::Taker, volume),
    });

    let data = serde_json::to_value(FeesResponseData {
        schedule,
        applicable,
    })?;

    Ok(CommandResult::ok(adapter.id(), data))
}
