mod currencies;
mod endpoints;
mod fees;
mod markets;
mod request;
mod time;

use std::str::FromStr;
use std::time::Instant;

use canonex_core::{BitvavoAdapter, ConnectorConfig, ExchangeId};
use serde_json::Value;
use tracing::debug;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub struct CommandResult {
    pub exchange: ExchangeId,
    pub data: Value,
    pub warnings: Vec<String>,
    pub latency_ms: u64,
}

impl CommandResult {
    pub fn ok(exchange: ExchangeId, data: Value) -> Self {
        Self {
            exchange,
            data,
            warnings: Vec::new(),
            latency_ms: 0,
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }
}

pub async fn run(cli: &Cli) -> Result<CommandResult, CliError> {
    let exchange = ExchangeId::from_str(&cli.exchange)?;
    let adapter = build_adapter(exchange, cli);
    debug!(exchange = %exchange, timeout_ms = adapter.timeout_ms(), "running command");
    let started = Instant::now();

    let result = match &cli.command {
        Command::Time => time::run(&adapter).await?,
        Command::Markets(args) => markets::run(args, &adapter).await?,
        Command::Currencies(args) => currencies::run(args, adapter).await?,
        Command::Endpoints(args) => endpoints::run(args, &adapter)?,
        Command::Fees(args) => fees::run(args, &adapter)?,
        Command::Request(args) => request::run(args, &adapter).await?,
    };

    let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    Ok(result.with_latency(elapsed))
}

fn build_adapter(exchange: ExchangeId, cli: &Cli) -> BitvavoAdapter {
    let mut config = ConnectorConfig::from_env();
    if let Some(timeout_ms) = cli.timeout_ms {
        config = config.with_timeout_ms(timeout_ms);
    }

    match exchange {
        ExchangeId::Bitvavo => BitvavoAdapter::from_config(&config),
    }
}
