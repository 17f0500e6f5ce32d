use serde::Serialize;

use canonex_core::{BitvavoAdapter, Exchange, UtcDateTime};

use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct TimeResponseData {
    time: UtcDateTime,
    unix_ms: i64,
}

pub async fn run(adapter: &BitvavoAdapter) -> Result<CommandResult, CliError> {
    let time = adapter.fetch_time().await?;
    let data = serde_json::to_value(TimeResponseData {
        time,
        unix_ms: time.unix_millis(),
    })?;

    Ok(CommandResult::ok(adapter.id(), data))
}
