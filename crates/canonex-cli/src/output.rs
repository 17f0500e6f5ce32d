use serde::Serialize;
use serde_json::Value;

use canonex_core::ExchangeId;

use crate::commands::CommandResult;
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct Meta<'a> {
    exchange: ExchangeId,
    latency_ms: u64,
    warnings: &'a [String],
}

#[derive(Debug, Serialize)]
struct Document<'a> {
    meta: Meta<'a>,
    data: &'a Value,
}

pub fn to_json(result: &CommandResult, pretty: bool) -> Result<String, CliError> {
    let document = Document {
        meta: Meta {
            exchange: result.exchange,
            latency_ms: result.latency_ms,
            warnings: &result.warnings,
        },
        data: &result.data,
    };

    let payload = if pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };
    Ok(payload)
}

pub fn render(result: &CommandResult, pretty: bool) -> Result<(), CliError> {
    println!("{}", to_json(result, pretty)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn wraps_data_with_meta() {
        let result = CommandResult::ok(ExchangeId::Bitvavo, json!({ "count": 1 }))
            .with_warning("cached");
        let rendered = to_json(&result, false).expect("serializable");
        let parsed: Value = serde_json::from_str(&rendered).expect("valid json");

        assert_eq!(parsed["meta"]["exchange"], json!("bitvavo"));
        assert_eq!(parsed["meta"]["warnings"], json!(["cached"]));
        assert_eq!(parsed["data"]["count"], json!(1));
    }
}
