use std::collections::BTreeMap;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use canonex_core::{
    ApiScope, BitvavoAdapter, Exchange, HttpMethod, Params, PreparedRequest, ValidationError,
};

use crate::cli::RequestArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct PreparedRequestData {
    scope: ApiScope,
    method: HttpMethod,
    url: String,
    body: Option<Params>,
    headers: BTreeMap<String, String>,
}

impl From<PreparedRequest> for PreparedRequestData {
    fn from(request: PreparedRequest) -> Self {
        Self {
            scope: request.scope,
            method: request.method,
            url: request.url,
            body: request.body,
            headers: request.headers,
        }
    }
}

#[derive(Debug, Serialize)]
struct RequestResponseData {
    request: PreparedRequestData,
    #[serde(skip_serializing_if = "Option::is_none")]
    response: Option<Value>,
}

pub async fn run(args: &RequestArgs, adapter: &BitvavoAdapter) -> Result<CommandResult, CliError> {
    let scope = ApiScope::from_str(&args.scope)?;
    let method = HttpMethod::from_str(&args.method)?;
    let params = parse_params(&args.params)?;

    let prepared = adapter.prepare(&args.path, scope, method, &params)?;

    if args.dry_run {
        let data = serde_json::to_value(RequestResponseData {
            request: prepared.into(),
            response: None,
        })?;
        let mut result = CommandResult::ok(adapter.id(), data);
        if scope == ApiScope::Private {
            result = result.with_warning("dry run shows the request before signing");
        }
        return Ok(result);
    }

    let response = adapter.request(&args.path, scope, method, &params).await?;
    let data = serde_json::to_value(RequestResponseData {
        request: prepared.into(),
        response: Some(response),
    })?;

    Ok(CommandResult::ok(adapter.id(), data))
}

/// Parses repeated `key=value` arguments. Values stay strings; a later
/// duplicate key replaces the earlier one.
fn parse_params(raw: &[String]) -> Result<Params, ValidationError> {
    raw.iter()
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_owned(), Value::String(value.to_owned())))
            }
            _ => Err(ValidationError::InvalidParam {
                value: pair.clone(),
            }),
        })
        .collect()
}
