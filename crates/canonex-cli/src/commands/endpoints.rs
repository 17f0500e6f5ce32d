use std::str::FromStr;

use serde::Serialize;

use canonex_core::{ApiScope, ApiUrls, BitvavoAdapter, EndpointSpec, Exchange};

use crate::cli::EndpointsArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct EndpointsResponseData<'a> {
    version: &'a str,
    urls: &'a ApiUrls,
    endpoints: Vec<&'a EndpointSpec>,
}

pub fn run(args: &EndpointsArgs, adapter: &BitvavoAdapter) -> Result<CommandResult, CliError> {
    let scope = args
        .scope
        .as_deref()
        .map(ApiScope::from_str)
        .transpose()?;

    let descriptor = adapter.descriptor();
    let endpoints = descriptor
        .endpoints
        .iter()
        .filter(|spec| scope.map_or(true, |scope| spec.scope == scope))
        .collect::<Vec<_>>();

    let data = serde_json::to_value(EndpointsResponseData {
        version: &descriptor.version,
        urls: &descriptor.urls.api,
        endpoints,
    })?;

    Ok(CommandResult::ok(adapter.id(), data))
}
