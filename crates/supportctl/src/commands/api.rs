//! Raw operation access: any operation by name with a JSON body

use serde_json::Value;
use supportctl_core::operations;
use tracing::info;

use super::{CommandContext, parse_json_data};
use crate::error::{Result as CliResult, SupportCtlError};
use crate::output::OutputFormat;

/// Handle `api <OPERATION> [--data JSON|@file]`
pub async fn handle_api_command(
    ctx: &CommandContext<'_>,
    operation: &str,
    data: Option<&str>,
) -> CliResult<()> {
    let info = operations::find_lenient(operation).ok_or_else(|| {
        SupportCtlError::InvalidInput {
            message: format!("Unknown operation '{}'", operation),
        }
    })?;

    let body = match data {
        Some(data) => parse_json_data(data)?,
        None => Value::Object(Default::default()),
    };
    if !body.is_object() {
        return Err(SupportCtlError::InvalidInput {
            message: "Request body must be a JSON object".to_string(),
        });
    }

    info!(
        "Raw call: {} {}",
        info.name,
        if data.is_some() { "with data" } else { "no data" }
    );
    let (client, _) = ctx.client()?;
    let response = client.call_raw(info.name, body).await?;
    ctx.print(response, OutputFormat::Json)
}
