//! Service and severity catalog commands

use supportctl_core::types::{DescribeServicesRequest, DescribeSeverityLevelsRequest};

use super::CommandContext;
use crate::cli::{ServiceCommands, SeverityCommands};
use crate::error::Result as CliResult;
use crate::output::OutputFormat;

pub async fn handle_service_command(
    cmd: &ServiceCommands,
    ctx: &CommandContext<'_>,
) -> CliResult<()> {
    let (client, settings) = ctx.client()?;
    match cmd {
        ServiceCommands::List {
            service_codes,
            language,
        } => {
            let request = DescribeServicesRequest {
                language: language.or(settings.language),
                service_code_list: service_codes.clone(),
            };
            let response = client.describe_services(request).await?;
            ctx.print(response, OutputFormat::Json)
        }
    }
}

pub async fn handle_severity_command(
    cmd: &SeverityCommands,
    ctx: &CommandContext<'_>,
) -> CliResult<()> {
    let (client, settings) = ctx.client()?;
    match cmd {
        SeverityCommands::List { language } => {
            let request = DescribeSeverityLevelsRequest {
                language: language.or(settings.language),
            };
            let response = client.describe_severity_levels(request).await?;
            ctx.print(response, OutputFormat::Table)
        }
    }
}
