//! Trusted Advisor commands

use supportctl_core::types::{
    DescribeTrustedAdvisorCheckRefreshStatusesRequest, DescribeTrustedAdvisorCheckResultRequest,
    DescribeTrustedAdvisorCheckSummariesRequest, DescribeTrustedAdvisorChecksRequest,
    RefreshTrustedAdvisorCheckRequest,
};
use tracing::info;

use super::CommandContext;
use crate::cli::TrustedAdvisorCommands;
use crate::error::Result as CliResult;
use crate::output::OutputFormat;

pub async fn handle_trusted_advisor_command(
    cmd: &TrustedAdvisorCommands,
    ctx: &CommandContext<'_>,
) -> CliResult<()> {
    let (client, settings) = ctx.client()?;

    match cmd {
        TrustedAdvisorCommands::Checks { language } => {
            // The service requires a language here
            let language = language.or(settings.language).unwrap_or_default();
            let response = client
                .describe_trusted_advisor_checks(DescribeTrustedAdvisorChecksRequest::new(language))
                .await?;
            ctx.print(response, OutputFormat::Json)
        }

        TrustedAdvisorCommands::Result { check_id, language } => {
            let mut request = DescribeTrustedAdvisorCheckResultRequest::new(check_id);
            if let Some(language) = language.or(settings.language) {
                request = request.with_language(language);
            }
            let response = client.describe_trusted_advisor_check_result(request).await?;
            ctx.print(response, OutputFormat::Json)
        }

        TrustedAdvisorCommands::Summaries { check_ids } => {
            let response = client
                .describe_trusted_advisor_check_summaries(
                    DescribeTrustedAdvisorCheckSummariesRequest::new(check_ids.clone()),
                )
                .await?;
            ctx.print(response, OutputFormat::Json)
        }

        TrustedAdvisorCommands::Refresh { check_id } => {
            let response = client
                .refresh_trusted_advisor_check(RefreshTrustedAdvisorCheckRequest::new(check_id))
                .await?;
            info!(
                "Check {} refresh status: {}",
                response.status.check_id,
                response.status.status.as_str()
            );
            ctx.print(response, OutputFormat::Json)
        }

        TrustedAdvisorCommands::RefreshStatus { check_ids } => {
            let response = client
                .describe_trusted_advisor_check_refresh_statuses(
                    DescribeTrustedAdvisorCheckRefreshStatusesRequest::new(check_ids.clone()),
                )
                .await?;
            ctx.print(response, OutputFormat::Table)
        }
    }
}
