//! Support case commands

use serde_json::json;
use supportctl_core::pagination::{describe_all_cases, describe_all_communications};
use supportctl_core::types::{
    AddCommunicationToCaseRequest, CreateCaseRequest, DescribeCasesRequest,
    DescribeCommunicationsRequest, ResolveCaseRequest,
};
use tracing::{debug, info};

use super::CommandContext;
use crate::cli::CaseCommands;
use crate::error::{Result as CliResult, SupportCtlError};
use crate::output::OutputFormat;

pub async fn handle_case_command(cmd: &CaseCommands, ctx: &CommandContext<'_>) -> CliResult<()> {
    let (client, settings) = ctx.client()?;

    match cmd {
        CaseCommands::Create {
            subject,
            body,
            service_code,
            category_code,
            severity,
            issue_type,
            language,
            cc_email_addresses,
            attachment_set_id,
        } => {
            let mut request = CreateCaseRequest::new(subject, body)
                .with_cc_email_addresses(cc_email_addresses.clone());
            if let Some(code) = service_code {
                request = request.with_service_code(code);
            }
            if let Some(code) = category_code {
                request = request.with_category_code(code);
            }
            if let Some(severity) = severity {
                request = request.with_severity(*severity);
            }
            if let Some(issue_type) = issue_type {
                request = request.with_issue_type(*issue_type);
            }
            if let Some(language) = language.or(settings.language) {
                request = request.with_language(language);
            }
            if let Some(id) = attachment_set_id {
                request = request.with_attachment_set_id(id);
            }

            let response = client.create_case(request).await?;
            info!("Created case {:?}", response.case_id);
            ctx.print(response, OutputFormat::Json)
        }

        CaseCommands::List {
            case_ids,
            display_id,
            after,
            before,
            include_resolved,
            include_communications,
            language,
            max_results,
            next_token,
            all,
        } => {
            let request = DescribeCasesRequest {
                after_time: after.clone(),
                before_time: before.clone(),
                case_id_list: case_ids.clone(),
                display_id: display_id.clone(),
                include_communications: *include_communications,
                include_resolved_cases: include_resolved.then_some(true),
                language: language.or(settings.language),
                max_results: *max_results,
                next_token: next_token.clone(),
            };

            if *all {
                let cases = describe_all_cases(&client, request).await?;
                debug!("Fetched {} cases", cases.len());
                ctx.print(json!({ "cases": cases }), OutputFormat::Json)
            } else {
                let response = client.describe_cases(request).await?;
                ctx.print(response, OutputFormat::Json)
            }
        }

        CaseCommands::Get { case_id } => {
            let mut request = DescribeCasesRequest::for_cases(vec![case_id.clone()]);
            request.include_resolved_cases = Some(true);
            request.language = settings.language;

            let response = client.describe_cases(request).await?;
            let case = response
                .cases
                .into_iter()
                .find(|c| c.case_id.as_deref() == Some(case_id.as_str()))
                .ok_or_else(|| SupportCtlError::NotFound {
                    message: format!("Case '{}' does not exist", case_id),
                })?;
            ctx.print(case, OutputFormat::Json)
        }

        CaseCommands::Communications {
            case_id,
            after,
            before,
            max_results,
            next_token,
            all,
        } => {
            let mut request = DescribeCommunicationsRequest::for_case(case_id);
            request.after_time = after.clone();
            request.before_time = before.clone();
            request.max_results = *max_results;
            request.next_token = next_token.clone();

            if *all {
                let communications = describe_all_communications(&client, request).await?;
                debug!("Fetched {} communications", communications.len());
                ctx.print(
                    json!({ "communications": communications }),
                    OutputFormat::Json,
                )
            } else {
                let response = client.describe_communications(request).await?;
                ctx.print(response, OutputFormat::Json)
            }
        }

        CaseCommands::Reply {
            case_id,
            body,
            cc_email_addresses,
            attachment_set_id,
        } => {
            let mut request = AddCommunicationToCaseRequest::new(case_id, body)
                .with_cc_email_addresses(cc_email_addresses.clone());
            if let Some(id) = attachment_set_id {
                request = request.with_attachment_set_id(id);
            }

            let response = client.add_communication_to_case(request).await?;
            if !response.result {
                return Err(SupportCtlError::ApiError {
                    message: format!("The service did not accept the communication for {}", case_id),
                });
            }
            ctx.print(response, OutputFormat::Json)
        }

        CaseCommands::Resolve { case_id } => {
            let response = client.resolve_case(ResolveCaseRequest::new(case_id)).await?;
            info!(
                "Case {} moved from {:?} to {:?}",
                case_id, response.initial_case_status, response.final_case_status
            );
            ctx.print(response, OutputFormat::Json)
        }
    }
}
