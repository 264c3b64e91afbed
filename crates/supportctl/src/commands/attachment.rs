//! Attachment set commands

use std::path::Path;

use serde_json::json;
use supportctl_core::types::{
    AddAttachmentsToSetRequest, Attachment, DescribeAttachmentRequest,
    DescribeAttachmentResponse, MAX_ATTACHMENT_BYTES, MAX_ATTACHMENTS_PER_SET,
};
use tracing::{info, warn};

use super::CommandContext;
use crate::cli::AttachmentCommands;
use crate::error::{Result as CliResult, SupportCtlError};
use crate::output::OutputFormat;

pub async fn handle_attachment_command(
    cmd: &AttachmentCommands,
    ctx: &CommandContext<'_>,
) -> CliResult<()> {
    match cmd {
        AttachmentCommands::Add {
            files,
            attachment_set_id,
        } => {
            let attachments = files
                .iter()
                .map(|path| read_attachment(path))
                .collect::<CliResult<Vec<_>>>()?;
            warn_over_limits(&attachments);

            let mut request = AddAttachmentsToSetRequest::new(attachments);
            if let Some(id) = attachment_set_id {
                request = request.with_attachment_set_id(id);
            }

            let (client, _) = ctx.client()?;
            let response = client.add_attachments_to_set(request).await?;
            info!(
                "Attachment set {:?} expires at {:?}",
                response.attachment_set_id, response.expiry_time
            );
            ctx.print(response, OutputFormat::Json)
        }

        AttachmentCommands::Get {
            attachment_id,
            save,
        } => {
            let (client, _) = ctx.client()?;
            let response = client
                .describe_attachment(DescribeAttachmentRequest::new(attachment_id))
                .await?;

            match save {
                Some(path) => {
                    let (file_name, data) = attachment_contents(attachment_id, response)?;
                    std::fs::write(path, &data).map_err(|e| SupportCtlError::FileError {
                        path: path.clone(),
                        message: e.to_string(),
                    })?;
                    info!("Wrote {} bytes to {}", data.len(), path);
                    ctx.print(
                        json!({
                            "fileName": file_name,
                            "savedTo": path,
                            "bytes": data.len(),
                        }),
                        OutputFormat::Json,
                    )
                }
                None => ctx.print(response, OutputFormat::Json),
            }
        }
    }
}

/// File name and bytes of a described attachment; a response without data is an error
fn attachment_contents(
    attachment_id: &str,
    response: DescribeAttachmentResponse,
) -> CliResult<(Option<String>, Vec<u8>)> {
    let attachment = response.attachment.ok_or_else(|| SupportCtlError::ApiError {
        message: format!("Attachment '{}' was not returned", attachment_id),
    })?;
    let data = attachment.data.ok_or_else(|| SupportCtlError::ApiError {
        message: format!("Attachment '{}' has no data", attachment_id),
    })?;
    Ok((attachment.file_name, data))
}

/// Read a file into an attachment named after its last path component
fn read_attachment(path: &str) -> CliResult<Attachment> {
    let data = std::fs::read(path).map_err(|e| SupportCtlError::FileError {
        path: path.to_string(),
        message: e.to_string(),
    })?;
    let file_name = Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());
    Ok(Attachment::new(file_name, data))
}

/// The service enforces the set limits; flag obvious violations before upload
fn warn_over_limits(attachments: &[Attachment]) {
    if attachments.len() > MAX_ATTACHMENTS_PER_SET {
        warn!(
            "{} files given; an attachment set holds at most {}",
            attachments.len(),
            MAX_ATTACHMENTS_PER_SET
        );
    }
    for attachment in attachments.iter().filter(|a| a.len() > MAX_ATTACHMENT_BYTES) {
        warn!(
            "{} is {} bytes; attachments are limited to {} bytes",
            attachment.file_name.as_deref().unwrap_or("attachment"),
            attachment.len(),
            MAX_ATTACHMENT_BYTES
        );
    }
}
