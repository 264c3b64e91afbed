//! Listing of the operation table

use supportctl_core::OPERATIONS;

use crate::cli::OutputFormat;
use crate::error::{Result as CliResult, SupportCtlError};
use crate::output::{self, print_output};

pub fn handle_operations_command(
    output_format: OutputFormat,
    query: Option<&str>,
) -> CliResult<()> {
    print_output(
        OPERATIONS,
        output_format.resolve(output::OutputFormat::Table),
        query,
    )
    .map_err(|e| SupportCtlError::OutputError {
        message: format!("{:#}", e),
    })
}
