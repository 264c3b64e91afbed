//! Command implementations

pub mod api;
pub mod attachment;
pub mod case;
pub mod catalog;
pub mod operations;
pub mod profile;
pub mod trusted_advisor;

use anyhow::Context;
use serde::Serialize;
use serde_json::Value;
use supportctl_core::SupportClient;

use crate::cli::OutputFormat;
use crate::connection::{ClientOverrides, ConnectionManager, ResolvedSettings};
use crate::error::{Result as CliResult, SupportCtlError};
use crate::output::{self, print_output};

/// Shared state for commands that talk to the service
pub struct CommandContext<'a> {
    pub conn_mgr: &'a ConnectionManager,
    pub profile: Option<&'a str>,
    pub overrides: ClientOverrides,
    pub output: OutputFormat,
    pub query: Option<&'a str>,
}

impl CommandContext<'_> {
    /// Build a client for the selected profile
    pub fn client(&self) -> CliResult<(SupportClient, ResolvedSettings)> {
        self.conn_mgr.create_client(self.profile, &self.overrides)
    }

    /// Print `data` in the requested format; `Auto` renders as `auto`
    pub fn print<T: Serialize>(&self, data: T, auto: output::OutputFormat) -> CliResult<()> {
        print_output(data, self.output.resolve(auto), self.query).map_err(|e| {
            SupportCtlError::OutputError {
                message: format!("{:#}", e),
            }
        })
    }
}

/// Parse a request body given as inline JSON or `@file`
pub fn parse_json_data(data: &str) -> CliResult<Value> {
    let value = if let Some(file_path) = data.strip_prefix('@') {
        let content = std::fs::read_to_string(file_path).map_err(|e| {
            SupportCtlError::FileError {
                path: file_path.to_string(),
                message: e.to_string(),
            }
        })?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON from file: {}", file_path))?
    } else {
        serde_json::from_str(data).context("Failed to parse JSON from data parameter")?
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn parses_inline_json() {
        assert_eq!(
            parse_json_data(r#"{"caseId": "case-1"}"#).unwrap(),
            json!({"caseId": "case-1"})
        );
    }

    #[test]
    fn parses_json_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("body.json");
        std::fs::write(&path, r#"{"language": "ja"}"#).unwrap();

        let value = parse_json_data(&format!("@{}", path.display())).unwrap();
        assert_eq!(value, json!({"language": "ja"}));
    }

    #[test]
    fn missing_file_is_a_file_error() {
        let err = parse_json_data("@/nonexistent/supportctl/body.json").unwrap_err();
        assert!(matches!(err, SupportCtlError::FileError { .. }));
    }

    #[test]
    fn invalid_json_is_rejected() {
        let err = parse_json_data("{not json").unwrap_err();
        assert!(err.to_string().contains("Failed to parse JSON"));
    }
}
