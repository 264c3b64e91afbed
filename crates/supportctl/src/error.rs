//! Error types for supportctl
//!
//! Library errors are converted into [`SupportCtlError`] at the command
//! boundary so every failure prints with actionable suggestions.

use colored::Colorize;
use supportctl_core::SupportError;
use supportctl_core::config::ConfigError;
use thiserror::Error;

/// Cargo-style diagnostic formatter for CLI errors.
///
/// Produces structured output like:
/// ```text
/// error: Profile 'prod' not found
///
///   tip: List available profiles: supportctl profile list
/// ```
pub struct CliDiagnostic {
    message: String,
    detail: Option<String>,
    tips: Vec<(String, Vec<String>)>,
}

impl CliDiagnostic {
    /// Start a new error diagnostic with the given message.
    pub fn error(message: &str) -> Self {
        Self {
            message: message.to_string(),
            detail: None,
            tips: Vec::new(),
        }
    }

    /// Add a detail line below the error message.
    pub fn detail(mut self, text: &str) -> Self {
        self.detail = Some(text.to_string());
        self
    }

    /// Add a tip with optional example commands.
    pub fn tip(mut self, description: &str, commands: &[&str]) -> Self {
        self.tips.push((
            description.to_string(),
            commands.iter().map(|s| s.to_string()).collect(),
        ));
        self
    }

    /// Print the diagnostic to stderr with colored formatting.
    pub fn print(&self) {
        eprint!("{}{}", "error".red().bold(), ": ".bold());
        eprintln!("{}", self.message);

        if let Some(detail) = &self.detail {
            eprintln!("  {}", detail);
        }

        for (description, commands) in &self.tips {
            eprintln!();
            eprint!("  {}{}", "tip".yellow().bold(), ": ".bold());
            eprintln!("{}", description);
            for cmd in commands {
                eprintln!("      {}", cmd);
            }
        }
    }
}

/// Main error type for the supportctl application
#[derive(Error, Debug)]
pub enum SupportCtlError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Profile '{name}' not found")]
    ProfileNotFound { name: String },

    #[error("No profile configured. Use 'supportctl profile set' to configure a profile.")]
    NoProfileConfigured,

    #[error("Missing credentials: {message}")]
    MissingCredentials { message: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Request throttled: {message}")]
    Throttled { message: String },

    #[error("API error: {message}")]
    ApiError { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("File error for '{path}': {message}")]
    FileError { path: String, message: String },

    #[error("Connection error: {message}")]
    ConnectionError { message: String },

    #[error("Output formatting error: {message}")]
    OutputError { message: String },

    #[error("{0}")]
    Command(String),
}

/// Result type for supportctl operations
pub type Result<T> = std::result::Result<T, SupportCtlError>;

impl SupportCtlError {
    /// Get helpful suggestions for resolving this error
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            SupportCtlError::ProfileNotFound { name } => vec![
                "List available profiles: supportctl profile list".to_string(),
                format!(
                    "Create profile '{}': supportctl profile set {} --access-key-id <id>",
                    name, name
                ),
                "Check profile name spelling".to_string(),
            ],
            SupportCtlError::NoProfileConfigured => vec![
                "Create a profile: supportctl profile set default --access-key-id <id> --secret-access-key <secret>".to_string(),
                "Or export AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY".to_string(),
                "View profile documentation: supportctl profile --help".to_string(),
            ],
            SupportCtlError::MissingCredentials { .. } => vec![
                "Check profile details: supportctl profile show <profile>".to_string(),
                "Verify environment variables are set correctly".to_string(),
            ],
            SupportCtlError::AuthenticationFailed { .. } => vec![
                "Check your credentials: supportctl profile show <profile>".to_string(),
                "The account needs a Business, Enterprise On-Ramp or Enterprise support plan"
                    .to_string(),
                "Session tokens expire; refresh temporary credentials if you use them"
                    .to_string(),
            ],
            SupportCtlError::NotFound { .. } => vec![
                "Verify the ID is correct".to_string(),
                "List cases including resolved ones: supportctl case list --include-resolved"
                    .to_string(),
                "Check that you're using the correct profile".to_string(),
            ],
            SupportCtlError::Throttled { .. } => vec![
                "Wait a moment and retry".to_string(),
                "Increase retries: --retry-attempts 5".to_string(),
            ],
            SupportCtlError::ConnectionError { .. } => vec![
                "Check network connectivity".to_string(),
                "The Support API is served from us-east-1: --region us-east-1".to_string(),
                "Verify any endpoint override: supportctl profile show <profile>".to_string(),
            ],
            SupportCtlError::InvalidInput { .. } => vec![
                "Check the command syntax: supportctl <command> --help".to_string(),
                "List operations: supportctl operations".to_string(),
            ],
            SupportCtlError::FileError { path, .. } => vec![
                format!("Check that file exists: {}", path),
                "Verify file permissions are correct".to_string(),
            ],
            _ => vec![],
        }
    }

    /// Print a cargo-style diagnostic to stderr using colored formatting.
    pub fn print_diagnostic(&self) {
        let mut diag = CliDiagnostic::error(&format!("{}", self));

        if let SupportCtlError::Config(detail) = self
            && detail.contains("keyring")
        {
            diag = diag.detail("Credentials stored with keyring: need the secure-storage feature");
        }

        for suggestion in self.suggestions() {
            diag = diag.tip(&suggestion, &[]);
        }

        diag.print();
    }
}

impl From<SupportError> for SupportCtlError {
    fn from(err: SupportError) -> Self {
        if err.is_unauthorized() {
            return match err {
                SupportError::MissingCredentials(message) => {
                    SupportCtlError::MissingCredentials { message }
                }
                other => SupportCtlError::AuthenticationFailed {
                    message: other.to_string(),
                },
            };
        }
        if err.is_throttled() {
            return SupportCtlError::Throttled {
                message: err.to_string(),
            };
        }
        if err.is_not_found() {
            return SupportCtlError::NotFound {
                message: err.to_string(),
            };
        }
        match err {
            SupportError::Http(e) => SupportCtlError::ConnectionError {
                message: e.to_string(),
            },
            SupportError::Config(e) => SupportCtlError::from(e),
            SupportError::UnknownOperation(name) => SupportCtlError::InvalidInput {
                message: format!("Unknown operation '{}'", name),
            },
            other => SupportCtlError::ApiError {
                message: other.to_string(),
            },
        }
    }
}

impl From<ConfigError> for SupportCtlError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ProfileNotFound { name } => SupportCtlError::ProfileNotFound { name },
            ConfigError::NoProfiles { .. } => SupportCtlError::NoProfileConfigured,
            other => SupportCtlError::Config(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for SupportCtlError {
    fn from(err: serde_json::Error) -> Self {
        SupportCtlError::OutputError {
            message: format!("JSON error: {}", err),
        }
    }
}

impl From<std::io::Error> for SupportCtlError {
    fn from(err: std::io::Error) -> Self {
        SupportCtlError::OutputError {
            message: format!("IO error: {}", err),
        }
    }
}

impl From<anyhow::Error> for SupportCtlError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<SupportError>() {
            Ok(support_err) => SupportCtlError::from(support_err),
            Err(err) => match err.downcast::<ConfigError>() {
                Ok(config_err) => SupportCtlError::from(config_err),
                Err(err) => SupportCtlError::Command(format!("{:#}", err)),
            },
        }
    }
}
