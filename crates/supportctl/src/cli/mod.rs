//! CLI structure and command definitions
//!
//! Two layers over the same client:
//! 1. Raw operation access (`api <OPERATION>`)
//! 2. Human-friendly commands (`case`, `attachment`, `trusted-advisor`, ...)

use clap::{Parser, Subcommand};
use supportctl_core::types::Language;

pub mod cases;
pub mod trusted_advisor;

pub use cases::*;
pub use trusted_advisor::*;

use crate::output;

/// Command-line client for AWS Support cases and Trusted Advisor checks
#[derive(Parser, Debug)]
#[command(name = "supportctl")]
#[command(
    version,
    about = "Command-line client for AWS Support cases and Trusted Advisor checks"
)]
#[command(long_about = "
Command-line client for AWS Support cases and Trusted Advisor checks

Credentials come from (highest first): environment variables
AWS_ACCESS_KEY_ID / AWS_SECRET_ACCESS_KEY / AWS_SESSION_TOKEN, then the
selected profile. Region and endpoint flags override both.

EXAMPLES:
    # Set up a profile (secret is prompted)
    supportctl profile set prod --access-key-id AKIA...

    # Open a case
    supportctl case create --subject \"Instance unreachable\" --body \"...\" --severity high

    # Table of open cases
    supportctl case list -o table

    # Filter output with JMESPath
    supportctl case list -q 'cases[?status==`opened`].caseId'

    # Direct operation access
    supportctl api DescribeSeverityLevels --data '{\"language\":\"en\"}'

For more help on a specific command, run:
    supportctl <command> --help
")]
pub struct Cli {
    /// Profile to use for this command
    #[arg(long, short, global = true, env = "SUPPORTCTL_PROFILE")]
    pub profile: Option<String>,

    /// Path to alternate configuration file
    #[arg(long, global = true, env = "SUPPORTCTL_CONFIG_FILE")]
    pub config_file: Option<String>,

    /// Region to sign for (the Support API is served from us-east-1)
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Override the service endpoint URL
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value = "auto")]
    pub output: OutputFormat,

    /// JMESPath query to filter output
    #[arg(long, short = 'q', global = true)]
    pub query: Option<String>,

    /// Enable verbose logging
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable retry of throttled and failed requests
    #[arg(long, global = true)]
    pub no_retry: bool,

    /// Override retry attempts
    #[arg(long, global = true)]
    pub retry_attempts: Option<u32>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Automatically choose format based on command
    Auto,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Human-readable table format
    Table,
}

impl OutputFormat {
    /// Concrete format, with `Auto` mapped to the command's preference
    pub fn resolve(self, auto: output::OutputFormat) -> output::OutputFormat {
        match self {
            OutputFormat::Auto => auto,
            OutputFormat::Json => output::OutputFormat::Json,
            OutputFormat::Yaml => output::OutputFormat::Yaml,
            OutputFormat::Table => output::OutputFormat::Table,
        }
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Support case operations
    #[command(subcommand, visible_alias = "cases")]
    Case(CaseCommands),

    /// Attachment set operations
    #[command(subcommand, visible_alias = "att")]
    Attachment(AttachmentCommands),

    /// Services and categories for case creation
    #[command(subcommand, visible_alias = "services")]
    Service(ServiceCommands),

    /// Severity levels for case creation
    #[command(subcommand)]
    Severity(SeverityCommands),

    /// Trusted Advisor checks
    #[command(subcommand, name = "trusted-advisor", visible_alias = "ta")]
    TrustedAdvisor(TrustedAdvisorCommands),

    /// Raw operation access - call any operation with a JSON body
    #[command(name = "api")]
    #[command(after_help = "EXAMPLES:
    # Operation with no input
    supportctl api DescribeSeverityLevels

    # Kebab or snake case names are accepted
    supportctl api describe-cases --data '{\"includeResolvedCases\":true}'

    # Request body from file
    supportctl api CreateCase --data @case.json

    # List operation names
    supportctl operations
")]
    Api {
        /// Operation name (e.g. DescribeCases)
        operation: String,

        /// Request body (JSON string or @file)
        #[arg(long)]
        data: Option<String>,
    },

    /// List the operations the service exposes
    #[command(visible_alias = "ops")]
    Operations,

    /// Profile management
    #[command(subcommand, visible_alias = "prof", visible_alias = "pr")]
    #[command(after_help = "EXAMPLES:
    # Create a profile (secret is prompted when omitted)
    supportctl profile set prod --access-key-id AKIA...

    # Credentials expanded from the environment at load time
    supportctl profile set ci --access-key-id '${AWS_ACCESS_KEY_ID}' \\
        --secret-access-key '${AWS_SECRET_ACCESS_KEY}'

    # List all profiles
    supportctl profile list

    # Show profile details
    supportctl profile show prod

    # Set the default profile
    supportctl profile default prod
")]
    Profile(ProfileCommands),

    /// Version information
    #[command(visible_alias = "ver", visible_alias = "v")]
    Version,

    /// Generate shell completions
    #[command(visible_alias = "comp")]
    #[command(after_help = "EXAMPLES:
    # Bash
    supportctl completions bash > ~/.local/share/bash-completion/completions/supportctl

    # Zsh
    supportctl completions zsh > ~/.zfunc/_supportctl

    # Fish
    supportctl completions fish > ~/.config/fish/completions/supportctl.fish
")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion generation
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell", alias = "power-shell")]
    PowerShell,
    Elvish,
}

/// Profile management commands
#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// List all configured profiles
    #[command(visible_alias = "ls", visible_alias = "l")]
    List,

    /// Show the path to the configuration file
    Path,

    /// Show details of a specific profile
    #[command(visible_alias = "sh", visible_alias = "get")]
    Show {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    ///
    /// The global --region and --endpoint flags are stored with the profile.
    #[command(visible_alias = "add", visible_alias = "create")]
    #[command(after_help = "EXAMPLES:
    # Secret is prompted
    supportctl profile set prod --access-key-id AKIA...

    # Keep the secret in the OS keyring
    supportctl profile set prod --access-key-id AKIA... --use-keyring

    # Point a profile at a local mock endpoint
    supportctl profile set local --access-key-id test --secret-access-key test \\
        --endpoint http://localhost:4566
")]
    Set {
        /// Profile name
        name: String,

        /// Access key ID (plaintext or ${VAR} reference)
        #[arg(long)]
        access_key_id: String,

        /// Secret access key (prompted when omitted)
        #[arg(long)]
        secret_access_key: Option<String>,

        /// Session token for temporary credentials
        #[arg(long)]
        session_token: Option<String>,

        /// Default language for cases and checks
        #[arg(long, value_enum)]
        language: Option<Language>,

        /// Store the secret and session token in the OS keyring
        #[cfg(feature = "secure-storage")]
        #[arg(long)]
        use_keyring: bool,

        /// Make this the default profile
        #[arg(long)]
        default: bool,

        /// Overwrite an existing profile without asking
        #[arg(long, short)]
        yes: bool,
    },

    /// Remove a profile
    #[command(visible_alias = "rm", visible_alias = "del", visible_alias = "delete")]
    Remove {
        /// Profile name
        name: String,

        /// Remove without asking for confirmation
        #[arg(long, short)]
        yes: bool,
    },

    /// Set the default profile
    #[command(visible_alias = "use")]
    Default {
        /// Profile name
        name: String,
    },
}
