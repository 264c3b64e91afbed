use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, shells};
use supportctl_core::config::Config;
use tracing::{debug, error, info, trace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod connection;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::CommandContext;
use connection::{ClientOverrides, ConnectionManager};
use error::SupportCtlError;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level
    init_tracing(cli.verbose);

    // Load configuration from specified path or default location
    let loaded = if let Some(config_file) = &cli.config_file {
        let path = std::path::PathBuf::from(config_file);
        debug!("Loading config from explicit path: {:?}", path);
        Config::load_from_path(&path).map(|config| (config, Some(path)))
    } else {
        debug!("Loading config from default location");
        Config::load().map(|config| (config, None))
    };
    let (config, config_path) = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            SupportCtlError::from(e).print_diagnostic();
            std::process::exit(1);
        }
    };
    debug!(
        "Creating ConnectionManager with config_path: {:?}",
        config_path
    );
    let conn_mgr = ConnectionManager::with_config_path(config, config_path);

    if let Err(e) = execute_command(&cli, &conn_mgr).await {
        e.print_diagnostic();
        std::process::exit(1);
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    // RUST_LOG wins over the verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "supportctl=warn,supportctl_core=warn",
            1 => "supportctl=info,supportctl_core=info",
            2 => "supportctl=debug,supportctl_core=debug",
            _ => "supportctl=trace,supportctl_core=trace",
        };
        tracing_subscriber::EnvFilter::new(level)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .compact(),
        )
        .init();

    debug!("Tracing initialized with verbosity level: {}", verbose);
}

async fn execute_command(cli: &Cli, conn_mgr: &ConnectionManager) -> Result<(), SupportCtlError> {
    // Log command execution with sanitized parameters
    trace!("Executing command: {}", format_command(&cli.command));
    info!("Command: {}", format_command(&cli.command));

    let ctx = CommandContext {
        conn_mgr,
        profile: cli.profile.as_deref(),
        overrides: ClientOverrides {
            region: cli.region.clone(),
            endpoint: cli.endpoint.clone(),
            no_retry: cli.no_retry,
            retry_attempts: cli.retry_attempts,
        },
        output: cli.output,
        query: cli.query.as_deref(),
    };

    let start = std::time::Instant::now();
    let result = match &cli.command {
        Commands::Version => {
            debug!("Showing version information");
            match cli.output {
                cli::OutputFormat::Json | cli::OutputFormat::Yaml => {
                    let output_data = serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "name": env!("CARGO_PKG_NAME"),
                    });
                    ctx.print(output_data, output::OutputFormat::Json)
                }
                _ => {
                    println!("supportctl {}", env!("CARGO_PKG_VERSION"));
                    Ok(())
                }
            }
        }
        Commands::Completions { shell } => {
            debug!("Generating completions for {:?}", shell);
            generate_completions(*shell);
            Ok(())
        }
        Commands::Operations => {
            commands::operations::handle_operations_command(cli.output, cli.query.as_deref())
        }
        Commands::Profile(profile_cmd) => {
            debug!("Executing profile command");
            let args = commands::profile::ProfileArgs {
                output_format: cli.output,
                query: cli.query.as_deref(),
                region: cli.region.as_deref(),
                endpoint: cli.endpoint.as_deref(),
            };
            commands::profile::handle_profile_command(profile_cmd, conn_mgr, &args).await
        }
        Commands::Api { operation, data } => {
            commands::api::handle_api_command(&ctx, operation, data.as_deref()).await
        }
        Commands::Case(case_cmd) => commands::case::handle_case_command(case_cmd, &ctx).await,
        Commands::Attachment(attachment_cmd) => {
            commands::attachment::handle_attachment_command(attachment_cmd, &ctx).await
        }
        Commands::Service(service_cmd) => {
            commands::catalog::handle_service_command(service_cmd, &ctx).await
        }
        Commands::Severity(severity_cmd) => {
            commands::catalog::handle_severity_command(severity_cmd, &ctx).await
        }
        Commands::TrustedAdvisor(ta_cmd) => {
            commands::trusted_advisor::handle_trusted_advisor_command(ta_cmd, &ctx).await
        }
    };

    let duration = start.elapsed();
    match &result {
        Ok(_) => info!("Command completed successfully in {:?}", duration),
        Err(e) => error!("Command failed after {:?}: {}", duration, e),
    }

    result
}

/// Generate shell completions
fn generate_completions(shell: cli::Shell) {
    let mut cmd = cli::Cli::command();
    let name = cmd.get_name().to_string();

    match shell {
        cli::Shell::Bash => generate(shells::Bash, &mut cmd, name, &mut std::io::stdout()),
        cli::Shell::Zsh => generate(shells::Zsh, &mut cmd, name, &mut std::io::stdout()),
        cli::Shell::Fish => generate(shells::Fish, &mut cmd, name, &mut std::io::stdout()),
        cli::Shell::PowerShell => {
            generate(shells::PowerShell, &mut cmd, name, &mut std::io::stdout())
        }
        cli::Shell::Elvish => generate(shells::Elvish, &mut cmd, name, &mut std::io::stdout()),
    }
}

/// Format command for human-readable logging (without sensitive data)
fn format_command(command: &Commands) -> String {
    match command {
        Commands::Version => "version".to_string(),
        Commands::Completions { shell } => format!("completions {:?}", shell),
        Commands::Operations => "operations".to_string(),
        Commands::Profile(cmd) => {
            use cli::ProfileCommands::*;
            match cmd {
                List => "profile list".to_string(),
                Path => "profile path".to_string(),
                Show { name } => format!("profile show {}", name),
                Set { name, .. } => format!("profile set {} [credentials redacted]", name),
                Remove { name, .. } => format!("profile remove {}", name),
                cli::ProfileCommands::Default { name } => format!("profile default {}", name),
            }
        }
        Commands::Api { operation, data } => format!(
            "api {} {}",
            operation,
            if data.is_some() { "with data" } else { "no data" }
        ),
        Commands::Case(cmd) => {
            use cli::CaseCommands::*;
            match cmd {
                Create { .. } => "case create [content redacted]".to_string(),
                List { .. } => "case list".to_string(),
                Get { case_id } => format!("case get {}", case_id),
                Communications { case_id, .. } => format!("case communications {}", case_id),
                Reply { case_id, .. } => format!("case reply {} [content redacted]", case_id),
                Resolve { case_id } => format!("case resolve {}", case_id),
            }
        }
        Commands::Attachment(cmd) => {
            use cli::AttachmentCommands::*;
            match cmd {
                Add { files, .. } => format!("attachment add [{} files]", files.len()),
                Get { attachment_id, .. } => format!("attachment get {}", attachment_id),
            }
        }
        Commands::Service(_) => "service list".to_string(),
        Commands::Severity(_) => "severity list".to_string(),
        Commands::TrustedAdvisor(cmd) => format!("trusted-advisor {:?}", cmd),
    }
}
