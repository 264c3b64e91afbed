//! Profile management command implementations

use crate::cli::{OutputFormat, ProfileCommands};
use crate::connection::ConnectionManager;
use crate::error::SupportCtlError;
use crate::output;
use anyhow::Context;
use serde_json::{Value, json};
use supportctl_core::config::{CredentialStore, Profile};
use supportctl_core::transport::DEFAULT_REGION;
use supportctl_core::types::Language;
use tracing::{debug, trace, warn};

/// Global flags that profile commands read
pub struct ProfileArgs<'a> {
    pub output_format: OutputFormat,
    pub query: Option<&'a str>,
    pub region: Option<&'a str>,
    pub endpoint: Option<&'a str>,
}

/// Handle profile management commands
pub async fn handle_profile_command(
    profile_cmd: &ProfileCommands,
    conn_mgr: &ConnectionManager,
    args: &ProfileArgs<'_>,
) -> Result<(), SupportCtlError> {
    use ProfileCommands::*;

    match profile_cmd {
        List => handle_list(conn_mgr, args),
        Path => handle_path(conn_mgr, args),
        Show { name } => handle_show(conn_mgr, name, args),
        Set {
            name,
            access_key_id,
            secret_access_key,
            session_token,
            language,
            #[cfg(feature = "secure-storage")]
            use_keyring,
            default,
            yes,
        } => {
            #[cfg(not(feature = "secure-storage"))]
            let use_keyring = &false;
            handle_set(
                conn_mgr,
                args,
                SetParams {
                    name,
                    access_key_id,
                    secret_access_key: secret_access_key.as_deref(),
                    session_token: session_token.as_deref(),
                    language: *language,
                    use_keyring: *use_keyring,
                    make_default: *default,
                    yes: *yes,
                },
            )
        }
        Remove { name, yes } => handle_remove(conn_mgr, name, *yes),
        ProfileCommands::Default { name } => handle_default(conn_mgr, name),
    }
}

fn print(data: Value, args: &ProfileArgs<'_>, auto: output::OutputFormat) -> Result<(), SupportCtlError> {
    output::print_output(data, args.output_format.resolve(auto), args.query).map_err(|e| {
        SupportCtlError::OutputError {
            message: format!("{:#}", e),
        }
    })
}

/// Show a credential without revealing it
fn mask_credential(value: &str) -> String {
    if CredentialStore::is_keyring_reference(value) || value.starts_with("${") {
        return value.to_string();
    }
    let prefix: String = value.chars().take(4).collect();
    format!("{}...", prefix)
}

/// How a secret is stored: in the keyring, or inline in the file
fn storage_kind(value: &str) -> &'static str {
    if CredentialStore::is_keyring_reference(value) {
        "keyring"
    } else {
        "configured"
    }
}

fn profile_summary(name: &str, profile: &Profile, is_default: bool) -> Value {
    json!({
        "name": name,
        "default": is_default,
        "region": profile.region,
        "endpoint": profile.endpoint,
        "credentials": if profile.uses_keyring() { "keyring" } else { "plaintext" },
    })
}

fn profile_details(name: &str, profile: &Profile, is_default: bool) -> Value {
    json!({
        "name": name,
        "default": is_default,
        "access_key_id": mask_credential(&profile.access_key_id),
        "secret_access_key": storage_kind(&profile.secret_access_key),
        "session_token": profile.session_token.as_deref().map(storage_kind),
        "region": profile.region,
        "endpoint": profile.endpoint,
        "language": profile.language,
        "retry": profile.retry,
    })
}

fn handle_list(conn_mgr: &ConnectionManager, args: &ProfileArgs<'_>) -> Result<(), SupportCtlError> {
    debug!("Listing all configured profiles");
    let profiles = conn_mgr.config.list_profiles();
    trace!("Found {} profiles", profiles.len());

    if profiles.is_empty() && args.output_format == OutputFormat::Auto {
        println!("No profiles configured.");
        println!("Use 'supportctl profile set' to create a profile.");
        return Ok(());
    }

    let default = conn_mgr.config.default_profile.as_deref();
    let rows: Vec<Value> = profiles
        .iter()
        .map(|(name, profile)| profile_summary(name, profile, default == Some(name.as_str())))
        .collect();
    print(Value::Array(rows), args, output::OutputFormat::Table)
}

fn handle_path(conn_mgr: &ConnectionManager, args: &ProfileArgs<'_>) -> Result<(), SupportCtlError> {
    let config_path = conn_mgr.config_file()?;

    match args.output_format {
        OutputFormat::Auto => {
            println!("{}", config_path.display());
            Ok(())
        }
        _ => print(
            json!({ "config_path": config_path.display().to_string() }),
            args,
            output::OutputFormat::Json,
        ),
    }
}

fn handle_show(
    conn_mgr: &ConnectionManager,
    name: &str,
    args: &ProfileArgs<'_>,
) -> Result<(), SupportCtlError> {
    let profile = conn_mgr.config.profile(name)?;
    let is_default = conn_mgr.config.default_profile.as_deref() == Some(name);

    match args.output_format {
        OutputFormat::Auto => {
            println!("Profile: {}", name);
            println!("Access key ID: {}", mask_credential(&profile.access_key_id));
            println!(
                "Secret access key: {}",
                storage_kind(&profile.secret_access_key)
            );
            if let Some(token) = &profile.session_token {
                println!("Session token: {}", storage_kind(token));
            }
            println!("Region: {}", profile.region);
            if let Some(endpoint) = &profile.endpoint {
                println!("Endpoint: {}", endpoint);
            }
            if let Some(language) = profile.language {
                println!("Language: {}", language);
            }
            if let Some(retry) = &profile.retry {
                println!(
                    "Retry: {} (max {} attempts)",
                    if retry.enabled { "enabled" } else { "disabled" },
                    retry.max_attempts
                );
            }
            if is_default {
                println!("Default: yes");
            }
            Ok(())
        }
        _ => print(
            profile_details(name, profile, is_default),
            args,
            output::OutputFormat::Json,
        ),
    }
}

struct SetParams<'a> {
    name: &'a str,
    access_key_id: &'a str,
    secret_access_key: Option<&'a str>,
    session_token: Option<&'a str>,
    language: Option<Language>,
    use_keyring: bool,
    make_default: bool,
    yes: bool,
}

/// Ask a yes/no question on stdin; anything but "y"/"yes" is a no
fn confirm(prompt: &str) -> Result<bool, SupportCtlError> {
    use std::io::{self, Write};

    print!("{} (y/N): ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim().to_lowercase();
    Ok(input == "y" || input == "yes")
}

fn handle_set(
    conn_mgr: &ConnectionManager,
    args: &ProfileArgs<'_>,
    params: SetParams<'_>,
) -> Result<(), SupportCtlError> {
    let name = params.name;
    debug!("Setting profile: {}", name);

    let existing = conn_mgr.config.profiles.get(name);
    if existing.is_some()
        && !params.yes
        && !confirm(&format!(
            "Profile '{}' already exists. Credentials will be updated (other settings preserved). Continue?",
            name
        ))?
    {
        println!("Profile update cancelled.");
        return Ok(());
    }

    let secret = match params.secret_access_key {
        Some(secret) => secret.to_string(),
        None => rpassword::prompt_password("Enter secret access key: ")
            .context("Failed to read secret access key")?,
    };

    let (stored_secret, stored_token) = if params.use_keyring {
        let store = CredentialStore::new();
        let secret_ref = store
            .store_credential(&format!("{}-secret-access-key", name), &secret)
            .context("Failed to store secret access key in keyring")?;
        let token_ref = params
            .session_token
            .map(|token| {
                store
                    .store_credential(&format!("{}-session-token", name), token)
                    .context("Failed to store session token in keyring")
            })
            .transpose()?;
        println!(
            "Credentials stored using the {} backend",
            store.storage_backend()
        );
        (secret_ref, token_ref)
    } else {
        (secret, params.session_token.map(str::to_string))
    };

    let profile = Profile {
        access_key_id: params.access_key_id.to_string(),
        secret_access_key: stored_secret,
        session_token: stored_token,
        region: args
            .region
            .map(str::to_string)
            .or_else(|| existing.map(|p| p.region.clone()))
            .unwrap_or_else(|| DEFAULT_REGION.to_string()),
        endpoint: args
            .endpoint
            .map(str::to_string)
            .or_else(|| existing.and_then(|p| p.endpoint.clone())),
        language: params.language.or_else(|| existing.and_then(|p| p.language)),
        retry: existing.and_then(|p| p.retry.clone()),
    };

    let mut config = conn_mgr.config.clone();
    config.set_profile(name.to_string(), profile);
    let first_profile = config.profiles.len() == 1;
    if params.make_default || first_profile {
        config.default_profile = Some(name.to_string());
    }

    let path = conn_mgr.save_config(&config)?;
    println!("Profile '{}' saved successfully to:", name);
    println!("  {}", path.display());

    if config.default_profile.as_deref() != Some(name) {
        println!();
        println!("Tip: Make it the default profile with:");
        println!("  supportctl profile default {}", name);
    }

    Ok(())
}

fn handle_remove(conn_mgr: &ConnectionManager, name: &str, yes: bool) -> Result<(), SupportCtlError> {
    debug!("Removing profile: {}", name);

    let profile = conn_mgr.config.profile(name)?;
    let is_default = conn_mgr.config.default_profile.as_deref() == Some(name);
    if is_default {
        println!("Warning: '{}' is the default profile.", name);
    }

    if !yes && !confirm(&format!("Are you sure you want to remove profile '{}'?", name))? {
        println!("Profile removal cancelled.");
        return Ok(());
    }

    // Drop keyring entries the profile owns
    let keyring_keys = [
        Some(profile.access_key_id.as_str()),
        Some(profile.secret_access_key.as_str()),
        profile.session_token.as_deref(),
    ];
    let store = CredentialStore::new();
    for key in keyring_keys
        .into_iter()
        .flatten()
        .filter_map(CredentialStore::keyring_key)
    {
        if let Err(e) = store.delete_credential(key) {
            warn!("Could not delete keyring entry '{}': {}", key, e);
        }
    }

    let mut config = conn_mgr.config.clone();
    config.remove_profile(name);
    conn_mgr.save_config(&config)?;

    if is_default {
        println!("Default profile cleared.");
    }
    println!("Profile '{}' removed successfully.", name);
    Ok(())
}

fn handle_default(conn_mgr: &ConnectionManager, name: &str) -> Result<(), SupportCtlError> {
    debug!("Setting default profile: {}", name);
    conn_mgr.config.profile(name)?;

    let mut config = conn_mgr.config.clone();
    config.default_profile = Some(name.to_string());
    conn_mgr.save_config(&config)?;

    println!("Default profile set to '{}'", name);
    Ok(())
}
