//! Configuration management for supportctl
//!
//! Configuration is stored in TOML with any number of named profiles, each
//! holding one set of AWS credentials plus the region and optional endpoint
//! to talk to.
//!
//! ```toml
//! default_profile = "prod"
//!
//! [profiles.prod]
//! access_key_id = "${AWS_ACCESS_KEY_ID}"
//! secret_access_key = "keyring:prod-secret-access-key"
//! region = "us-east-1"
//!
//! [profiles.prod.retry]
//! max_attempts = 5
//! ```

#[cfg(target_os = "macos")]
use directories::BaseDirs;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::credential::CredentialStore;
use super::error::{ConfigError, Result};
use super::resilience::RetryConfig;
use crate::signing::Credentials;
use crate::transport::DEFAULT_REGION;
use crate::types::Language;

/// Environment variables consulted for credentials and region
pub const ENV_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const ENV_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const ENV_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";
pub const ENV_REGION: &str = "AWS_REGION";
pub const ENV_DEFAULT_REGION: &str = "AWS_DEFAULT_REGION";

/// Main configuration structure
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    /// Profile used when none is named explicitly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,
    /// Map of profile name -> profile configuration
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

/// Individual profile configuration
///
/// Credential fields accept plaintext, `${VAR}` references (expanded at
/// load time) and `keyring:<key>` references.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Profile {
    pub access_key_id: String,
    pub secret_access_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
    #[serde(default = "default_region")]
    pub region: String,
    /// Override of the regional endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Default language for cases and check descriptions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry: Option<RetryConfig>,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

impl Profile {
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: None,
            region: default_region(),
            endpoint: None,
            language: None,
            retry: None,
        }
    }

    /// Whether any credential is stored in the keyring
    pub fn uses_keyring(&self) -> bool {
        CredentialStore::is_keyring_reference(&self.access_key_id)
            || CredentialStore::is_keyring_reference(&self.secret_access_key)
            || self
                .session_token
                .as_deref()
                .is_some_and(CredentialStore::is_keyring_reference)
    }

    /// Resolve the profile's credentials through the credential store
    ///
    /// With `env_override`, a complete `AWS_ACCESS_KEY_ID` and
    /// `AWS_SECRET_ACCESS_KEY` pair replaces the stored credentials as a
    /// whole; `AWS_SESSION_TOKEN` is only taken together with that pair.
    pub fn resolve_credentials(&self, env_override: bool) -> Result<Credentials> {
        if env_override && let Some(credentials) = credentials_from_env() {
            return Ok(credentials);
        }

        let store = CredentialStore::new();
        let access_key_id = store
            .get_credential(&self.access_key_id, None)
            .map_err(|e| {
                ConfigError::CredentialError(format!("Failed to resolve access key ID: {}", e))
            })?;
        let secret_access_key = store
            .get_credential(&self.secret_access_key, None)
            .map_err(|e| {
                ConfigError::CredentialError(format!(
                    "Failed to resolve secret access key: {}",
                    e
                ))
            })?;
        let session_token = self
            .session_token
            .as_deref()
            .map(|token| {
                store.get_credential(token, None).map_err(|e| {
                    ConfigError::CredentialError(format!(
                        "Failed to resolve session token: {}",
                        e
                    ))
                })
            })
            .transpose()?;

        let mut credentials = Credentials::new(access_key_id, secret_access_key);
        if let Some(token) = session_token.filter(|t| !t.is_empty()) {
            credentials = credentials.with_session_token(token);
        }
        Ok(credentials)
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Credentials from the environment, only when the key pair is complete
pub fn credentials_from_env() -> Option<Credentials> {
    let access_key_id = env_non_empty(ENV_ACCESS_KEY_ID)?;
    let secret_access_key = env_non_empty(ENV_SECRET_ACCESS_KEY)?;
    let mut credentials = Credentials::new(access_key_id, secret_access_key);
    if let Some(token) = env_non_empty(ENV_SESSION_TOKEN) {
        credentials = credentials.with_session_token(token);
    }
    Some(credentials)
}

impl Config {
    /// Pick the profile to use: the explicit name, then `default_profile`,
    /// then the first profile in alphabetical order
    pub fn resolve_profile(&self, explicit_profile: Option<&str>) -> Result<String> {
        if let Some(profile_name) = explicit_profile {
            return Ok(profile_name.to_string());
        }

        if let Some(ref default) = self.default_profile {
            return Ok(default.clone());
        }

        if let Some((name, _)) = self.list_profiles().first() {
            return Ok((*name).clone());
        }

        Err(ConfigError::NoProfiles {
            suggestion: "Use 'supportctl profile set' to create a profile, or set \
                         AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY."
                .to_string(),
        })
    }

    /// Look up a profile by name
    pub fn profile(&self, name: &str) -> Result<&Profile> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::ProfileNotFound {
                name: name.to_string(),
            })
    }

    /// Load configuration from the standard location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path; a missing file is an empty config
    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| ConfigError::LoadError {
            path: config_path.display().to_string(),
            source: e,
        })?;

        let expanded_content = Self::expand_env_vars(&content);

        let config: Config = toml::from_str(&expanded_content)?;

        Ok(config)
    }

    /// Save configuration to the standard location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to_path(&config_path)
    }

    /// Save configuration to a specific path
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::SaveError {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(config_path, content).map_err(|e| ConfigError::SaveError {
            path: config_path.display().to_string(),
            source: e,
        })?;

        Ok(())
    }

    /// Set or update a profile
    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Remove a profile by name, clearing the default if it pointed there
    pub fn remove_profile(&mut self, name: &str) -> Option<Profile> {
        if self.default_profile.as_deref() == Some(name) {
            self.default_profile = None;
        }
        self.profiles.remove(name)
    }

    /// List all profiles sorted by name
    pub fn list_profiles(&self) -> Vec<(&String, &Profile)> {
        let mut profiles: Vec<_> = self.profiles.iter().collect();
        profiles.sort_by_key(|(name, _)| *name);
        profiles
    }

    /// Get the path to the configuration file
    ///
    /// On macOS, `~/.config/supportctl/config.toml` is used when it (or its
    /// directory) exists, otherwise the platform path.
    ///
    /// On Linux: ~/.config/supportctl/config.toml
    /// On Windows: %APPDATA%\supportctl\supportctl\config\config.toml
    pub fn config_path() -> Result<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            if let Some(base_dirs) = BaseDirs::new() {
                let linux_style_path = base_dirs
                    .home_dir()
                    .join(".config")
                    .join("supportctl")
                    .join("config.toml");

                if linux_style_path.exists()
                    || linux_style_path
                        .parent()
                        .map(|p| p.exists())
                        .unwrap_or(false)
                {
                    return Ok(linux_style_path);
                }
            }
        }

        let proj_dirs = ProjectDirs::from("com", "supportctl", "supportctl")
            .ok_or(ConfigError::ConfigDirError)?;

        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    /// Expand `${VAR}` and `${VAR:-default}` references
    ///
    /// Unset variables without a default are left as-is, so profiles that
    /// are never used do not need their variables set.
    fn expand_env_vars(content: &str) -> String {
        let expanded =
            shellexpand::env_with_context_no_errors(content, |var| std::env::var(var).ok());
        expanded.to_string()
    }
}
