//! Connection management: turns profiles, environment and flags into a
//! configured [`SupportClient`]

use crate::error::{Result as CliResult, SupportCtlError};
use supportctl_core::config::{
    Config, ConfigError, ENV_DEFAULT_REGION, ENV_REGION, Profile, RetryConfig,
    credentials_from_env,
};
use supportctl_core::transport::{DEFAULT_REGION, USER_AGENT};
use supportctl_core::types::Language;
use supportctl_core::{Credentials, SupportClient};
use tracing::{debug, info, trace};

/// Per-invocation overrides from global CLI flags
#[derive(Debug, Clone, Default)]
pub struct ClientOverrides {
    pub region: Option<String>,
    pub endpoint: Option<String>,
    pub no_retry: bool,
    pub retry_attempts: Option<u32>,
}

/// Everything needed to build a client, after precedence is applied
#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    /// Profile the settings came from, if any
    pub profile_name: Option<String>,
    pub credentials: Credentials,
    pub region: String,
    pub endpoint: Option<String>,
    pub retry: RetryConfig,
    pub language: Option<Language>,
}

/// Connection manager for creating authenticated clients
#[derive(Clone)]
pub struct ConnectionManager {
    pub config: Config,
    pub config_path: Option<std::path::PathBuf>,
}

impl ConnectionManager {
    /// Create a connection manager over a configuration loaded from `config_path`
    /// (`None` for the default location)
    pub fn with_config_path(config: Config, config_path: Option<std::path::PathBuf>) -> Self {
        Self {
            config,
            config_path,
        }
    }

    /// Where the configuration is read from and saved to
    pub fn config_file(&self) -> CliResult<std::path::PathBuf> {
        match &self.config_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Config::config_path()?),
        }
    }

    /// Save an updated configuration to the appropriate location
    pub fn save_config(&self, config: &Config) -> CliResult<std::path::PathBuf> {
        let path = self.config_file()?;
        config.save_to_path(&path)?;
        debug!("Saved configuration to {:?}", path);
        Ok(path)
    }

    /// Environment variables are honoured only with the default config file
    ///
    /// An explicit `--config-file` isolates the invocation from the
    /// environment.
    fn use_env_vars(&self) -> bool {
        self.config_path.is_none()
    }

    /// Apply precedence: flags > environment > profile > defaults
    pub fn resolve_settings(
        &self,
        profile_name: Option<&str>,
        overrides: &ClientOverrides,
    ) -> CliResult<ResolvedSettings> {
        trace!("Profile name: {:?}", profile_name);
        let use_env_vars = self.use_env_vars();
        debug!(
            "Config path: {:?}, use_env_vars: {}",
            self.config_path, use_env_vars
        );
        if !use_env_vars {
            info!("--config-file specified explicitly, ignoring environment variables");
        }

        let profile = self.select_profile(profile_name, use_env_vars)?;

        let credentials = match &profile {
            Some((name, profile)) => {
                info!("Using support profile: {}", name);
                profile.resolve_credentials(use_env_vars)?
            }
            None => credentials_from_env().ok_or(SupportCtlError::NoProfileConfigured)?,
        };

        let env_region = if use_env_vars {
            env_non_empty(ENV_REGION).or_else(|| env_non_empty(ENV_DEFAULT_REGION))
        } else {
            None
        };
        let region = overrides
            .region
            .clone()
            .or(env_region)
            .or_else(|| profile.as_ref().map(|(_, p)| p.region.clone()))
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        let endpoint = overrides
            .endpoint
            .clone()
            .or_else(|| profile.as_ref().and_then(|(_, p)| p.endpoint.clone()));

        let mut retry = profile
            .as_ref()
            .and_then(|(_, p)| p.retry.clone())
            .unwrap_or_default();
        retry.apply_overrides(overrides.no_retry, overrides.retry_attempts);

        Ok(ResolvedSettings {
            profile_name: profile.as_ref().map(|(name, _)| name.clone()),
            credentials,
            region,
            endpoint,
            retry,
            language: profile.as_ref().and_then(|(_, p)| p.language),
        })
    }

    /// The profile to read settings from
    ///
    /// Without an explicit name and with complete environment credentials,
    /// no profile is needed; an empty config is only an error when the
    /// environment cannot supply credentials either.
    fn select_profile(
        &self,
        profile_name: Option<&str>,
        use_env_vars: bool,
    ) -> CliResult<Option<(String, &Profile)>> {
        if profile_name.is_none() && use_env_vars && credentials_from_env().is_some() {
            debug!("Found complete AWS credentials in environment");
            return Ok(self
                .config
                .resolve_profile(None)
                .ok()
                .and_then(|name| self.config.profiles.get(&name).map(|p| (name, p))));
        }

        match self.config.resolve_profile(profile_name) {
            Ok(name) => {
                let profile = self.config.profile(&name)?;
                Ok(Some((name, profile)))
            }
            Err(ConfigError::NoProfiles { .. }) => Err(SupportCtlError::NoProfileConfigured),
            Err(e) => Err(e.into()),
        }
    }

    /// Create a Support client for the selected profile
    pub fn create_client(
        &self,
        profile_name: Option<&str>,
        overrides: &ClientOverrides,
    ) -> CliResult<(SupportClient, ResolvedSettings)> {
        debug!("Creating AWS Support client");
        let settings = self.resolve_settings(profile_name, overrides)?;

        let mut builder = SupportClient::builder()
            .credentials(settings.credentials.clone())
            .region(settings.region.clone())
            .user_agent(USER_AGENT)
            .retry(settings.retry.clone());
        if let Some(endpoint) = &settings.endpoint {
            info!("Using endpoint override: {}", endpoint);
            builder = builder.endpoint(endpoint.clone());
        }
        trace!(
            "Access key: {}...",
            settings
                .credentials
                .access_key_id
                .chars()
                .take(4)
                .collect::<String>()
        );

        let client = builder.build()?;
        debug!("AWS Support client created for region {}", settings.region);
        Ok((client, settings))
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use supportctl_core::config::{ENV_ACCESS_KEY_ID, ENV_SECRET_ACCESS_KEY, ENV_SESSION_TOKEN};

    const ENV_VARS: &[&str] = &[
        ENV_ACCESS_KEY_ID,
        ENV_SECRET_ACCESS_KEY,
        ENV_SESSION_TOKEN,
        ENV_REGION,
        ENV_DEFAULT_REGION,
    ];

    fn clear_env() {
        for var in ENV_VARS {
            unsafe { std::env::remove_var(var) };
        }
    }

    fn config_with(profiles: &[(&str, Profile)]) -> Config {
        let mut config = Config::default();
        for (name, profile) in profiles {
            config.set_profile(name.to_string(), profile.clone());
        }
        config
    }

    #[test]
    #[serial]
    fn profile_supplies_everything_without_env() {
        clear_env();
        let mut profile = Profile::new("AKPROFILE", "profile-secret");
        profile.region = "us-west-2".to_string();
        profile.endpoint = Some("http://localhost:4566".to_string());
        profile.language = Some(Language::Ja);
        let manager = ConnectionManager::with_config_path(config_with(&[("dev", profile)]), None);

        let settings = manager
            .resolve_settings(None, &ClientOverrides::default())
            .unwrap();
        assert_eq!(settings.profile_name.as_deref(), Some("dev"));
        assert_eq!(settings.credentials.access_key_id, "AKPROFILE");
        assert_eq!(settings.region, "us-west-2");
        assert_eq!(settings.endpoint.as_deref(), Some("http://localhost:4566"));
        assert_eq!(settings.language, Some(Language::Ja));
        assert_eq!(settings.retry, RetryConfig::default());
    }

    #[test]
    #[serial]
    fn flags_beat_env_and_env_beats_profile() {
        clear_env();
        unsafe {
            std::env::set_var(ENV_ACCESS_KEY_ID, "AKENV");
            std::env::set_var(ENV_SECRET_ACCESS_KEY, "env-secret");
            std::env::set_var(ENV_REGION, "eu-west-1");
        }
        let manager = ConnectionManager::with_config_path(
            config_with(&[("dev", Profile::new("AKPROFILE", "profile-secret"))]),
            None,
        );

        let settings = manager
            .resolve_settings(None, &ClientOverrides::default())
            .unwrap();
        assert_eq!(settings.credentials.access_key_id, "AKENV");
        assert_eq!(settings.region, "eu-west-1");

        let overrides = ClientOverrides {
            region: Some("us-east-1".to_string()),
            endpoint: Some("http://127.0.0.1:9999".to_string()),
            no_retry: true,
            retry_attempts: None,
        };
        let settings = manager.resolve_settings(None, &overrides).unwrap();
        assert_eq!(settings.region, "us-east-1");
        assert_eq!(settings.endpoint.as_deref(), Some("http://127.0.0.1:9999"));
        assert_eq!(settings.retry.attempts(), 1);
        clear_env();
    }

    #[test]
    #[serial]
    fn explicit_config_file_ignores_env() {
        clear_env();
        unsafe {
            std::env::set_var(ENV_ACCESS_KEY_ID, "AKENV");
            std::env::set_var(ENV_SECRET_ACCESS_KEY, "env-secret");
            std::env::set_var(ENV_REGION, "eu-west-1");
        }
        let manager = ConnectionManager::with_config_path(
            config_with(&[("dev", Profile::new("AKPROFILE", "profile-secret"))]),
            Some(std::path::PathBuf::from("/tmp/supportctl-test/config.toml")),
        );

        let settings = manager
            .resolve_settings(None, &ClientOverrides::default())
            .unwrap();
        assert_eq!(settings.credentials.access_key_id, "AKPROFILE");
        assert_eq!(settings.region, DEFAULT_REGION);
        clear_env();
    }

    #[test]
    #[serial]
    fn env_credentials_work_without_profiles() {
        clear_env();
        unsafe {
            std::env::set_var(ENV_ACCESS_KEY_ID, "AKENV");
            std::env::set_var(ENV_SECRET_ACCESS_KEY, "env-secret");
            std::env::set_var(ENV_SESSION_TOKEN, "env-token");
        }
        let manager = ConnectionManager::with_config_path(Config::default(), None);

        let settings = manager
            .resolve_settings(None, &ClientOverrides::default())
            .unwrap();
        assert!(settings.profile_name.is_none());
        assert_eq!(settings.credentials.session_token.as_deref(), Some("env-token"));
        assert_eq!(settings.region, DEFAULT_REGION);
        clear_env();
    }

    #[test]
    #[serial]
    fn no_profiles_and_no_env_is_an_error() {
        clear_env();
        let manager = ConnectionManager::with_config_path(Config::default(), None);
        let err = manager
            .resolve_settings(None, &ClientOverrides::default())
            .unwrap_err();
        assert!(matches!(err, SupportCtlError::NoProfileConfigured));
    }

    #[test]
    #[serial]
    fn unknown_explicit_profile_is_an_error() {
        clear_env();
        let manager = ConnectionManager::with_config_path(
            config_with(&[("dev", Profile::new("AK", "SK"))]),
            None,
        );
        let err = manager
            .resolve_settings(Some("prod"), &ClientOverrides::default())
            .unwrap_err();
        assert!(matches!(err, SupportCtlError::ProfileNotFound { ref name } if name == "prod"));
    }

    #[test]
    #[serial]
    fn profile_retry_settings_are_overridden_by_flags() {
        clear_env();
        let mut profile = Profile::new("AK", "SK");
        profile.retry = Some(RetryConfig {
            max_attempts: 5,
            ..RetryConfig::default()
        });
        let manager = ConnectionManager::with_config_path(config_with(&[("dev", profile)]), None);

        let settings = manager
            .resolve_settings(Some("dev"), &ClientOverrides::default())
            .unwrap();
        assert_eq!(settings.retry.attempts(), 5);

        let overrides = ClientOverrides {
            retry_attempts: Some(2),
            ..ClientOverrides::default()
        };
        let settings = manager.resolve_settings(Some("dev"), &overrides).unwrap();
        assert_eq!(settings.retry.attempts(), 2);
    }

    #[test]
    #[serial]
    fn stray_session_token_does_not_mix_with_profile_keys() {
        clear_env();
        unsafe {
            std::env::set_var(ENV_SESSION_TOKEN, "stray-token");
            std::env::set_var(ENV_ACCESS_KEY_ID, "AKENVONLY");
        }
        let manager = ConnectionManager::with_config_path(
            config_with(&[("dev", Profile::new("AKPROFILE", "profile-secret"))]),
            None,
        );

        let settings = manager
            .resolve_settings(None, &ClientOverrides::default())
            .unwrap();
        assert_eq!(settings.credentials.access_key_id, "AKPROFILE");
        assert_eq!(settings.credentials.secret_access_key, "profile-secret");
        assert!(settings.credentials.session_token.is_none());
        clear_env();
    }
}
