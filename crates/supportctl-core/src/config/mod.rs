//! Configuration and profile management
//!
//! Named profiles hold AWS credentials, the region and optional endpoint
//! override, a default language and retry settings.
//!
//! # Features
//!
//! - Multiple named profiles with a configurable default
//! - Secure credential storage using OS keyring (optional)
//! - Environment variable expansion in config files
//! - Platform-specific config file locations

#![allow(clippy::module_inception)]

pub mod config;
pub mod credential;
pub mod error;
pub mod resilience;

// Re-export main types for convenience
pub use config::{
    Config, ENV_ACCESS_KEY_ID, ENV_DEFAULT_REGION, ENV_REGION, ENV_SECRET_ACCESS_KEY,
    ENV_SESSION_TOKEN, Profile, credentials_from_env,
};
pub use credential::{CredentialStorage, CredentialStore};
pub use error::{ConfigError, Result};
pub use resilience::RetryConfig;
