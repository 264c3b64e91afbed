//! Retry configuration for the support API transport
//!
//! Stored per profile under `[profiles.<name>.retry]`. Only retryable
//! failures (throttling, HTTP 429/5xx, connect and timeout errors) are
//! retried, with exponential backoff capped at `max_backoff_ms`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Retry configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Whether retry is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum number of attempts, the first one included
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Initial backoff in milliseconds
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,

    /// Maximum backoff in milliseconds
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_attempts: 3,
            backoff_ms: 100,
            max_backoff_ms: 5000,
        }
    }
}

impl RetryConfig {
    /// A configuration that sends every request exactly once
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Total attempts allowed for one call (at least 1)
    pub fn attempts(&self) -> u32 {
        if self.enabled {
            self.max_attempts.max(1)
        } else {
            1
        }
    }

    /// Delay before retry number `retry` (1-based): `backoff_ms * 2^(retry-1)`,
    /// capped at `max_backoff_ms`
    pub fn delay_for(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(20);
        let delay = self
            .backoff_ms
            .saturating_mul(1u64 << exponent)
            .min(self.max_backoff_ms);
        Duration::from_millis(delay)
    }

    /// Apply `--no-retry` / `--retry-attempts` style overrides
    pub fn apply_overrides(&mut self, no_retry: bool, attempts: Option<u32>) {
        if no_retry {
            self.enabled = false;
            return;
        }
        if let Some(attempts) = attempts {
            self.enabled = true;
            self.max_attempts = attempts;
        }
    }
}

// Default value functions for serde
fn default_true() -> bool {
    true
}

fn default_max_attempts() -> u32 {
    3
}

fn default_backoff_ms() -> u64 {
    100
}

fn default_max_backoff_ms() -> u64 {
    5000
}
