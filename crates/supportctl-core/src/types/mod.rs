//! Request and response shapes for the AWS Support API
//!
//! Field names follow the service's JSON wire schema exactly (camelCase).
//! Optional request fields are left out of the serialized body when they are
//! unset or empty; required fields are always written, even when empty.
//!
//! Response records are decoded leniently: a missing scalar or list decodes
//! to its empty value, matching how the service omits empty members.

mod attachments;
mod cases;
mod catalog;
mod trusted_advisor;

pub(crate) mod base64_bytes;

pub use attachments::*;
pub use cases::*;
pub use catalog::*;
pub use trusted_advisor::*;

use serde::{Deserialize, Serialize};

/// Human language used for case correspondence and check descriptions.
///
/// The service accepts English and Japanese.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ja,
}

impl Language {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ja => "ja",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "ja" => Ok(Language::Ja),
            other => Err(format!("unsupported language '{}': expected en or ja", other)),
        }
    }
}
