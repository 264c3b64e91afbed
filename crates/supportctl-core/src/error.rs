//! Unified error handling for supportctl-core
//!
//! Every failure a call can produce surfaces as a [`SupportError`], with
//! helper methods for the questions callers usually ask.
//!
//! # Example
//!
//! ```rust
//! use supportctl_core::SupportError;
//!
//! fn handle_error(err: SupportError) {
//!     if err.is_not_found() {
//!         println!("Case not found");
//!     } else if err.is_retryable() {
//!         println!("Temporary error, can retry");
//!     }
//! }
//!
//! let err = SupportError::Service {
//!     status: 400,
//!     code: "CaseIdNotFound".to_string(),
//!     message: "Case not found".to_string(),
//!     request_id: None,
//! };
//! assert!(err.is_not_found());
//! assert_eq!(err.code(), Some("CaseIdNotFound"));
//! ```

use thiserror::Error;

use crate::config::ConfigError;

/// Error codes the service uses to signal throttling
const THROTTLING_CODES: &[&str] = &[
    "Throttling",
    "ThrottlingException",
    "ThrottledException",
    "RequestThrottledException",
    "TooManyRequestsException",
    "RequestLimitExceeded",
    "SlowDown",
];

/// Core error type for every support API call
#[derive(Error, Debug)]
pub enum SupportError {
    /// The service answered with a non-2xx status
    #[error("{code}: {message} (HTTP {status})")]
    Service {
        status: u16,
        code: String,
        message: String,
        request_id: Option<String>,
    },

    /// The request never produced a response
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A response body could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// A request could not be serialized
    #[error("Failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to sign request: {0}")]
    Signing(String),

    /// The name is not one of the API's operations
    #[error("Unknown operation '{0}'")]
    UnknownOperation(String),

    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A paginated listing kept returning tokens past the page cap
    #[error("Pagination stopped after {0} pages")]
    PaginationLimit(usize),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, SupportError>;

impl SupportError {
    /// Service error code, when the service supplied one
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            SupportError::Service { code, .. } => Some(code.as_str()),
            _ => None,
        }
    }

    /// HTTP status of a service error
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            SupportError::Service { status, .. } => Some(*status),
            SupportError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns true if the referenced case, attachment or set does not exist
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            SupportError::Service { status, code, .. } => {
                *status == 404 || code.ends_with("NotFound")
            }
            _ => false,
        }
    }

    /// Returns true if the service asked us to slow down
    #[must_use]
    pub fn is_throttled(&self) -> bool {
        match self {
            SupportError::Service { status, code, .. } => {
                *status == 429 || THROTTLING_CODES.contains(&code.as_str())
            }
            _ => false,
        }
    }

    /// Returns true if the credentials were rejected (401/403)
    ///
    /// Accounts without a Business or Enterprise support plan get
    /// `SubscriptionRequiredException` here.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        match self {
            SupportError::Service { status, .. } => *status == 401 || *status == 403,
            SupportError::MissingCredentials(_) => true,
            _ => false,
        }
    }

    /// Returns true if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        match self {
            SupportError::Service { status, .. } => *status >= 500,
            SupportError::Http(e) => e.status().is_some_and(|s| s.is_server_error()),
            _ => false,
        }
    }

    /// Returns true if the same request may succeed when sent again
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            SupportError::Service { .. } => self.is_throttled() || self.is_server_error(),
            SupportError::Http(e) => e.is_timeout() || e.is_connect() || self.is_server_error(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(status: u16, code: &str) -> SupportError {
        SupportError::Service {
            status,
            code: code.to_string(),
            message: "test".to_string(),
            request_id: Some("req-1".to_string()),
        }
    }

    #[test]
    fn test_not_found_by_code() {
        let err = service(400, "CaseIdNotFound");
        assert!(err.is_not_found());
        assert!(!err.is_retryable());
        assert!(!err.is_unauthorized());

        assert!(service(400, "AttachmentSetIdNotFound").is_not_found());
        assert!(service(400, "AttachmentIdNotFound").is_not_found());
        assert!(!service(400, "AttachmentLimitExceeded").is_not_found());
    }

    #[test]
    fn test_throttling_is_retryable() {
        let err = service(400, "ThrottlingException");
        assert!(err.is_throttled());
        assert!(err.is_retryable());

        let err = service(429, "Anything");
        assert!(err.is_throttled());
        assert!(err.is_retryable());
    }

    #[test]
    fn test_server_errors_are_retryable() {
        let err = service(503, "ServiceUnavailable");
        assert!(err.is_server_error());
        assert!(err.is_retryable());

        let err = service(500, "InternalServerError");
        assert!(err.is_retryable());
    }

    #[test]
    fn test_unauthorized() {
        assert!(service(403, "SubscriptionRequiredException").is_unauthorized());
        assert!(service(401, "UnrecognizedClientException").is_unauthorized());
        assert!(SupportError::MissingCredentials("no key".to_string()).is_unauthorized());
        assert!(!service(400, "ValidationException").is_unauthorized());
    }

    #[test]
    fn test_local_errors_are_not_retryable() {
        assert!(!SupportError::UnknownOperation("Foo".to_string()).is_retryable());
        assert!(!SupportError::Decode("bad".to_string()).is_retryable());
        assert!(!SupportError::PaginationLimit(1000).is_retryable());
        assert!(SupportError::Decode("bad".to_string()).code().is_none());
    }

    #[test]
    fn test_display() {
        let err = service(400, "CaseCreationLimitExceeded");
        assert_eq!(err.to_string(), "CaseCreationLimitExceeded: test (HTTP 400)");
        assert_eq!(err.status(), Some(400));

        let err = SupportError::UnknownOperation("DeleteCase".to_string());
        assert!(err.to_string().contains("DeleteCase"));
    }
}
