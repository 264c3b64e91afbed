//! Signed JSON-over-HTTPS transport
//!
//! Every operation is a `POST /` whose target is named in the
//! `X-Amz-Target` header and whose body is a JSON document. [`JsonClient`]
//! signs each attempt with SigV4, retries retryable failures and maps error
//! responses into [`SupportError::Service`].

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tracing::{debug, trace, warn};
use url::Url;

use crate::config::RetryConfig;
use crate::error::{Result, SupportError};
use crate::signing::{SignableRequest, Signer};

/// Service name used in the credential scope
pub const SERVICE_NAME: &str = "support";

/// Prefix of every `X-Amz-Target` header value
pub const TARGET_PREFIX: &str = "AWSSupport_20130415";

/// Version of the JSON protocol, carried in the content type
pub const JSON_VERSION: &str = "1.1";

/// The only commercial region serving the support API
pub const DEFAULT_REGION: &str = "us-east-1";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("supportctl/", env!("CARGO_PKG_VERSION"));

/// Carries one operation call to the service
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `body` as operation `action` and return the decoded response body
    async fn execute(&self, action: &str, method: &str, path: &str, body: Value) -> Result<Value>;
}

/// Default endpoint for a region
pub fn default_endpoint(region: &str) -> String {
    format!("https://support.{}.amazonaws.com", region)
}

/// `X-Amz-Target` value for an operation
pub fn target_header(action: &str) -> String {
    format!("{}.{}", TARGET_PREFIX, action)
}

fn content_type() -> String {
    format!("application/x-amz-json-{}", JSON_VERSION)
}

/// Production transport: reqwest + SigV4
#[derive(Clone)]
pub struct JsonClient {
    http: reqwest::Client,
    endpoint: Url,
    signer: Signer,
    retry: RetryConfig,
}

impl fmt::Debug for JsonClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("signer", &self.signer)
            .field("retry", &self.retry)
            .finish()
    }
}

impl JsonClient {
    pub fn new(http: reqwest::Client, endpoint: Url, signer: Signer, retry: RetryConfig) -> Self {
        Self {
            http,
            endpoint,
            signer,
            retry,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    async fn send_once(&self, action: &str, method: &str, path: &str, payload: &[u8]) -> Result<Value> {
        let mut url = self.endpoint.clone();
        url.set_path(path);

        let mut request = SignableRequest {
            method: method.to_string(),
            url,
            headers: vec![
                ("Content-Type".to_string(), content_type()),
                ("X-Amz-Target".to_string(), target_header(action)),
            ],
            body: payload.to_vec(),
        };
        self.signer.sign(&mut request, Utc::now())?;

        let method = reqwest::Method::from_bytes(request.method.as_bytes())
            .map_err(|e| SupportError::Signing(format!("invalid HTTP method: {}", e)))?;
        let mut builder = self.http.request(method, request.url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.body(request.body).send().await?;
        let status = response.status();
        let request_id = header_value(response.headers(), "x-amzn-requestid");
        let error_type = header_value(response.headers(), "x-amzn-errortype");
        let bytes = response.bytes().await?;

        trace!(
            action,
            status = status.as_u16(),
            request_id = request_id.as_deref().unwrap_or("-"),
            bytes = bytes.len(),
            "Received support API response"
        );

        if status.is_success() {
            decode_body(&bytes)
        } else {
            Err(service_error(status.as_u16(), &bytes, request_id, error_type))
        }
    }
}

#[async_trait]
impl Transport for JsonClient {
    async fn execute(&self, action: &str, method: &str, path: &str, body: Value) -> Result<Value> {
        let payload = if body.is_null() {
            b"{}".to_vec()
        } else {
            serde_json::to_vec(&body)?
        };

        let attempts = self.retry.attempts();
        let mut attempt = 1;
        loop {
            debug!(action, attempt, endpoint = %self.endpoint, "Calling support API");
            match self.send_once(action, method, path, &payload).await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < attempts && err.is_retryable() => {
                    let delay = self.retry.delay_for(attempt);
                    warn!(
                        action,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Retrying support API call"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

fn header_value(headers: &reqwest::header::HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Decode a success body; an empty body is an empty object
fn decode_body(bytes: &[u8]) -> Result<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_slice(bytes).map_err(|e| SupportError::Decode(e.to_string()))
}

/// Map an error response into a service error
///
/// The code comes from `__type` (possibly `prefix#Code`), then `code`, then
/// the `x-amzn-ErrorType` header (possibly `Code:detail`).
fn service_error(
    status: u16,
    bytes: &[u8],
    request_id: Option<String>,
    error_type: Option<String>,
) -> SupportError {
    let document: Option<Value> = serde_json::from_slice(bytes).ok();
    let field = |names: &[&str]| -> Option<String> {
        let object = document.as_ref()?.as_object()?;
        names
            .iter()
            .find_map(|name| object.get(*name).and_then(Value::as_str))
            .map(str::to_string)
    };

    let code = field(&["__type", "code", "Code"])
        .map(|raw| raw.rsplit('#').next().unwrap_or(&raw).to_string())
        .or_else(|| error_type.map(|raw| raw.split(':').next().unwrap_or(&raw).to_string()))
        .filter(|code| !code.is_empty())
        .unwrap_or_else(|| {
            reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("UnknownError")
                .replace(' ', "")
        });

    let message = field(&["message", "Message", "errorMessage"]).unwrap_or_else(|| {
        let text = String::from_utf8_lossy(bytes).trim().to_string();
        if text.is_empty() {
            format!("HTTP {}", status)
        } else {
            text
        }
    });

    SupportError::Service {
        status,
        code,
        message,
        request_id,
    }
}
