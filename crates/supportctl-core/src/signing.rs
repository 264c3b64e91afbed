//! AWS Signature Version 4 request signing
//!
//! Implements the header-based flavour of SigV4 used by JSON-RPC services:
//! a canonical request is hashed into a string to sign, which is signed
//! with a key derived from the secret through an HMAC chain scoped to the
//! date, region and service.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use url::Url;

use crate::error::{Result, SupportError};

type HmacSha256 = Hmac<Sha256>;

/// Algorithm identifier for SigV4
pub const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Terminator of every credential scope
const SCOPE_TERMINATOR: &str = "aws4_request";

const X_AMZ_DATE: &str = "X-Amz-Date";
const X_AMZ_SECURITY_TOKEN: &str = "X-Amz-Security-Token";

/// AWS access credentials
///
/// `Debug` never prints the secret key or session token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl Credentials {
    #[must_use]
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: None,
        }
    }

    /// Attach a session token (temporary credentials from STS)
    #[must_use]
    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"***")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "***"),
            )
            .finish()
    }
}

/// A request about to be signed
///
/// Every header in `headers` is signed. `sign` adds `Host`, `X-Amz-Date`,
/// `X-Amz-Security-Token` (with temporary credentials) and `Authorization`.
#[derive(Debug, Clone)]
pub struct SignableRequest {
    pub method: String,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl SignableRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn set_header(&mut self, name: &str, value: String) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value));
    }
}

/// Signs requests for one region and service
#[derive(Debug, Clone)]
pub struct Signer {
    credentials: Credentials,
    region: String,
    service: String,
}

impl Signer {
    pub fn new(
        credentials: Credentials,
        region: impl Into<String>,
        service: impl Into<String>,
    ) -> Self {
        Self {
            credentials,
            region: region.into(),
            service: service.into(),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Sign `request` as of `now`, adding the authentication headers
    pub fn sign(&self, request: &mut SignableRequest, now: DateTime<Utc>) -> Result<()> {
        let timestamp = format_timestamp(&now);
        let date = &timestamp[..8];

        if request.header("host").is_none() {
            let host = host_header(&request.url)?;
            request.set_header("Host", host);
        }
        request.set_header(X_AMZ_DATE, timestamp.clone());
        if let Some(token) = &self.credentials.session_token {
            request.set_header(X_AMZ_SECURITY_TOKEN, token.clone());
        }

        let payload_hash = hex_sha256(&request.body);
        let (canonical, signed_headers) = canonical_request(
            &request.method,
            &canonical_uri(&request.url),
            &canonical_query_string(request.url.query().unwrap_or("")),
            &request.headers,
            &payload_hash,
        );

        let scope = format!(
            "{}/{}/{}/{}",
            date, self.region, self.service, SCOPE_TERMINATOR
        );
        let to_sign = string_to_sign(&timestamp, &scope, &canonical);
        let key = signing_key(
            &self.credentials.secret_access_key,
            date,
            &self.region,
            &self.service,
        )?;
        let signature = hex::encode(hmac_sha256(&key, to_sign.as_bytes())?);

        tracing::trace!(scope = %scope, signed_headers = %signed_headers, "Signed request");

        request.set_header(
            "Authorization",
            format!(
                "{} Credential={}/{}, SignedHeaders={}, Signature={}",
                ALGORITHM, self.credentials.access_key_id, scope, signed_headers, signature
            ),
        );
        Ok(())
    }
}

/// `YYYYMMDD'T'HHMMSS'Z'`
pub fn format_timestamp(time: &DateTime<Utc>) -> String {
    time.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Derive the signing key: `AWS4`+secret, then date, region, service
pub fn signing_key(secret: &str, date: &str, region: &str, service: &str) -> Result<Vec<u8>> {
    let k_date = hmac_sha256(format!("AWS4{}", secret).as_bytes(), date.as_bytes())?;
    let k_region = hmac_sha256(&k_date, region.as_bytes())?;
    let k_service = hmac_sha256(&k_region, service.as_bytes())?;
    hmac_sha256(&k_service, SCOPE_TERMINATOR.as_bytes())
}

/// Build the canonical request; also returns the signed header list
pub fn canonical_request(
    method: &str,
    uri: &str,
    query: &str,
    headers: &[(String, String)],
    payload_hash: &str,
) -> (String, String) {
    let (canonical_headers, signed_headers) = canonical_headers(headers);
    let canonical = format!(
        "{}\n{}\n{}\n{}\n{}\n{}",
        method, uri, query, canonical_headers, signed_headers, payload_hash
    );
    (canonical, signed_headers)
}

/// Lowercase names, collapse whitespace runs in values, sort by name.
/// Repeated headers are joined with commas.
pub fn canonical_headers(headers: &[(String, String)]) -> (String, String) {
    let mut merged: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in headers {
        let value = value.split_whitespace().collect::<Vec<_>>().join(" ");
        merged
            .entry(name.trim().to_ascii_lowercase())
            .or_default()
            .push(value);
    }

    let mut canonical = String::new();
    for (name, values) in &merged {
        canonical.push_str(name);
        canonical.push(':');
        canonical.push_str(&values.join(","));
        canonical.push('\n');
    }
    let signed = merged.keys().cloned().collect::<Vec<_>>().join(";");
    (canonical, signed)
}

/// Sort query parameters by name then value. Values are expected to be
/// percent-encoded already.
pub fn canonical_query_string(query: &str) -> String {
    let mut params: Vec<(&str, &str)> = query
        .split('&')
        .filter(|part| !part.is_empty())
        .map(|part| part.split_once('=').unwrap_or((part, "")))
        .collect();
    params.sort_unstable();
    params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

pub fn string_to_sign(timestamp: &str, scope: &str, canonical_request: &str) -> String {
    format!(
        "{}\n{}\n{}\n{}",
        ALGORITHM,
        timestamp,
        scope,
        hex_sha256(canonical_request.as_bytes())
    )
}

/// Characters that stay literal in a canonical URI segment (RFC 3986 unreserved)
fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~')
}

fn uri_encode_segment(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        if is_unreserved(byte) {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }
    encoded
}

/// Canonical URI for services other than S3
///
/// `Url` has already removed dot segments and percent-encoded the path once;
/// each segment is encoded a second time.
pub fn canonical_uri(url: &Url) -> String {
    match url.path() {
        "" | "/" => "/".to_string(),
        path => path
            .split('/')
            .map(uri_encode_segment)
            .collect::<Vec<_>>()
            .join("/"),
    }
}

fn host_header(url: &Url) -> Result<String> {
    let host = url
        .host_str()
        .ok_or_else(|| SupportError::Signing(format!("URL has no host: {}", url)))?;
    Ok(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

fn hex_sha256(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|e| SupportError::Signing(e.to_string()))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}
