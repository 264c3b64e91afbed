//! `SupportClient`: the typed facade over the operation table
//!
//! # Example
//!
//! ```rust,no_run
//! use supportctl_core::{SupportClient, types::DescribeSeverityLevelsRequest};
//!
//! # async fn example() -> supportctl_core::Result<()> {
//! let client = SupportClient::builder()
//!     .access_key_id("AKIDEXAMPLE")
//!     .secret_access_key("secret")
//!     .region("us-east-1")
//!     .build()?;
//!
//! let levels = client
//!     .describe_severity_levels(DescribeSeverityLevelsRequest::default())
//!     .await?;
//! for level in levels.severity_levels {
//!     println!("{:?}", level.name);
//! }
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::RetryConfig;
use crate::error::{Result, SupportError};
use crate::operations::{self, Operation};
use crate::signing::{Credentials, Signer};
use crate::transport::{
    DEFAULT_REGION, DEFAULT_TIMEOUT, JsonClient, SERVICE_NAME, Transport, USER_AGENT,
    default_endpoint,
};
use crate::types::*;

/// Client for the AWS Support API
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct SupportClient {
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for SupportClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupportClient").finish_non_exhaustive()
    }
}

impl SupportClient {
    /// Create a client for `region` with static credentials
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Result<Self> {
        Self::builder()
            .access_key_id(access_key_id)
            .secret_access_key(secret_access_key)
            .region(region)
            .build()
    }

    pub fn builder() -> SupportClientBuilder {
        SupportClientBuilder::default()
    }

    /// Wrap any transport, e.g. a test double
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Call a typed operation
    pub async fn call<O: Operation>(&self, request: O::Request) -> Result<O::Response> {
        let body = serde_json::to_value(&request)?;
        debug!(operation = O::NAME, "Dispatching support operation");
        let value = self
            .transport
            .execute(O::NAME, O::METHOD, O::PATH, body)
            .await?;
        serde_json::from_value(value).map_err(|e| SupportError::Decode(e.to_string()))
    }

    /// Call an operation by wire name with an untyped JSON body
    ///
    /// Names absent from the operation table are rejected before anything is
    /// sent. A `null` body is sent as `{}`.
    pub async fn call_raw(&self, name: &str, body: Value) -> Result<Value> {
        let op = operations::find(name)
            .ok_or_else(|| SupportError::UnknownOperation(name.to_string()))?;
        let body = if body.is_null() {
            Value::Object(Default::default())
        } else {
            body
        };
        debug!(operation = op.name, "Dispatching raw support operation");
        self.transport
            .execute(op.name, op.method, op.path, body)
            .await
    }

    pub async fn add_attachments_to_set(
        &self,
        request: AddAttachmentsToSetRequest,
    ) -> Result<AddAttachmentsToSetResponse> {
        self.call::<operations::AddAttachmentsToSet>(request).await
    }

    pub async fn add_communication_to_case(
        &self,
        request: AddCommunicationToCaseRequest,
    ) -> Result<AddCommunicationToCaseResponse> {
        self.call::<operations::AddCommunicationToCase>(request)
            .await
    }

    pub async fn create_case(&self, request: CreateCaseRequest) -> Result<CreateCaseResponse> {
        self.call::<operations::CreateCase>(request).await
    }

    pub async fn describe_attachment(
        &self,
        request: DescribeAttachmentRequest,
    ) -> Result<DescribeAttachmentResponse> {
        self.call::<operations::DescribeAttachment>(request).await
    }

    pub async fn describe_cases(
        &self,
        request: DescribeCasesRequest,
    ) -> Result<DescribeCasesResponse> {
        self.call::<operations::DescribeCases>(request).await
    }

    pub async fn describe_communications(
        &self,
        request: DescribeCommunicationsRequest,
    ) -> Result<DescribeCommunicationsResponse> {
        self.call::<operations::DescribeCommunications>(request)
            .await
    }

    pub async fn describe_services(
        &self,
        request: DescribeServicesRequest,
    ) -> Result<DescribeServicesResponse> {
        self.call::<operations::DescribeServices>(request).await
    }

    pub async fn describe_severity_levels(
        &self,
        request: DescribeSeverityLevelsRequest,
    ) -> Result<DescribeSeverityLevelsResponse> {
        self.call::<operations::DescribeSeverityLevels>(request)
            .await
    }

    pub async fn describe_trusted_advisor_check_refresh_statuses(
        &self,
        request: DescribeTrustedAdvisorCheckRefreshStatusesRequest,
    ) -> Result<DescribeTrustedAdvisorCheckRefreshStatusesResponse> {
        self.call::<operations::DescribeTrustedAdvisorCheckRefreshStatuses>(request)
            .await
    }

    pub async fn describe_trusted_advisor_check_result(
        &self,
        request: DescribeTrustedAdvisorCheckResultRequest,
    ) -> Result<DescribeTrustedAdvisorCheckResultResponse> {
        self.call::<operations::DescribeTrustedAdvisorCheckResult>(request)
            .await
    }

    pub async fn describe_trusted_advisor_check_summaries(
        &self,
        request: DescribeTrustedAdvisorCheckSummariesRequest,
    ) -> Result<DescribeTrustedAdvisorCheckSummariesResponse> {
        self.call::<operations::DescribeTrustedAdvisorCheckSummaries>(request)
            .await
    }

    pub async fn describe_trusted_advisor_checks(
        &self,
        request: DescribeTrustedAdvisorChecksRequest,
    ) -> Result<DescribeTrustedAdvisorChecksResponse> {
        self.call::<operations::DescribeTrustedAdvisorChecks>(request)
            .await
    }

    pub async fn refresh_trusted_advisor_check(
        &self,
        request: RefreshTrustedAdvisorCheckRequest,
    ) -> Result<RefreshTrustedAdvisorCheckResponse> {
        self.call::<operations::RefreshTrustedAdvisorCheck>(request)
            .await
    }

    pub async fn resolve_case(&self, request: ResolveCaseRequest) -> Result<ResolveCaseResponse> {
        self.call::<operations::ResolveCase>(request).await
    }
}

/// Builder for [`SupportClient`] over the signed JSON transport
#[derive(Default)]
pub struct SupportClientBuilder {
    access_key_id: Option<String>,
    secret_access_key: Option<String>,
    session_token: Option<String>,
    region: Option<String>,
    endpoint: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    retry: Option<RetryConfig>,
    http_client: Option<reqwest::Client>,
}

impl SupportClientBuilder {
    #[must_use]
    pub fn access_key_id(mut self, value: impl Into<String>) -> Self {
        self.access_key_id = Some(value.into());
        self
    }

    #[must_use]
    pub fn secret_access_key(mut self, value: impl Into<String>) -> Self {
        self.secret_access_key = Some(value.into());
        self
    }

    #[must_use]
    pub fn session_token(mut self, value: impl Into<String>) -> Self {
        self.session_token = Some(value.into());
        self
    }

    #[must_use]
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.access_key_id = Some(credentials.access_key_id);
        self.secret_access_key = Some(credentials.secret_access_key);
        self.session_token = credentials.session_token;
        self
    }

    /// Signing region; defaults to `us-east-1`
    #[must_use]
    pub fn region(mut self, value: impl Into<String>) -> Self {
        self.region = Some(value.into());
        self
    }

    /// Override the regional endpoint URL
    #[must_use]
    pub fn endpoint(mut self, value: impl Into<String>) -> Self {
        self.endpoint = Some(value.into());
        self
    }

    #[must_use]
    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.user_agent = Some(value.into());
        self
    }

    /// Per-request timeout; defaults to 60 seconds
    #[must_use]
    pub fn timeout(mut self, value: Duration) -> Self {
        self.timeout = Some(value);
        self
    }

    #[must_use]
    pub fn retry(mut self, value: RetryConfig) -> Self {
        self.retry = Some(value);
        self
    }

    /// Use a preconfigured HTTP client; `user_agent` and `timeout` are then
    /// ignored
    #[must_use]
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn build(self) -> Result<SupportClient> {
        let access_key_id = self
            .access_key_id
            .filter(|v| !v.is_empty())
            .ok_or_else(|| SupportError::MissingCredentials("access key ID is not set".into()))?;
        let secret_access_key = self
            .secret_access_key
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                SupportError::MissingCredentials("secret access key is not set".into())
            })?;

        let region = self
            .region
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());
        let endpoint = self
            .endpoint
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default_endpoint(&region));
        let endpoint = Url::parse(&endpoint).map_err(|e| {
            SupportError::Config(crate::config::ConfigError::InvalidEndpoint {
                endpoint: endpoint.clone(),
                reason: e.to_string(),
            })
        })?;

        let http = match self.http_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT))
                .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
                .build()?,
        };

        let mut credentials = Credentials::new(access_key_id, secret_access_key);
        if let Some(token) = self.session_token.filter(|v| !v.is_empty()) {
            credentials = credentials.with_session_token(token);
        }

        debug!(region = %region, endpoint = %endpoint, "Creating support client");
        let signer = Signer::new(credentials, region, SERVICE_NAME);
        let transport = JsonClient::new(http, endpoint, signer, self.retry.unwrap_or_default());
        Ok(SupportClient::with_transport(Arc::new(transport)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records every call and answers with a canned body
    struct RecordingTransport {
        calls: Mutex<Vec<(String, String, String, Value)>>,
        reply: Value,
    }

    impl RecordingTransport {
        fn new(reply: Value) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                reply,
            })
        }

        fn actions(&self) -> Vec<String> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(|(action, ..)| action.clone())
                .collect()
        }

        fn last_body(&self) -> Value {
            self.calls.lock().unwrap().last().unwrap().3.clone()
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn execute(
            &self,
            action: &str,
            method: &str,
            path: &str,
            body: Value,
        ) -> Result<Value> {
            self.calls.lock().unwrap().push((
                action.to_string(),
                method.to_string(),
                path.to_string(),
                body,
            ));
            Ok(self.reply.clone())
        }
    }

    #[tokio::test]
    async fn test_each_method_dispatches_its_action() {
        let transport = RecordingTransport::new(json!({}));
        let client = SupportClient::with_transport(transport.clone());

        client
            .add_attachments_to_set(AddAttachmentsToSetRequest::default())
            .await
            .unwrap();
        client
            .add_communication_to_case(AddCommunicationToCaseRequest::default())
            .await
            .unwrap();
        client.create_case(CreateCaseRequest::default()).await.unwrap();
        client
            .describe_attachment(DescribeAttachmentRequest::default())
            .await
            .unwrap();
        client.describe_cases(DescribeCasesRequest::default()).await.unwrap();
        client
            .describe_communications(DescribeCommunicationsRequest::default())
            .await
            .unwrap();
        client
            .describe_services(DescribeServicesRequest::default())
            .await
            .unwrap();
        client
            .describe_severity_levels(DescribeSeverityLevelsRequest::default())
            .await
            .unwrap();
        client
            .describe_trusted_advisor_check_refresh_statuses(Default::default())
            .await
            .unwrap();
        client
            .describe_trusted_advisor_check_summaries(Default::default())
            .await
            .unwrap();
        client
            .describe_trusted_advisor_checks(Default::default())
            .await
            .unwrap();
        client.resolve_case(ResolveCaseRequest::default()).await.unwrap();

        assert_eq!(
            transport.actions(),
            vec![
                "AddAttachmentsToSet",
                "AddCommunicationToCase",
                "CreateCase",
                "DescribeAttachment",
                "DescribeCases",
                "DescribeCommunications",
                "DescribeServices",
                "DescribeSeverityLevels",
                "DescribeTrustedAdvisorCheckRefreshStatuses",
                "DescribeTrustedAdvisorCheckSummaries",
                "DescribeTrustedAdvisorChecks",
                "ResolveCase",
            ]
        );
        for (_, method, path, _) in transport.calls.lock().unwrap().iter() {
            assert_eq!(method, "POST");
            assert_eq!(path, "/");
        }
    }

    #[tokio::test]
    async fn test_operations_with_required_response_members() {
        let transport = RecordingTransport::new(json!({
            "status": {"checkId": "abc", "status": "enqueued", "millisUntilNextRefreshable": 0},
            "result": {"checkId": "abc", "status": "ok"}
        }));
        let client = SupportClient::with_transport(transport.clone());

        let refresh = client
            .refresh_trusted_advisor_check(RefreshTrustedAdvisorCheckRequest::new("abc"))
            .await
            .unwrap();
        assert_eq!(refresh.status.status, RefreshStatus::Enqueued);
        assert_eq!(transport.last_body(), json!({"checkId": "abc"}));

        let result = client
            .describe_trusted_advisor_check_result(DescribeTrustedAdvisorCheckResultRequest::new(
                "abc",
            ))
            .await
            .unwrap();
        assert_eq!(result.result.unwrap().status, CheckStatus::Ok);
        assert_eq!(
            transport.actions(),
            vec!["RefreshTrustedAdvisorCheck", "DescribeTrustedAdvisorCheckResult"]
        );
    }

    #[tokio::test]
    async fn test_request_body_is_serialized_request() {
        let transport = RecordingTransport::new(json!({"caseId": "case-1"}));
        let client = SupportClient::with_transport(transport.clone());

        let response = client
            .create_case(CreateCaseRequest::new("Subject", "Body").with_severity(SeverityCode::High))
            .await
            .unwrap();
        assert_eq!(response.case_id.as_deref(), Some("case-1"));
        assert_eq!(
            transport.last_body(),
            json!({"communicationBody": "Body", "severityCode": "high", "subject": "Subject"})
        );
    }

    #[tokio::test]
    async fn test_call_raw_rejects_unknown_operation() {
        let transport = RecordingTransport::new(json!({}));
        let client = SupportClient::with_transport(transport.clone());

        let err = client.call_raw("DeleteCase", json!({})).await.unwrap_err();
        assert!(matches!(err, SupportError::UnknownOperation(ref name) if name == "DeleteCase"));
        assert!(transport.actions().is_empty());
    }

    #[tokio::test]
    async fn test_call_raw_passes_body_through() {
        let transport = RecordingTransport::new(json!({"severityLevels": []}));
        let client = SupportClient::with_transport(transport.clone());

        let value = client
            .call_raw("DescribeSeverityLevels", Value::Null)
            .await
            .unwrap();
        assert_eq!(value, json!({"severityLevels": []}));
        assert_eq!(transport.last_body(), json!({}));

        client
            .call_raw("DescribeCases", json!({"includeResolvedCases": true}))
            .await
            .unwrap();
        assert_eq!(transport.last_body(), json!({"includeResolvedCases": true}));
    }

    #[tokio::test]
    async fn test_undecodable_response_is_decode_error() {
        let transport = RecordingTransport::new(json!({"status": "not-an-object"}));
        let client = SupportClient::with_transport(transport);

        let err = client
            .refresh_trusted_advisor_check(RefreshTrustedAdvisorCheckRequest::new("abc"))
            .await
            .unwrap_err();
        assert!(matches!(err, SupportError::Decode(_)));
    }

    #[test]
    fn test_builder_requires_credentials() {
        let err = SupportClient::builder().region("us-east-1").build().unwrap_err();
        assert!(matches!(err, SupportError::MissingCredentials(_)));

        let err = SupportClient::builder()
            .access_key_id("AK")
            .secret_access_key("")
            .build()
            .unwrap_err();
        assert!(matches!(err, SupportError::MissingCredentials(_)));
    }

    #[test]
    fn test_builder_rejects_bad_endpoint() {
        let err = SupportClient::builder()
            .access_key_id("AK")
            .secret_access_key("SK")
            .endpoint("not a url")
            .build()
            .unwrap_err();
        assert!(matches!(err, SupportError::Config(_)));
    }

    #[test]
    fn test_builder_defaults() {
        let client = SupportClient::new("AK", "SK", "us-east-1").unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("SK"));
    }
}
