//! The operation table
//!
//! Each API operation is a zero-sized type implementing [`Operation`], which
//! ties its wire name to its request and response shapes. [`OPERATIONS`]
//! lists every operation for untyped dispatch.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::types::*;

/// A single support API operation
pub trait Operation {
    /// Wire name, used in the `X-Amz-Target` header
    const NAME: &'static str;
    const METHOD: &'static str = "POST";
    const PATH: &'static str = "/";

    type Request: Serialize + Send + Sync;
    type Response: DeserializeOwned + Send;
}

/// Static description of an operation, for listing and raw dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OperationInfo {
    pub name: &'static str,
    pub method: &'static str,
    pub path: &'static str,
    /// Request members the service requires
    pub required: &'static [&'static str],
    pub summary: &'static str,
}

macro_rules! operations {
    ($(
        $(#[$doc:meta])*
        $ty:ident => $name:literal, $req:ty, $resp:ty, [$($required:literal),*], $summary:literal;
    )*) => {
        $(
            $(#[$doc])*
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
            pub struct $ty;

            impl Operation for $ty {
                const NAME: &'static str = $name;
                type Request = $req;
                type Response = $resp;
            }
        )*

        /// Every operation the service exposes, in alphabetical order
        pub const OPERATIONS: &[OperationInfo] = &[
            $(OperationInfo {
                name: <$ty as Operation>::NAME,
                method: <$ty as Operation>::METHOD,
                path: <$ty as Operation>::PATH,
                required: &[$($required),*],
                summary: $summary,
            },)*
        ];
    };
}

operations! {
    /// Stage attachments in a new or existing attachment set
    AddAttachmentsToSet => "AddAttachmentsToSet",
        AddAttachmentsToSetRequest, AddAttachmentsToSetResponse,
        ["attachments"], "Add attachments to a new or existing attachment set";
    AddCommunicationToCase => "AddCommunicationToCase",
        AddCommunicationToCaseRequest, AddCommunicationToCaseResponse,
        ["communicationBody"], "Add a message to a case";
    CreateCase => "CreateCase",
        CreateCaseRequest, CreateCaseResponse,
        ["communicationBody", "subject"], "Open a new support case";
    DescribeAttachment => "DescribeAttachment",
        DescribeAttachmentRequest, DescribeAttachmentResponse,
        ["attachmentId"], "Fetch an attachment's contents";
    DescribeCases => "DescribeCases",
        DescribeCasesRequest, DescribeCasesResponse,
        [], "List cases by ID or date window";
    DescribeCommunications => "DescribeCommunications",
        DescribeCommunicationsRequest, DescribeCommunicationsResponse,
        ["caseId"], "List the communications of a case";
    DescribeServices => "DescribeServices",
        DescribeServicesRequest, DescribeServicesResponse,
        [], "List services and their case categories";
    DescribeSeverityLevels => "DescribeSeverityLevels",
        DescribeSeverityLevelsRequest, DescribeSeverityLevelsResponse,
        [], "List available severity levels";
    DescribeTrustedAdvisorCheckRefreshStatuses => "DescribeTrustedAdvisorCheckRefreshStatuses",
        DescribeTrustedAdvisorCheckRefreshStatusesRequest,
        DescribeTrustedAdvisorCheckRefreshStatusesResponse,
        ["checkIds"], "Get the refresh status of Trusted Advisor checks";
    DescribeTrustedAdvisorCheckResult => "DescribeTrustedAdvisorCheckResult",
        DescribeTrustedAdvisorCheckResultRequest, DescribeTrustedAdvisorCheckResultResponse,
        ["checkId"], "Get the latest result of a Trusted Advisor check";
    DescribeTrustedAdvisorCheckSummaries => "DescribeTrustedAdvisorCheckSummaries",
        DescribeTrustedAdvisorCheckSummariesRequest,
        DescribeTrustedAdvisorCheckSummariesResponse,
        ["checkIds"], "Summarize the results of Trusted Advisor checks";
    DescribeTrustedAdvisorChecks => "DescribeTrustedAdvisorChecks",
        DescribeTrustedAdvisorChecksRequest, DescribeTrustedAdvisorChecksResponse,
        ["language"], "List all Trusted Advisor checks";
    RefreshTrustedAdvisorCheck => "RefreshTrustedAdvisorCheck",
        RefreshTrustedAdvisorCheckRequest, RefreshTrustedAdvisorCheckResponse,
        ["checkId"], "Request a refresh of a Trusted Advisor check";
    ResolveCase => "ResolveCase",
        ResolveCaseRequest, ResolveCaseResponse,
        [], "Resolve a support case";
}

/// Look up an operation by wire name (exact match)
pub fn find(name: &str) -> Option<&'static OperationInfo> {
    OPERATIONS.iter().find(|op| op.name == name)
}

/// Look up an operation ignoring ASCII case and `-`/`_` separators, so
/// `describe-cases` and `describe_cases` both find `DescribeCases`
pub fn find_lenient(name: &str) -> Option<&'static OperationInfo> {
    let wanted: String = name
        .chars()
        .filter(|c| *c != '-' && *c != '_')
        .collect();
    find(name).or_else(|| {
        OPERATIONS
            .iter()
            .find(|op| op.name.eq_ignore_ascii_case(&wanted))
    })
}
