//! Support cases and their communications

use serde::{Deserialize, Serialize};

use super::{AttachmentDetails, Language};

/// Lifecycle state of a case, as reported by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaseStatus {
    CustomerActionCompleted,
    Opened,
    PendingCustomerAction,
    Reopened,
    Resolved,
    Unassigned,
    WorkInProgress,
}

impl CaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::CustomerActionCompleted => "customer-action-completed",
            CaseStatus::Opened => "opened",
            CaseStatus::PendingCustomerAction => "pending-customer-action",
            CaseStatus::Reopened => "reopened",
            CaseStatus::Resolved => "resolved",
            CaseStatus::Unassigned => "unassigned",
            CaseStatus::WorkInProgress => "work-in-progress",
        }
    }

    /// True once the case no longer awaits any action
    pub fn is_resolved(&self) -> bool {
        matches!(self, CaseStatus::Resolved)
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Urgency of a case; determines the response time under the support plan
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SeverityCode {
    Low,
    Normal,
    High,
    Urgent,
    Critical,
}

impl SeverityCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityCode::Low => "low",
            SeverityCode::Normal => "normal",
            SeverityCode::High => "high",
            SeverityCode::Urgent => "urgent",
            SeverityCode::Critical => "critical",
        }
    }
}

impl std::fmt::Display for SeverityCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of issue a case is opened for. The service defaults to `technical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum IssueType {
    CustomerService,
    Technical,
}

impl IssueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::CustomerService => "customer-service",
            IssueType::Technical => "technical",
        }
    }
}

impl std::fmt::Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A support case
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_code: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cc_email_addresses: Vec<String>,
    /// Identifier shown in the Support Center
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recent_communications: Option<RecentCaseCommunications>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity_code: Option<SeverityCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CaseStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_created: Option<String>,
}

/// One entry in a case's append-only correspondence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Communication {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachment_set: Vec<AttachmentDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_created: Option<String>,
}

/// The five most recent communications embedded in a case
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentCaseCommunications {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub communications: Vec<Communication>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCommunicationToCaseRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_set_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cc_email_addresses: Vec<String>,
    pub communication_body: String,
}

impl AddCommunicationToCaseRequest {
    #[must_use]
    pub fn new(case_id: impl Into<String>, communication_body: impl Into<String>) -> Self {
        Self {
            attachment_set_id: None,
            case_id: Some(case_id.into()),
            cc_email_addresses: Vec::new(),
            communication_body: communication_body.into(),
        }
    }

    #[must_use]
    pub fn with_attachment_set_id(mut self, id: impl Into<String>) -> Self {
        self.attachment_set_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_cc_email_addresses(mut self, addresses: Vec<String>) -> Self {
        self.cc_email_addresses = addresses;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCommunicationToCaseResponse {
    #[serde(default)]
    pub result: bool,
}

/// Opens a new case
///
/// `service_code` and `category_code` come from `DescribeServices`,
/// `severity_code` from `DescribeSeverityLevels`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCaseRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_set_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_code: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cc_email_addresses: Vec<String>,
    pub communication_body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<IssueType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity_code: Option<SeverityCode>,
    pub subject: String,
}

impl CreateCaseRequest {
    /// Create a request with the two required fields
    #[must_use]
    pub fn new(subject: impl Into<String>, communication_body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            communication_body: communication_body.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_service_code(mut self, code: impl Into<String>) -> Self {
        self.service_code = Some(code.into());
        self
    }

    #[must_use]
    pub fn with_category_code(mut self, code: impl Into<String>) -> Self {
        self.category_code = Some(code.into());
        self
    }

    #[must_use]
    pub fn with_severity(mut self, severity: SeverityCode) -> Self {
        self.severity_code = Some(severity);
        self
    }

    #[must_use]
    pub fn with_issue_type(mut self, issue_type: IssueType) -> Self {
        self.issue_type = Some(issue_type);
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    #[must_use]
    pub fn with_cc_email_addresses(mut self, addresses: Vec<String>) -> Self {
        self.cc_email_addresses = addresses;
        self
    }

    #[must_use]
    pub fn with_attachment_set_id(mut self, id: impl Into<String>) -> Self {
        self.attachment_set_id = Some(id.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCaseResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_id: Option<String>,
}

/// Lists cases by ID and/or date window
///
/// Case data is kept for twelve months after creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeCasesRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_time: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub case_id_list: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_communications: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_resolved_cases: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_results: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl DescribeCasesRequest {
    /// Look up specific cases
    #[must_use]
    pub fn for_cases(case_ids: Vec<String>) -> Self {
        Self {
            case_id_list: case_ids,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeCasesResponse {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cases: Vec<CaseDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeCommunicationsRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_time: Option<String>,
    pub case_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_results: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl DescribeCommunicationsRequest {
    #[must_use]
    pub fn for_case(case_id: impl Into<String>) -> Self {
        Self {
            case_id: case_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeCommunicationsResponse {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub communications: Vec<Communication>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveCaseRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_id: Option<String>,
}

impl ResolveCaseRequest {
    #[must_use]
    pub fn new(case_id: impl Into<String>) -> Self {
        Self {
            case_id: Some(case_id.into()),
        }
    }
}

/// Case status before and after the resolve call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveCaseResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_case_status: Option<CaseStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_case_status: Option<CaseStatus>,
}
