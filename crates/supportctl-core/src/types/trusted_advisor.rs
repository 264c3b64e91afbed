//! Trusted Advisor checks, results and refresh state
//!
//! Check results are computed and cached by the service. A refresh only
//! enqueues a new run; poll `DescribeTrustedAdvisorCheckRefreshStatuses`
//! to follow it.

use serde::{Deserialize, Serialize};

use super::Language;

/// Outcome of a check, or of one resource within it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
    NotAvailable,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Ok => "ok",
            CheckStatus::Warning => "warning",
            CheckStatus::Error => "error",
            CheckStatus::NotAvailable => "not_available",
        }
    }
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefreshStatus {
    None,
    Enqueued,
    Processing,
    Success,
    Abandoned,
}

impl RefreshStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefreshStatus::None => "none",
            RefreshStatus::Enqueued => "enqueued",
            RefreshStatus::Processing => "processing",
            RefreshStatus::Success => "success",
            RefreshStatus::Abandoned => "abandoned",
        }
    }

    /// Whether a refresh is still queued or running
    pub fn is_in_progress(&self) -> bool {
        matches!(self, RefreshStatus::Enqueued | RefreshStatus::Processing)
    }
}

impl std::fmt::Display for RefreshStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of a check
///
/// `metadata` names the columns of every flagged resource's `metadata` row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustedAdvisorCheckDescription {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub metadata: Vec<String>,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustedAdvisorCheckRefreshStatus {
    #[serde(default)]
    pub check_id: String,
    /// Time left before the check may be refreshed again
    #[serde(default)]
    pub millis_until_next_refreshable: i64,
    pub status: RefreshStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustedAdvisorCostOptimizingSummary {
    #[serde(default)]
    pub estimated_monthly_savings: f64,
    #[serde(default)]
    pub estimated_percent_monthly_savings: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustedAdvisorCategorySpecificSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_optimizing: Option<TrustedAdvisorCostOptimizingSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustedAdvisorResourcesSummary {
    #[serde(default)]
    pub resources_flagged: i64,
    #[serde(default)]
    pub resources_ignored: i64,
    #[serde(default)]
    pub resources_processed: i64,
    #[serde(default)]
    pub resources_suppressed: i64,
}

/// A resource flagged by a check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustedAdvisorResourceDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_suppressed: Option<bool>,
    /// Column values, aligned with the check description's `metadata`.
    /// Individual cells may be null.
    #[serde(default)]
    pub metadata: Vec<Option<String>>,
    /// Empty for global resources
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub resource_id: String,
    pub status: CheckStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustedAdvisorCheckResult {
    #[serde(default)]
    pub category_specific_summary: TrustedAdvisorCategorySpecificSummary,
    #[serde(default)]
    pub check_id: String,
    #[serde(default)]
    pub flagged_resources: Vec<TrustedAdvisorResourceDetail>,
    #[serde(default)]
    pub resources_summary: TrustedAdvisorResourcesSummary,
    pub status: CheckStatus,
    #[serde(default)]
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustedAdvisorCheckSummary {
    #[serde(default)]
    pub category_specific_summary: TrustedAdvisorCategorySpecificSummary,
    #[serde(default)]
    pub check_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_flagged_resources: Option<bool>,
    #[serde(default)]
    pub resources_summary: TrustedAdvisorResourcesSummary,
    pub status: CheckStatus,
    #[serde(default)]
    pub timestamp: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeTrustedAdvisorCheckRefreshStatusesRequest {
    pub check_ids: Vec<String>,
}

impl DescribeTrustedAdvisorCheckRefreshStatusesRequest {
    #[must_use]
    pub fn new(check_ids: Vec<String>) -> Self {
        Self { check_ids }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeTrustedAdvisorCheckRefreshStatusesResponse {
    #[serde(default)]
    pub statuses: Vec<TrustedAdvisorCheckRefreshStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeTrustedAdvisorCheckResultRequest {
    pub check_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
}

impl DescribeTrustedAdvisorCheckResultRequest {
    #[must_use]
    pub fn new(check_id: impl Into<String>) -> Self {
        Self {
            check_id: check_id.into(),
            language: None,
        }
    }

    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeTrustedAdvisorCheckResultResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<TrustedAdvisorCheckResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeTrustedAdvisorCheckSummariesRequest {
    pub check_ids: Vec<String>,
}

impl DescribeTrustedAdvisorCheckSummariesRequest {
    #[must_use]
    pub fn new(check_ids: Vec<String>) -> Self {
        Self { check_ids }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeTrustedAdvisorCheckSummariesResponse {
    #[serde(default)]
    pub summaries: Vec<TrustedAdvisorCheckSummary>,
}

/// Lists every available check. `language` is required by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeTrustedAdvisorChecksRequest {
    pub language: Language,
}

impl DescribeTrustedAdvisorChecksRequest {
    #[must_use]
    pub fn new(language: Language) -> Self {
        Self { language }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeTrustedAdvisorChecksResponse {
    #[serde(default)]
    pub checks: Vec<TrustedAdvisorCheckDescription>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTrustedAdvisorCheckRequest {
    pub check_id: String,
}

impl RefreshTrustedAdvisorCheckRequest {
    #[must_use]
    pub fn new(check_id: impl Into<String>) -> Self {
        Self {
            check_id: check_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTrustedAdvisorCheckResponse {
    pub status: TrustedAdvisorCheckRefreshStatus,
}
