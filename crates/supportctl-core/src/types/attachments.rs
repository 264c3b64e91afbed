//! Attachments and attachment sets
//!
//! An attachment set is a short-lived staging container on the service side.
//! It expires one hour after creation, holds at most three attachments and
//! caps each attachment at 5 MB. Those limits are enforced remotely; the
//! constants below exist so callers can warn before uploading.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Maximum number of attachments the service keeps in one set
pub const MAX_ATTACHMENTS_PER_SET: usize = 3;

/// Maximum size of a single attachment, in bytes
pub const MAX_ATTACHMENT_BYTES: usize = 5 * 1024 * 1024;

/// How long an attachment set stays available after creation
pub const ATTACHMENT_SET_LIFETIME: Duration = Duration::from_secs(60 * 60);

/// A file attached to a case or communication
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Raw file contents (base64 on the wire)
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "super::base64_bytes"
    )]
    pub data: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl Attachment {
    #[must_use]
    pub fn new(file_name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: Some(data.into()),
            file_name: Some(file_name.into()),
        }
    }

    /// Size of the attached data in bytes (0 when absent)
    pub fn len(&self) -> usize {
        self.data.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Reference to an attachment as listed on a communication
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

/// Adds attachments to a set, creating the set when no ID is given
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddAttachmentsToSetRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_set_id: Option<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl AddAttachmentsToSetRequest {
    /// Request that creates a new set holding `attachments`
    #[must_use]
    pub fn new(attachments: Vec<Attachment>) -> Self {
        Self {
            attachment_set_id: None,
            attachments,
        }
    }

    /// Add to an existing set instead of creating one
    #[must_use]
    pub fn with_attachment_set_id(mut self, id: impl Into<String>) -> Self {
        self.attachment_set_id = Some(id.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddAttachmentsToSetResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_set_id: Option<String>,
    /// When the set expires (ISO 8601 timestamp as sent by the service)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_time: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeAttachmentRequest {
    pub attachment_id: String,
}

impl DescribeAttachmentRequest {
    #[must_use]
    pub fn new(attachment_id: impl Into<String>) -> Self {
        Self {
            attachment_id: attachment_id.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeAttachmentResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_attachment_data_is_base64() {
        let attachment = Attachment::new("log.txt", b"hello".to_vec());
        let value = serde_json::to_value(&attachment).unwrap();
        assert_eq!(value, json!({"data": "aGVsbG8=", "fileName": "log.txt"}));

        let decoded: Attachment = serde_json::from_value(value).unwrap();
        assert_eq!(decoded.data.as_deref(), Some(&b"hello"[..]));
        assert_eq!(decoded.len(), 5);
    }

    #[test]
    fn test_attachment_rejects_invalid_base64() {
        let result = serde_json::from_value::<Attachment>(json!({"data": "not base64!"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_add_attachments_omits_missing_set_id() {
        let request = AddAttachmentsToSetRequest::new(vec![]);
        let value = serde_json::to_value(&request).unwrap();
        // attachments is required, so an empty list is still written
        assert_eq!(value, json!({"attachments": []}));

        let request = AddAttachmentsToSetRequest::new(vec![Attachment::new("a.txt", b"a".to_vec())])
            .with_attachment_set_id("as-123");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "attachmentSetId": "as-123",
                "attachments": [{"data": "YQ==", "fileName": "a.txt"}]
            })
        );
    }

    #[test]
    fn test_add_attachments_response_decodes() {
        let response: AddAttachmentsToSetResponse = serde_json::from_value(json!({
            "attachmentSetId": "as-2f5a6faa2a4a1e600-mu-nk5xQlBr70-G1cUos5LZkd38KOAHZa9BMDVzNEXAMPLE",
            "expiryTime": "2020-05-14T17:04:40.790+0000"
        }))
        .unwrap();
        assert!(response.attachment_set_id.unwrap().starts_with("as-"));
        assert_eq!(
            response.expiry_time.as_deref(),
            Some("2020-05-14T17:04:40.790+0000")
        );
    }

    #[test]
    fn test_describe_attachment_shapes() {
        let request = DescribeAttachmentRequest::new("attachment-KBnjRNrePd9D6Jx0-Mm00xZuDEaL2JAj_0-gJv9qqDooTipJz7NEXAMPLE");
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("attachmentId").is_some());

        let empty: DescribeAttachmentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(empty.attachment.is_none());
    }

    #[test]
    fn test_limits() {
        assert_eq!(MAX_ATTACHMENTS_PER_SET, 3);
        assert_eq!(MAX_ATTACHMENT_BYTES, 5_242_880);
        assert_eq!(ATTACHMENT_SET_LIFETIME.as_secs(), 3600);
    }
}
