//! Follow `nextToken` through paginated listings
//!
//! Only `DescribeCases` and `DescribeCommunications` paginate. Both helpers
//! keep requesting pages until the service stops returning a token (an
//! empty token counts as none), and give up after [`MAX_PAGES`].

use tracing::debug;

use crate::client::SupportClient;
use crate::error::{Result, SupportError};
use crate::types::{
    CaseDetails, Communication, DescribeCasesRequest, DescribeCommunicationsRequest,
};

/// Upper bound on pages fetched by one listing
pub const MAX_PAGES: usize = 1000;

/// Normalize a page token: empty means the listing is complete
fn next_token(token: Option<String>) -> Option<String> {
    token.filter(|t| !t.is_empty())
}

/// Fetch every case matching `request`, starting from its `next_token`
pub async fn describe_all_cases(
    client: &SupportClient,
    mut request: DescribeCasesRequest,
) -> Result<Vec<CaseDetails>> {
    let mut cases = Vec::new();
    for page in 1..=MAX_PAGES {
        let response = client.describe_cases(request.clone()).await?;
        debug!(page, count = response.cases.len(), "Fetched page of cases");
        cases.extend(response.cases);
        match next_token(response.next_token) {
            Some(token) => request.next_token = Some(token),
            None => return Ok(cases),
        }
    }
    Err(SupportError::PaginationLimit(MAX_PAGES))
}

/// Fetch every communication of a case
pub async fn describe_all_communications(
    client: &SupportClient,
    mut request: DescribeCommunicationsRequest,
) -> Result<Vec<Communication>> {
    let mut communications = Vec::new();
    for page in 1..=MAX_PAGES {
        let response = client.describe_communications(request.clone()).await?;
        debug!(
            page,
            count = response.communications.len(),
            "Fetched page of communications"
        );
        communications.extend(response.communications);
        match next_token(response.next_token) {
            Some(token) => request.next_token = Some(token),
            None => return Ok(communications),
        }
    }
    Err(SupportError::PaginationLimit(MAX_PAGES))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::Transport;
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};

    /// Serves numbered pages; the last page carries `last_token`
    struct PagedTransport {
        pages: usize,
        last_token: Option<&'static str>,
        endless: bool,
        seen_tokens: Mutex<Vec<Option<String>>>,
    }

    impl PagedTransport {
        fn new(pages: usize, last_token: Option<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                pages,
                last_token,
                endless: false,
                seen_tokens: Mutex::new(Vec::new()),
            })
        }

        fn endless() -> Arc<Self> {
            Arc::new(Self {
                pages: 0,
                last_token: None,
                endless: true,
                seen_tokens: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Transport for PagedTransport {
        async fn execute(
            &self,
            action: &str,
            _method: &str,
            _path: &str,
            body: Value,
        ) -> Result<Value> {
            let token = body
                .get("nextToken")
                .and_then(Value::as_str)
                .map(str::to_string);
            let page: usize = token
                .as_deref()
                .and_then(|t| t.strip_prefix("page-"))
                .and_then(|n| n.parse().ok())
                .unwrap_or(1);
            self.seen_tokens.lock().unwrap().push(token);

            let next = if self.endless || page < self.pages {
                json!(format!("page-{}", page + 1))
            } else {
                self.last_token.map_or(Value::Null, |t| json!(t))
            };
            let item = json!({"caseId": format!("case-{}", page)});
            let key = if action == "DescribeCases" {
                "cases"
            } else {
                "communications"
            };
            Ok(json!({ key: [item], "nextToken": next }))
        }
    }

    #[tokio::test]
    async fn test_follows_tokens_until_absent() {
        let transport = PagedTransport::new(3, None);
        let client = SupportClient::with_transport(transport.clone());

        let cases = describe_all_cases(&client, DescribeCasesRequest::default())
            .await
            .unwrap();
        let ids: Vec<_> = cases.iter().filter_map(|c| c.case_id.as_deref()).collect();
        assert_eq!(ids, vec!["case-1", "case-2", "case-3"]);
        assert_eq!(
            *transport.seen_tokens.lock().unwrap(),
            vec![None, Some("page-2".to_string()), Some("page-3".to_string())]
        );
    }

    #[tokio::test]
    async fn test_empty_token_ends_pagination() {
        let transport = PagedTransport::new(2, Some(""));
        let client = SupportClient::with_transport(transport.clone());

        let communications = describe_all_communications(
            &client,
            DescribeCommunicationsRequest::for_case("case-1"),
        )
        .await
        .unwrap();
        assert_eq!(communications.len(), 2);
        assert_eq!(transport.seen_tokens.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_page_cap() {
        let transport = PagedTransport::endless();
        let client = SupportClient::with_transport(transport.clone());

        let err = describe_all_cases(&client, DescribeCasesRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SupportError::PaginationLimit(MAX_PAGES)));
        assert_eq!(transport.seen_tokens.lock().unwrap().len(), MAX_PAGES);
    }
}
