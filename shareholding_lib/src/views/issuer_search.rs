use shareholding_api::types::Issuer;
use shareholding_api::{Client, IssuerSearchQuery};
use tokio::sync::watch;

use crate::async_data::{AsyncData, AsyncOptions, AsyncState};
use crate::error::ShareholdingError;

/// Maximum number of issuers one search returns.
pub const ISSUER_SEARCH_LIMIT: u64 = 20;

/// What the last executed search asked for. `trigger` makes repeated
/// executions of the same text count as a change.
#[derive(Clone, Debug, PartialEq)]
struct SearchRequest {
    query: String,
    trigger: u64,
}

/// Reverse lookup of issuers by name or code.
///
/// Typing only updates [`search`](Self::search); a request goes out on
/// [`execute_search`](Self::execute_search), or at creation when the
/// initial text is non-empty.
pub struct IssuerSearchView {
    data: AsyncData<SearchRequest, Vec<Issuer>>,
    search: String,
}

impl IssuerSearchView {
    pub fn new(client: Client, initial_search: &str) -> Self {
        let request = SearchRequest {
            query: initial_search.to_string(),
            trigger: 0,
        };
        let data = AsyncData::new(
            request,
            AsyncOptions::enabled(!initial_search.is_empty()),
            move |request: SearchRequest| {
                let client = client.clone();
                async move {
                    let query = request.query.trim();
                    if query.is_empty() {
                        return Ok(Vec::new());
                    }
                    let query = IssuerSearchQuery::new(query).with_limit(ISSUER_SEARCH_LIMIT);
                    client
                        .search_issuers(&query)
                        .await
                        .map_err(ShareholdingError::from)
                }
            },
        );
        Self {
            data,
            search: initial_search.to_string(),
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: &str) {
        self.search = search.to_string();
    }

    /// Runs the search for the text typed so far.
    pub fn execute_search(&self) {
        let mut request = self.data.deps();
        request.query = self.search.clone();
        request.trigger += 1;
        self.data.configure(request, true);
    }

    pub fn issuers(&self) -> Vec<Issuer> {
        self.data
            .state()
            .data
            .map(|issuers| (*issuers).clone())
            .unwrap_or_default()
    }

    pub fn loading(&self) -> bool {
        self.data.state().loading
    }

    pub fn error(&self) -> Option<String> {
        self.data.state().error
    }

    pub fn total_count(&self) -> usize {
        self.data.state().data.map_or(0, |issuers| issuers.len())
    }

    pub fn refetch(&self) {
        self.data.refetch();
    }

    pub fn subscribe(&self) -> watch::Receiver<AsyncState<Vec<Issuer>>> {
        self.data.subscribe()
    }

    pub fn state(&self) -> AsyncState<Vec<Issuer>> {
        self.data.state()
    }

    pub async fn settled(&self) -> AsyncState<Vec<Issuer>> {
        self.data.settled().await
    }
}
