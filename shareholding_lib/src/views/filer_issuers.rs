use shareholding_api::types::{Issuer, PaginatedResponse};
use shareholding_api::Client;
use tokio::sync::watch;

use crate::async_data::AsyncState;
use crate::error::ShareholdingError;
use crate::id::ResourceId;

use super::paged::PagedList;

/// Issuers one filer has reported holdings in, paginated and searchable.
///
/// An invalid filer id leaves the view idle.
pub struct FilerIssuersView {
    list: PagedList<ResourceId, Issuer>,
}

impl FilerIssuersView {
    pub fn new(
        client: Client,
        filer_id: impl Into<ResourceId>,
        initial_page: u64,
        initial_search: &str,
    ) -> Self {
        let filer_id = filer_id.into();
        let list = PagedList::new(
            filer_id,
            filer_id.is_valid(),
            initial_page,
            initial_search,
            move |params| {
                let client = client.clone();
                async move {
                    let ResourceId::Valid(id) = params.key else {
                        return Err(ShareholdingError::InvalidId);
                    };
                    client
                        .get_issuers_by_filer(id, &params.query())
                        .await
                        .map_err(ShareholdingError::from)
                }
            },
        );
        Self { list }
    }

    pub fn filer_id(&self) -> ResourceId {
        self.list.key()
    }

    /// Switches to another filer, keeping page and search text.
    pub fn set_filer_id(&self, filer_id: impl Into<ResourceId>) {
        let filer_id = filer_id.into();
        self.list.set_key(filer_id, filer_id.is_valid());
    }

    pub fn issuers(&self) -> Vec<Issuer> {
        self.list.items()
    }

    pub fn loading(&self) -> bool {
        self.list.loading()
    }

    pub fn error(&self) -> Option<String> {
        self.list.error()
    }

    pub fn current_page(&self) -> u64 {
        self.list.current_page()
    }

    pub fn set_current_page(&self, page: u64) {
        self.list.set_current_page(page);
    }

    pub fn search_query(&self) -> &str {
        self.list.search_query()
    }

    /// Updates the filter text and jumps back to page 1.
    pub fn set_search_query(&mut self, query: &str) {
        self.list.set_search_query(query);
    }

    pub fn total_count(&self) -> u64 {
        self.list.total_count()
    }

    pub fn total_pages(&self) -> u64 {
        self.list.total_pages()
    }

    pub fn refetch(&self) {
        self.list.refetch();
    }

    pub fn state(&self) -> AsyncState<PaginatedResponse<Issuer>> {
        self.list.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<AsyncState<PaginatedResponse<Issuer>>> {
        self.list.subscribe()
    }

    pub async fn settled(&self) -> AsyncState<PaginatedResponse<Issuer>> {
        self.list.settled().await
    }
}
