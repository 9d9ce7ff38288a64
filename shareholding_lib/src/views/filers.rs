use shareholding_api::types::{Filer, PaginatedResponse};
use shareholding_api::Client;
use tokio::sync::watch;

use crate::async_data::AsyncState;
use crate::error::ShareholdingError;

use super::paged::PagedList;

/// The filer list page: paginated, searchable list of every filer.
pub struct FilersView {
    list: PagedList<(), Filer>,
}

impl FilersView {
    /// Starts loading `initial_page` (1-indexed) filtered by `initial_search`.
    pub fn new(client: Client, initial_page: u64, initial_search: &str) -> Self {
        let list = PagedList::new((), true, initial_page, initial_search, move |params| {
            let client = client.clone();
            async move {
                client
                    .get_filers(&params.query())
                    .await
                    .map_err(ShareholdingError::from)
            }
        });
        Self { list }
    }

    pub fn filers(&self) -> Vec<Filer> {
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

    pub fn state(&self) -> AsyncState<PaginatedResponse<Filer>> {
        self.list.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<AsyncState<PaginatedResponse<Filer>>> {
        self.list.subscribe()
    }

    pub async fn settled(&self) -> AsyncState<PaginatedResponse<Filer>> {
        self.list.settled().await
    }
}
