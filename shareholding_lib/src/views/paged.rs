//! Shared machinery for paginated, searchable lists.

use std::future::Future;

use shareholding_api::types::PaginatedResponse;
use shareholding_api::PageQuery;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::async_data::{AsyncData, AsyncDataHandle, AsyncOptions, AsyncState};
use crate::debounce::{Debounced, SEARCH_DEBOUNCE};
use crate::error::ShareholdingError;

/// Records per page for every paginated view.
pub const ITEMS_PER_PAGE: u64 = 50;

/// Request parameters of a paginated list. `key` identifies the parent
/// resource (e.g. the filer), `search` is the debounced filter text.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PageParams<K> {
    pub key: K,
    pub page: u64,
    pub search: String,
}

impl<K> PageParams<K> {
    pub fn query(&self) -> PageQuery {
        let query = PageQuery::default()
            .with_limit(ITEMS_PER_PAGE)
            .with_page(self.page);
        if self.search.is_empty() {
            query
        } else {
            query.with_search(&self.search)
        }
    }
}

type PageData<K, T> = AsyncData<PageParams<K>, PaginatedResponse<T>>;

/// A page of `T` plus page number and search state.
///
/// The raw search text is updated immediately; the request only sees it
/// once the debounce delay has passed. Changing the search text always
/// returns to page 1.
pub(crate) struct PagedList<K, T> {
    data: PageData<K, T>,
    search: Debounced<String>,
    search_query: String,
    forward: JoinHandle<()>,
}

impl<K, T> PagedList<K, T>
where
    K: Clone + PartialEq + Send + 'static,
    T: Clone + Send + Sync + 'static,
{
    pub fn new<F, Fut>(
        key: K,
        enabled: bool,
        initial_page: u64,
        initial_search: &str,
        fetch: F,
    ) -> Self
    where
        F: Fn(PageParams<K>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<PaginatedResponse<T>, ShareholdingError>> + Send + 'static,
    {
        let params = PageParams {
            key,
            page: initial_page.max(1),
            search: initial_search.to_string(),
        };
        let data = AsyncData::new(params, AsyncOptions::enabled(enabled), fetch);
        let search = Debounced::new(initial_search.to_string(), SEARCH_DEBOUNCE);
        let forward = spawn_search_forwarder(search.subscribe(), data.handle());
        Self {
            data,
            search,
            search_query: initial_search.to_string(),
            forward,
        }
    }

    pub fn items(&self) -> Vec<T> {
        self.data
            .state()
            .data
            .map(|page| page.items.clone())
            .unwrap_or_default()
    }

    pub fn loading(&self) -> bool {
        self.data.state().loading
    }

    pub fn error(&self) -> Option<String> {
        self.data.state().error
    }

    pub fn state(&self) -> AsyncState<PaginatedResponse<T>> {
        self.data.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<AsyncState<PaginatedResponse<T>>> {
        self.data.subscribe()
    }

    pub async fn settled(&self) -> AsyncState<PaginatedResponse<T>> {
        self.data.settled().await
    }

    pub fn current_page(&self) -> u64 {
        self.data.deps().page
    }

    pub fn set_current_page(&self, page: u64) {
        self.data.update_deps(|p| p.page = page.max(1));
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_search_query(&mut self, query: &str) {
        self.search_query = query.to_string();
        self.search.set(query.to_string());
        self.data.update_deps(|p| p.page = 1);
    }

    pub fn total_count(&self) -> u64 {
        self.data.state().data.map_or(0, |page| page.total)
    }

    pub fn total_pages(&self) -> u64 {
        self.data
            .state()
            .data
            .map_or(0, |page| page.total_pages(ITEMS_PER_PAGE))
    }

    pub fn refetch(&self) {
        self.data.refetch();
    }

    pub fn key(&self) -> K {
        self.data.deps().key
    }

    /// Points the list at another parent resource, keeping page and search.
    pub fn set_key(&self, key: K, enabled: bool) {
        let mut params = self.data.deps();
        params.key = key;
        self.data.configure(params, enabled);
    }
}

impl<K, T> Drop for PagedList<K, T> {
    fn drop(&mut self) {
        self.forward.abort();
    }
}

/// Pushes each debounced search value into the request parameters.
fn spawn_search_forwarder<K, T>(
    mut rx: watch::Receiver<String>,
    data: AsyncDataHandle<PageParams<K>, PaginatedResponse<T>>,
) -> JoinHandle<()>
where
    K: Clone + PartialEq + Send + 'static,
    T: Send + Sync + 'static,
{
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let search = rx.borrow_and_update().clone();
            tracing::debug!("debounced search: {:?}", search);
            if !data.update_deps(|p| p.search = search) {
                break;
            }
        }
    })
}
