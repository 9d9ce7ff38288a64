use url::Url;

use super::common::{append_param, Query};

/// Offset pagination plus an optional free-text filter, shared by the
/// filer list and the per-filer issuer list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageQuery {
    /// Number of records to skip. Defaults to 0.
    pub skip: u64,
    /// Maximum number of records to return. Defaults to 50.
    pub limit: u64,
    pub search: Option<String>,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: 50,
            search: None,
        }
    }
}

impl Query for PageQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        append_param(&mut url, "skip", Some(&self.skip.to_string()));
        append_param(&mut url, "limit", Some(&self.limit.to_string()));
        append_param(&mut url, "search", self.search.as_deref());
        url
    }
}

impl PageQuery {
    pub fn with_skip(mut self, skip: u64) -> Self {
        self.skip = skip;
        self
    }

    /// Sets the page size. A zero limit is raised to 1.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit.max(1);
        self
    }

    pub fn with_search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }

    /// Converts a 1-indexed page number into `skip` for the current limit.
    pub fn with_page(mut self, page: u64) -> Self {
        self.skip = page.saturating_sub(1).saturating_mul(self.limit);
        self
    }
}
