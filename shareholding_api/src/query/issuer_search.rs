use url::Url;

use super::common::{append_param, Query};

/// Reverse lookup of issuers by name or code. Limit defaults to 20.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IssuerSearchQuery {
    pub search: String,
    pub limit: u64,
}

impl IssuerSearchQuery {
    pub fn new(search: &str) -> Self {
        Self {
            search: search.to_string(),
            limit: 20,
        }
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit.max(1);
        self
    }
}

impl Query for IssuerSearchQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        append_param(&mut url, "search", Some(&self.search));
        append_param(&mut url, "limit", Some(&self.limit.to_string()));
        url
    }
}
