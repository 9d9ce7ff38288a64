use serde::{Deserialize, Serialize};

/// One page of a list endpoint.
///
/// The server guarantees `limit > 0`, `items.len() <= limit` and
/// `total >= items.len()`; the client does not re-check it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    /// Number of matching records across all pages.
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
}

impl<T> PaginatedResponse<T> {
    /// Number of pages of `page_size` records needed to show `total` records.
    pub fn total_pages(&self, page_size: u64) -> u64 {
        if page_size == 0 {
            return 0;
        }
        self.total.div_ceil(page_size)
    }
}
