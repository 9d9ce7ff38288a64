mod common;
pub use self::common::Query;
mod page;
pub use self::page::PageQuery;
mod issuer_search;
pub use self::issuer_search::IssuerSearchQuery;
