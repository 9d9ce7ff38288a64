//! View models, one per page of the viewer.
//!
//! Each view owns its own state (nothing is shared between instances) and
//! exposes it under resource-specific names. All views must be created
//! inside a Tokio runtime.

mod paged;
pub use self::paged::ITEMS_PER_PAGE;

mod filers;
pub use self::filers::FilersView;

mod filer;
pub use self::filer::FilerView;

mod filer_issuers;
pub use self::filer_issuers::FilerIssuersView;

mod issuer_search;
pub use self::issuer_search::{IssuerSearchView, ISSUER_SEARCH_LIMIT};

mod issuer_ownerships;
pub use self::issuer_ownerships::{IssuerOwnershipsView, ISSUER_NOT_FOUND_MESSAGE};

mod issuer_history;
pub use self::issuer_history::IssuerHistoryView;
