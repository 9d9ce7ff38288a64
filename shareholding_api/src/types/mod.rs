mod meta;
pub use self::meta::PaginatedResponse;

mod filer;
pub use self::filer::{Filer, FilerID};

mod issuer;
pub use self::issuer::{Issuer, IssuerID, IssuerOwnershipResponse, Ownership};

mod history;
pub use self::history::{FilingHistoryItem, IssuerHistoryResponse};
