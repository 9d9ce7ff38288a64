//! Filers: the parties submitting large-shareholding reports.

use serde::{Deserialize, Serialize};

/// Numeric identifier for a filer.
pub type FilerID = i64;

/// A filer as returned by `/api/filers` and `/api/filers/{id}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Filer {
    pub id: FilerID,

    /// EDINET code of the submitter (e.g. `E12345`).
    pub edinet_code: String,

    pub name: String,

    /// Securities code, present when the filer is itself listed.
    pub sec_code: Option<String>,

    /// Number of reports submitted by this filer.
    pub filing_count: i64,

    /// Number of distinct issuers this filer has reported on.
    pub issuer_count: i64,

    /// Submission timestamp of the most recent report, as sent by the server.
    pub latest_filing_date: Option<String>,
}
