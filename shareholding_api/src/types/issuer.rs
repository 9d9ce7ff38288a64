//! Issuers: the securities whose holdings are being reported.

use serde::{Deserialize, Serialize};

use super::FilerID;

/// Numeric identifier for an issuer.
pub type IssuerID = i64;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Issuer {
    pub id: IssuerID,

    /// EDINET code of the issuer.
    pub edinet_code: String,

    /// Company name. Missing for issuers not yet resolved by the backend.
    pub name: Option<String>,

    /// Securities code (usually five digits, the first four being the ticker).
    pub sec_code: Option<String>,

    pub latest_filing_date: Option<String>,

    /// Holding ratio in percent from the most recent report.
    pub latest_ratio: Option<f64>,

    /// Stated purpose of holding from the most recent report.
    pub latest_purpose: Option<String>,

    /// Change against the previous report, in percentage points.
    pub ratio_change: Option<f64>,

    pub filing_count: Option<i64>,
}

impl Issuer {
    /// Name for display, falling back to the EDINET code.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.edinet_code)
    }

    /// Whether only a single report has been filed for this holding so far.
    pub fn is_new(&self) -> bool {
        self.filing_count == Some(1)
    }
}

/// One filer's latest position in an issuer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Ownership {
    pub filer_id: FilerID,
    pub filer_name: String,
    pub latest_submit_date: Option<String>,
    pub shares_held: Option<i64>,
    pub holding_ratio: Option<f64>,
    pub purpose: Option<String>,
}

/// Response of `/api/issuers/{id}/ownerships`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct IssuerOwnershipResponse {
    pub issuer: Issuer,
    pub ownerships: Vec<Ownership>,
}
