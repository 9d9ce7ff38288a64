use serde::{Deserialize, Serialize};

use super::{Filer, Issuer};

/// A single report in the history of one filer's position in one issuer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FilingHistoryItem {
    /// EDINET document ID, unique per filing.
    pub doc_id: String,
    pub submit_date: Option<String>,
    /// Report classification, e.g. `変更報告書`.
    pub doc_description: Option<String>,
    pub shares_held: Option<i64>,
    pub holding_ratio: Option<f64>,
    /// Difference from the previous report, in percentage points.
    pub ratio_change: Option<f64>,
}

/// Response of `/api/filers/{filer_id}/issuers/{issuer_id}/history`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct IssuerHistoryResponse {
    pub filer: Filer,
    pub issuer: Issuer,
    pub history: Vec<FilingHistoryItem>,
}
