use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use shareholding_lib::types::{Filer, FilingHistoryItem, Issuer, Ownership};
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    /// Unknown values fall back to a table.
    pub fn from_flag(value: &str) -> Self {
        match value {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "markdown" | "md" => OutputFormat::Markdown,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
struct FilerRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "EDINET")]
    #[serde(rename = "EDINET")]
    edinet_code: String,
    #[tabled(rename = "Code")]
    #[serde(rename = "Code")]
    sec_code: String,
    #[tabled(rename = "Issuers")]
    #[serde(rename = "Issuers")]
    issuers: i64,
    #[tabled(rename = "Filings")]
    #[serde(rename = "Filings")]
    filings: i64,
    #[tabled(rename = "Last Filed")]
    #[serde(rename = "Last Filed")]
    last_filed: String,
}

#[derive(Tabled, Serialize)]
struct IssuerRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Issuer")]
    #[serde(rename = "Issuer")]
    name: String,
    #[tabled(rename = "Code")]
    #[serde(rename = "Code")]
    sec_code: String,
    #[tabled(rename = "Ratio")]
    #[serde(rename = "Ratio")]
    ratio: String,
    #[tabled(rename = "Change")]
    #[serde(rename = "Change")]
    change: String,
    #[tabled(rename = "Filings")]
    #[serde(rename = "Filings")]
    filings: String,
    #[tabled(rename = "Updated")]
    #[serde(rename = "Updated")]
    updated: String,
    #[tabled(rename = "Purpose")]
    #[serde(rename = "Purpose")]
    purpose: String,
}

#[derive(Tabled, Serialize)]
struct OwnershipRow {
    #[tabled(rename = "Filer ID")]
    #[serde(rename = "Filer ID")]
    filer_id: i64,
    #[tabled(rename = "Filer")]
    #[serde(rename = "Filer")]
    filer: String,
    #[tabled(rename = "Shares")]
    #[serde(rename = "Shares")]
    shares: String,
    #[tabled(rename = "Ratio")]
    #[serde(rename = "Ratio")]
    ratio: String,
    #[tabled(rename = "Purpose")]
    #[serde(rename = "Purpose")]
    purpose: String,
    #[tabled(rename = "Last Report")]
    #[serde(rename = "Last Report")]
    last_report: String,
}

#[derive(Tabled, Serialize)]
struct HistoryRow {
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
    #[tabled(rename = "Report")]
    #[serde(rename = "Report")]
    report: String,
    #[tabled(rename = "Shares")]
    #[serde(rename = "Shares")]
    shares: String,
    #[tabled(rename = "Ratio")]
    #[serde(rename = "Ratio")]
    ratio: String,
    #[tabled(rename = "Change")]
    #[serde(rename = "Change")]
    change: String,
    #[tabled(rename = "Doc ID")]
    #[serde(rename = "Doc ID")]
    doc_id: String,
}

fn build_filer_rows(filers: &[Filer]) -> Vec<FilerRow> {
    filers
        .iter()
        .map(|f| FilerRow {
            id: f.id,
            name: f.name.clone(),
            edinet_code: f.edinet_code.clone(),
            sec_code: short_sec_code(f.sec_code.as_deref()),
            issuers: f.issuer_count,
            filings: f.filing_count,
            last_filed: format_date(f.latest_filing_date.as_deref()),
        })
        .collect()
}

fn build_issuer_rows(issuers: &[Issuer]) -> Vec<IssuerRow> {
    issuers
        .iter()
        .map(|i| {
            let mut name = i.display_name().to_string();
            if i.is_new() {
                name.push_str(" [New]");
            }
            IssuerRow {
                id: i.id,
                name,
                sec_code: short_sec_code(i.sec_code.as_deref()),
                ratio: format_ratio(i.latest_ratio),
                change: format_change(i.ratio_change),
                filings: i
                    .filing_count
                    .map_or_else(|| "-".to_string(), |c| c.to_string()),
                updated: format_date(i.latest_filing_date.as_deref()),
                purpose: or_dash(i.latest_purpose.as_deref()),
            }
        })
        .collect()
}

fn build_ownership_rows(ownerships: &[Ownership]) -> Vec<OwnershipRow> {
    ownerships
        .iter()
        .map(|o| OwnershipRow {
            filer_id: o.filer_id,
            filer: o.filer_name.clone(),
            shares: format_shares(o.shares_held),
            ratio: format_ratio(o.holding_ratio),
            purpose: or_dash(o.purpose.as_deref()),
            last_report: format_date(o.latest_submit_date.as_deref()),
        })
        .collect()
}

fn build_history_rows(history: &[FilingHistoryItem]) -> Vec<HistoryRow> {
    history
        .iter()
        .map(|h| HistoryRow {
            date: format_date(h.submit_date.as_deref()),
            report: h
                .doc_description
                .clone()
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| "報告書".to_string()),
            shares: format_shares(h.shares_held),
            ratio: format_ratio(h.holding_ratio),
            change: format_change(h.ratio_change),
            doc_id: h.doc_id.clone(),
        })
        .collect()
}

// -- Table output --

pub fn print_filers_table(filers: &[Filer]) {
    println!("{}", Table::new(build_filer_rows(filers)));
}

pub fn print_issuers_table(issuers: &[Issuer]) {
    println!("{}", Table::new(build_issuer_rows(issuers)));
}

pub fn print_ownerships_table(ownerships: &[Ownership]) {
    println!("{}", Table::new(build_ownership_rows(ownerships)));
}

pub fn print_history_table(history: &[FilingHistoryItem]) {
    println!("{}", Table::new(build_history_rows(history)));
}

// -- Markdown output --

fn print_markdown<R: Tabled>(rows: Vec<R>) {
    let mut table = Table::new(rows);
    table.with(Style::markdown());
    println!("{}", table);
}

pub fn print_filers_markdown(filers: &[Filer]) {
    print_markdown(build_filer_rows(filers));
}

pub fn print_issuers_markdown(issuers: &[Issuer]) {
    print_markdown(build_issuer_rows(issuers));
}

pub fn print_ownerships_markdown(ownerships: &[Ownership]) {
    print_markdown(build_ownership_rows(ownerships));
}

pub fn print_history_markdown(history: &[FilingHistoryItem]) {
    print_markdown(build_history_rows(history));
}

// -- CSV output --

fn print_csv<R: Serialize>(rows: Vec<R>) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_filers_csv(filers: &[Filer]) -> Result<()> {
    print_csv(build_filer_rows(filers))
}

pub fn print_issuers_csv(issuers: &[Issuer]) -> Result<()> {
    print_csv(build_issuer_rows(issuers))
}

pub fn print_ownerships_csv(ownerships: &[Ownership]) -> Result<()> {
    print_csv(build_ownership_rows(ownerships))
}

pub fn print_history_csv(history: &[FilingHistoryItem]) -> Result<()> {
    print_csv(build_history_rows(history))
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

// -- Formatting --

/// `YYYY-MM-DD` from an ISO date or date-time; `-` when missing.
pub fn format_date(value: Option<&str>) -> String {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return "-".to_string();
    };
    parse_date(value)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "Invalid Date".to_string())
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn format_ratio(ratio: Option<f64>) -> String {
    match ratio {
        Some(r) => format!("{:.2}%", r),
        None => "-".to_string(),
    }
}

fn format_change(change: Option<f64>) -> String {
    match change {
        Some(c) if c > 0.0 => format!("+{:.2}%", c),
        Some(c) => format!("{:.2}%", c),
        None => "-".to_string(),
    }
}

fn format_shares(shares: Option<i64>) -> String {
    let Some(shares) = shares else {
        return "-".to_string();
    };
    let digits = shares.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if shares < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Four-digit securities code; EDINET lists it with a trailing check digit.
fn short_sec_code(code: Option<&str>) -> String {
    match code.filter(|c| !c.is_empty()) {
        Some(c) => c.chars().take(4).collect(),
        None => "-".to_string(),
    }
}

fn or_dash(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or("-")
        .to_string()
}
