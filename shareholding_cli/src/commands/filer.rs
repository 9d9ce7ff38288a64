use anyhow::Result;
use clap::Args;
use shareholding_lib::{Client, FilerIssuersView, FilerView, IssuerSort, SortKey, SortOrder};

use crate::output::{
    format_date, print_issuers_csv, print_issuers_markdown, print_issuers_table, print_json,
    OutputFormat,
};

use super::{check_error, parse_id};

#[derive(Args)]
pub struct FilerArgs {
    /// Filer ID
    pub id: String,

    /// Page number of the issuer list
    #[arg(long, default_value = "1")]
    pub page: u64,

    /// Filter issuers by name or code
    #[arg(long, default_value = "")]
    pub search: String,

    /// Sort field: name, ratio, date
    #[arg(long, default_value = "date")]
    pub sort_by: SortKey,

    /// Sort ascending instead of descending
    #[arg(long)]
    pub asc: bool,
}

pub async fn run(args: &FilerArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let id = parse_id(&args.id)?;

    let filer_view = FilerView::new(client.clone(), id);
    let issuers_view = FilerIssuersView::new(client.clone(), id, args.page, &args.search);
    let (filer_state, issuers_state) = tokio::join!(filer_view.settled(), issuers_view.settled());
    check_error(filer_state.error)?;
    check_error(issuers_state.error)?;

    if let Some(filer) = filer_view.filer() {
        eprintln!(
            "{} ({}) - {} issuers, {} filings, last filed {}",
            filer.name,
            filer.edinet_code,
            filer.issuer_count,
            filer.filing_count,
            format_date(filer.latest_filing_date.as_deref())
        );
    }

    let order = if args.asc { SortOrder::Asc } else { SortOrder::Desc };
    let mut issuers = issuers_view.issuers();
    IssuerSort::new(args.sort_by, order).apply(&mut issuers);

    eprintln!(
        "Page {}/{} ({} total issuers)",
        issuers_view.current_page(),
        issuers_view.total_pages(),
        issuers_view.total_count()
    );

    match format {
        OutputFormat::Table => print_issuers_table(&issuers),
        OutputFormat::Json => print_json(&issuers),
        OutputFormat::Csv => print_issuers_csv(&issuers)?,
        OutputFormat::Markdown => print_issuers_markdown(&issuers),
    }

    Ok(())
}
