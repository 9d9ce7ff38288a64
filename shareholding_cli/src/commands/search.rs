use anyhow::Result;
use clap::Args;
use shareholding_lib::{Client, IssuerSearchView};

use crate::output::{print_issuers_csv, print_issuers_markdown, print_issuers_table, print_json, OutputFormat};

use super::check_error;

#[derive(Args)]
pub struct SearchArgs {
    /// Issuer name, EDINET code or securities code
    pub text: String,
}

pub async fn run(args: &SearchArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let mut view = IssuerSearchView::new(client.clone(), "");
    view.set_search(&args.text);
    view.execute_search();

    let state = view.settled().await;
    check_error(state.error)?;

    let issuers = view.issuers();
    eprintln!("{} issuers matching {:?}", view.total_count(), view.search());

    match format {
        OutputFormat::Table => print_issuers_table(&issuers),
        OutputFormat::Json => print_json(&issuers),
        OutputFormat::Csv => print_issuers_csv(&issuers)?,
        OutputFormat::Markdown => print_issuers_markdown(&issuers),
    }

    Ok(())
}
