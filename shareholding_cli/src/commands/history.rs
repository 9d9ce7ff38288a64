use anyhow::Result;
use clap::Args;
use shareholding_lib::{Client, IssuerHistoryView};

use crate::output::{
    print_history_csv, print_history_markdown, print_history_table, print_json, OutputFormat,
};

use super::{check_error, parse_id};

#[derive(Args)]
pub struct HistoryArgs {
    /// Filer ID
    pub filer_id: String,

    /// Issuer ID
    pub issuer_id: String,
}

pub async fn run(args: &HistoryArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let filer_id = parse_id(&args.filer_id)?;
    let issuer_id = parse_id(&args.issuer_id)?;

    let view = IssuerHistoryView::new(client.clone(), filer_id, issuer_id);
    let state = view.settled().await;
    check_error(state.error)?;

    let Some(data) = view.data() else {
        return Ok(());
    };

    eprintln!(
        "{} held by {} ({} reports)",
        data.issuer.display_name(),
        data.filer.name,
        data.history.len()
    );

    match format {
        OutputFormat::Table => print_history_table(&data.history),
        OutputFormat::Json => print_json(&data),
        OutputFormat::Csv => print_history_csv(&data.history)?,
        OutputFormat::Markdown => print_history_markdown(&data.history),
    }

    Ok(())
}
