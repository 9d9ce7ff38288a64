use anyhow::Result;
use clap::Args;
use shareholding_lib::{Client, IssuerOwnershipsView};

use crate::output::{
    print_json, print_ownerships_csv, print_ownerships_markdown, print_ownerships_table,
    OutputFormat,
};

use super::{check_error, parse_id};

#[derive(Args)]
pub struct OwnershipsArgs {
    /// Issuer ID
    pub issuer_id: String,
}

pub async fn run(args: &OwnershipsArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let issuer_id = parse_id(&args.issuer_id)?;

    let view = IssuerOwnershipsView::new(client.clone(), issuer_id);
    let state = view.settled().await;
    check_error(state.error)?;

    let Some(data) = view.data() else {
        return Ok(());
    };

    eprintln!(
        "{} ({} holders)",
        data.issuer.display_name(),
        data.ownerships.len()
    );

    match format {
        OutputFormat::Table => print_ownerships_table(&data.ownerships),
        OutputFormat::Json => print_json(&data),
        OutputFormat::Csv => print_ownerships_csv(&data.ownerships)?,
        OutputFormat::Markdown => print_ownerships_markdown(&data.ownerships),
    }

    Ok(())
}
