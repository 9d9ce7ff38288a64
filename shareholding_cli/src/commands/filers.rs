use anyhow::Result;
use clap::Args;
use shareholding_lib::{Client, FilersView};

use crate::output::{print_filers_csv, print_filers_markdown, print_filers_table, print_json, OutputFormat};

use super::check_error;

#[derive(Args)]
pub struct FilersArgs {
    /// Page number
    #[arg(long, default_value = "1")]
    pub page: u64,

    /// Filter by filer name or code
    #[arg(long, default_value = "")]
    pub search: String,
}

pub async fn run(args: &FilersArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let view = FilersView::new(client.clone(), args.page, &args.search);
    let state = view.settled().await;
    check_error(state.error)?;

    let filers = view.filers();
    eprintln!(
        "Page {}/{} ({} total filers)",
        view.current_page(),
        view.total_pages(),
        view.total_count()
    );

    match format {
        OutputFormat::Table => print_filers_table(&filers),
        OutputFormat::Json => print_json(&filers),
        OutputFormat::Csv => print_filers_csv(&filers)?,
        OutputFormat::Markdown => print_filers_markdown(&filers),
    }

    Ok(())
}
