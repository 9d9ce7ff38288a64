mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use shareholding_lib::ApiConfig;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "shareholding")]
#[command(about = "Browse large-shareholding reports filed on EDINET")]
struct Cli {
    /// API base URL (overrides SHAREHOLDING_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Output format: table, json, csv or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List filers
    Filers(commands::filers::FilersArgs),
    /// Show one filer and the issuers it holds
    Filer(commands::filer::FilerArgs),
    /// Show the filing history of one issuer for one filer
    History(commands::history::HistoryArgs),
    /// Search issuers by name or code
    Search(commands::search::SearchArgs),
    /// List filers holding an issuer
    Ownerships(commands::ownerships::OwnershipsArgs),
    /// Show or toggle UI preferences
    Prefs(commands::prefs::PrefsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("shareholding=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = OutputFormat::from_flag(&cli.output);

    let config = match cli.api_url {
        Some(url) => ApiConfig::from_value(Some(url)),
        None => ApiConfig::from_env(),
    };
    config.validate()?;
    let client = config.client();

    match &cli.command {
        Commands::Filers(args) => commands::filers::run(args, &client, &format).await?,
        Commands::Filer(args) => commands::filer::run(args, &client, &format).await?,
        Commands::History(args) => commands::history::run(args, &client, &format).await?,
        Commands::Search(args) => commands::search::run(args, &client, &format).await?,
        Commands::Ownerships(args) => commands::ownerships::run(args, &client, &format).await?,
        Commands::Prefs(args) => commands::prefs::run(args, &format)?,
    }

    Ok(())
}
